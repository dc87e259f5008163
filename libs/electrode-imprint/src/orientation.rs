//! # Orientation Estimator
//!
//! Unit directions for electrode axes at a surface point.

use crate::error::{ElectrodeError, ElectrodeResult};
use glam::DVec3;
use mesh_kernel::{GeometryKernel, Mesh, MeshError};

/// Normal of the first face adjacent to the surface vertex at `point`.
///
/// The vertex is matched by exact coordinates. The two other corners of its
/// lowest-indexed adjacent face, taken in face order, span the normal, so
/// the sign follows that face's winding.
///
/// # Errors
///
/// - [`MeshError::ConnectivityDisabled`] (as `Kernel`) without connectivity
/// - [`ElectrodeError::VertexNotFound`] when no vertex matches
/// - [`ElectrodeError::DegenerateGeometry`] for an isolated vertex or a
///   zero-area face
pub fn orient_from_adjacency(mesh: &Mesh, point: DVec3) -> ElectrodeResult<DVec3> {
    if !mesh.has_connectivity() {
        return Err(MeshError::ConnectivityDisabled.into());
    }
    let vertex = mesh
        .find_vertex(point)
        .ok_or(ElectrodeError::VertexNotFound { point })?;
    let face = *mesh.vertex_adjacent_faces(vertex)?.first().ok_or_else(|| {
        ElectrodeError::DegenerateGeometry(format!("vertex {vertex} has no adjacent faces"))
    })?;

    let others: Vec<DVec3> = mesh
        .face_positions(face)
        .into_iter()
        .filter(|p| *p != point)
        .collect();
    let [p1, p2] = others[..] else {
        return Err(ElectrodeError::DegenerateGeometry(format!(
            "face {face} repeats vertex {vertex}"
        )));
    };

    (p1 - point)
        .cross(p2 - point)
        .try_normalize()
        .ok_or_else(|| ElectrodeError::DegenerateGeometry(format!("face {face} has zero area")))
}

/// Direction from the nearest face's first edge crossed with `delta`.
///
/// `dir = normalize(v[f0] - v[f1])` on the face closest to `point`; the
/// result is `normalize(delta × dir)`. With `delta` along the vertical this
/// yields a horizontal axis on roughly spherical heads.
pub fn orient_from_signed_distance<K: GeometryKernel + ?Sized>(
    kernel: &K,
    mesh: &Mesh,
    point: DVec3,
    delta: DVec3,
) -> ElectrodeResult<DVec3> {
    let query = kernel.signed_distance_to_mesh(mesh, &[point])?;
    let face = query
        .first()
        .ok_or_else(|| ElectrodeError::DegenerateGeometry("empty distance query".into()))?
        .face;

    let [p1, p2, _] = mesh.face_positions(face);
    let dir = (p1 - p2).try_normalize().ok_or_else(|| {
        ElectrodeError::DegenerateGeometry(format!("face {face} has a zero-length edge"))
    })?;

    delta.cross(dir).try_normalize().ok_or_else(|| {
        ElectrodeError::DegenerateGeometry(format!("{delta} is parallel to the edge of face {face}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_kernel::primitives::generate_box;
    use mesh_kernel::BspKernel;

    fn tilted_triangle() -> Mesh {
        let mut mesh = Mesh::from_parts(
            vec![DVec3::ZERO, DVec3::new(2.0, 0.0, 1.0), DVec3::new(0.0, 3.0, 1.0)],
            vec![[0, 1, 2]],
            vec![],
        )
        .unwrap();
        mesh.enable_connectivity();
        mesh
    }

    #[test]
    fn test_adjacency_normal_is_unit_and_perpendicular() {
        let mesh = tilted_triangle();
        let p = DVec3::ZERO;
        let n = orient_from_adjacency(&mesh, p).unwrap();
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.dot(mesh.vertex(1) - p), 0.0, epsilon = 1e-12);
        assert_relative_eq!(n.dot(mesh.vertex(2) - p), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_adjacency_sign_follows_face_order() {
        let mesh = tilted_triangle();
        let at_first = orient_from_adjacency(&mesh, mesh.vertex(0)).unwrap();
        let at_second = orient_from_adjacency(&mesh, mesh.vertex(1)).unwrap();
        // Corners (1, 2) seen from 0 versus (0, 2) seen from 1.
        assert_relative_eq!(at_first.dot(at_second), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_adjacency_requires_connectivity() {
        let mesh = generate_box(DVec3::ZERO, DVec3::ONE);
        let err = orient_from_adjacency(&mesh, DVec3::ZERO).unwrap_err();
        assert!(matches!(err, ElectrodeError::Kernel(MeshError::ConnectivityDisabled)));
    }

    #[test]
    fn test_adjacency_vertex_not_found() {
        let mesh = tilted_triangle();
        let err = orient_from_adjacency(&mesh, DVec3::new(0.5, 0.5, 0.5)).unwrap_err();
        assert!(matches!(err, ElectrodeError::VertexNotFound { .. }));
    }

    #[test]
    fn test_adjacency_isolated_vertex() {
        let mut mesh = tilted_triangle();
        mesh.add_vertex(DVec3::splat(9.0));
        mesh.enable_connectivity();
        let err = orient_from_adjacency(&mesh, DVec3::splat(9.0)).unwrap_err();
        assert!(matches!(err, ElectrodeError::DegenerateGeometry(_)));
    }

    #[test]
    fn test_signed_distance_orientation_on_box_side() {
        let cube = generate_box(DVec3::splat(-10.0), DVec3::splat(10.0));
        let n = orient_from_signed_distance(
            &BspKernel,
            &cube,
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, -3.0),
        )
        .unwrap();
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.x.abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_distance_orientation_parallel_delta() {
        let cube = generate_box(DVec3::splat(-10.0), DVec3::splat(10.0));
        // Nearest face is on the top; its first edge is horizontal, so a
        // horizontal delta along that edge cannot be crossed.
        let [p1, p2, _] = cube.face_positions(2);
        let err = orient_from_signed_distance(
            &BspKernel,
            &cube,
            DVec3::new(-5.0, -8.0, 12.0),
            p1 - p2,
        )
        .unwrap_err();
        assert!(matches!(err, ElectrodeError::DegenerateGeometry(_)));
    }
}
