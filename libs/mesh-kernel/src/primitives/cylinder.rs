//! # Cylinder Primitive
//!
//! Cylinder or frustum between two end centers with an arbitrary axis.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use config::constants::{approx_zero, MIN_CYLINDER_SEGMENTS};
use glam::DVec3;
use std::f64::consts::PI;

/// Creates a closed cylinder from `p0` to `p1`.
///
/// # Layout
///
/// - vertices `0..n`: ring around `p0` with radius `r0`
/// - vertices `n..2n`: ring around `p1` with radius `r1`
/// - vertex `2n`: `p0`, vertex `2n + 1`: `p1` (cap centers)
/// - `2n` side triangles, then `n` triangles per cap
///
/// Faces are wound outward.
///
/// # Example
///
/// ```rust
/// use mesh_kernel::primitives::generate_cylinder;
/// use glam::DVec3;
///
/// let mesh = generate_cylinder(DVec3::ZERO, DVec3::Z, 1.0, 1.0, 16).unwrap();
/// assert_eq!(mesh.vertex_count(), 34);
/// assert_eq!(mesh.face_count(), 64);
/// assert_eq!(mesh.vertex(33), DVec3::Z);
/// ```
pub fn generate_cylinder(
    p0: DVec3,
    p1: DVec3,
    r0: f64,
    r1: f64,
    segments: u32,
) -> MeshResult<Mesh> {
    if segments < MIN_CYLINDER_SEGMENTS {
        return Err(MeshError::degenerate(format!(
            "Cylinder segments must be at least {MIN_CYLINDER_SEGMENTS}: {segments}"
        )));
    }
    if !(r0 > 0.0 && r1 > 0.0) {
        return Err(MeshError::degenerate(format!(
            "Cylinder radii must be positive: r0={r0}, r1={r1}"
        )));
    }
    let length = p0.distance(p1);
    if approx_zero(length) {
        return Err(MeshError::degenerate(format!(
            "Cylinder end centers coincide: {p0}"
        )));
    }
    let axis = (p1 - p0) / length;

    // Right-handed frame (u, v, axis)
    let u = axis.any_orthogonal_vector().normalize();
    let v = axis.cross(u);

    let n = segments;
    let mut mesh = Mesh::with_capacity(2 * n as usize + 2, 4 * n as usize);

    for (center, radius) in [(p0, r0), (p1, r1)] {
        for j in 0..n {
            let theta = 2.0 * PI * j as f64 / n as f64;
            mesh.add_vertex(center + radius * (theta.cos() * u + theta.sin() * v));
        }
    }
    let c0 = mesh.add_vertex(p0);
    let c1 = mesh.add_vertex(p1);

    for j in 0..n {
        let j_next = (j + 1) % n;
        let (b0, b1) = (j, j_next);
        let (t0, t1) = (n + j, n + j_next);
        mesh.add_face(b0, b1, t1);
        mesh.add_face(b0, t1, t0);
    }
    for j in 0..n {
        let j_next = (j + 1) % n;
        mesh.add_face(c0, j_next, j);
    }
    for j in 0..n {
        let j_next = (j + 1) % n;
        mesh.add_face(c1, n + j, n + j_next);
    }

    Ok(mesh)
}
