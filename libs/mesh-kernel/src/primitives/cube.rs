//! # Box Primitive
//!
//! Axis-aligned box between two corners.

use crate::mesh::Mesh;
use glam::DVec3;

/// Creates an axis-aligned box with outward winding.
///
/// A mesh with 8 vertices and 12 triangles (2 per face).
///
/// # Example
///
/// ```rust
/// use mesh_kernel::primitives::generate_box;
/// use glam::DVec3;
///
/// let mesh = generate_box(DVec3::ZERO, DVec3::splat(10.0));
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 12);
/// ```
pub fn generate_box(min: DVec3, max: DVec3) -> Mesh {
    let mut mesh = Mesh::with_capacity(8, 12);

    // Bottom corners, then top corners, counter-clockwise seen from +z
    let v0 = mesh.add_vertex(DVec3::new(min.x, min.y, min.z));
    let v1 = mesh.add_vertex(DVec3::new(max.x, min.y, min.z));
    let v2 = mesh.add_vertex(DVec3::new(max.x, max.y, min.z));
    let v3 = mesh.add_vertex(DVec3::new(min.x, max.y, min.z));
    let v4 = mesh.add_vertex(DVec3::new(min.x, min.y, max.z));
    let v5 = mesh.add_vertex(DVec3::new(max.x, min.y, max.z));
    let v6 = mesh.add_vertex(DVec3::new(max.x, max.y, max.z));
    let v7 = mesh.add_vertex(DVec3::new(min.x, max.y, max.z));

    // Bottom (z = min.z)
    mesh.add_face(v0, v2, v1);
    mesh.add_face(v0, v3, v2);
    // Top (z = max.z)
    mesh.add_face(v4, v5, v6);
    mesh.add_face(v4, v6, v7);
    // Front (y = min.y)
    mesh.add_face(v0, v1, v5);
    mesh.add_face(v0, v5, v4);
    // Back (y = max.y)
    mesh.add_face(v2, v3, v7);
    mesh.add_face(v2, v7, v6);
    // Left (x = min.x)
    mesh.add_face(v3, v0, v4);
    mesh.add_face(v3, v4, v7);
    // Right (x = max.x)
    mesh.add_face(v1, v2, v6);
    mesh.add_face(v1, v6, v5);

    mesh
}
