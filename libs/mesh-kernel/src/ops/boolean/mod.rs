//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry operations using BSP trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); A.build(B)
//! - Difference: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); A.build(B); A.invert()
//! - Intersection: A.invert(); B.clipTo(A); B.invert(); A.clipTo(B); B.clipTo(A); A.build(B); A.invert()
//!
//! Results are fan-triangulated polygons with one vertex per polygon corner;
//! weld them with [`remove_duplicated_vertices`](crate::ops::clean::remove_duplicated_vertices)
//! when shared vertices are needed.
//!
//! ## Example
//!
//! ```rust
//! use mesh_kernel::ops::boolean::difference;
//! use mesh_kernel::primitives::generate_box;
//! use glam::DVec3;
//!
//! let a = generate_box(DVec3::splat(-2.0), DVec3::splat(2.0));
//! let b = generate_box(DVec3::splat(-1.0), DVec3::splat(1.0));
//! let hollow = difference(&a, &b);
//! assert!(hollow.face_count() >= 24);
//! ```

mod bsp;
mod plane;
mod polygon;

#[cfg(test)]
mod tests;

use crate::Mesh;
use bsp::BspTree;
use config::constants::EPSILON;
use polygon::Polygon;

/// Solid set operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// Volume in either operand.
    Union,
    /// Volume in the first operand and not in the second.
    Difference,
    /// Volume in both operands.
    Intersection,
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Applies `op` to two closed meshes.
pub fn boolean(op: BooleanOp, a: &Mesh, b: &Mesh) -> Mesh {
    match op {
        BooleanOp::Union => union(a, b),
        BooleanOp::Difference => difference(a, b),
        BooleanOp::Intersection => intersection(a, b),
    }
}

/// Compute union of two meshes.
pub fn union(a: &Mesh, b: &Mesh) -> Mesh {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);

    if polys_a.is_empty() {
        return polygons_to_mesh(&polys_b);
    }
    if polys_b.is_empty() {
        return polygons_to_mesh(&polys_a);
    }

    let mut bsp_a = BspTree::new(polys_a);
    let mut bsp_b = BspTree::new(polys_b);

    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.build(bsp_b.all_polygons());

    let result = polygons_to_mesh(&bsp_a.all_polygons());
    log::debug!(
        "union: {} + {} faces -> {} faces",
        a.face_count(),
        b.face_count(),
        result.face_count()
    );
    result
}

/// Compute difference of two meshes (A - B).
pub fn difference(a: &Mesh, b: &Mesh) -> Mesh {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);

    if polys_a.is_empty() {
        return Mesh::new();
    }
    if polys_b.is_empty() {
        return polygons_to_mesh(&polys_a);
    }

    let mut bsp_a = BspTree::new(polys_a);
    let mut bsp_b = BspTree::new(polys_b);

    // A - B = ~(~A | B)
    bsp_a.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.build(bsp_b.all_polygons());
    bsp_a.invert();

    let result = polygons_to_mesh(&bsp_a.all_polygons());
    log::debug!(
        "difference: {} - {} faces -> {} faces",
        a.face_count(),
        b.face_count(),
        result.face_count()
    );
    result
}

/// Compute intersection of two meshes.
pub fn intersection(a: &Mesh, b: &Mesh) -> Mesh {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);

    if polys_a.is_empty() || polys_b.is_empty() {
        return Mesh::new();
    }

    let mut bsp_a = BspTree::new(polys_a);
    let mut bsp_b = BspTree::new(polys_b);

    // A & B = ~(~A | ~B)
    bsp_a.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_a.build(bsp_b.all_polygons());
    bsp_a.invert();

    polygons_to_mesh(&bsp_a.all_polygons())
}

// =============================================================================
// CONVERSION HELPERS
// =============================================================================

/// Each non-degenerate triangle becomes a polygon.
fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    (0..mesh.face_count())
        .filter_map(|f| Polygon::from_vertices(mesh.face_positions(f).to_vec()))
        .collect()
}

/// Fan-triangulates polygons, skipping slivers left by collinear corners.
fn polygons_to_mesh(polygons: &[Polygon]) -> Mesh {
    let mut mesh = Mesh::with_capacity(polygons.len() * 3, polygons.len());

    for poly in polygons {
        let vertices = poly.vertices();
        if vertices.len() < 3 {
            continue;
        }

        let base = mesh.vertex_count() as u32;
        for v in vertices {
            mesh.add_vertex(*v);
        }

        for i in 1..(vertices.len() - 1) {
            let area = (vertices[i] - vertices[0])
                .cross(vertices[i + 1] - vertices[0])
                .length();
            if area > EPSILON {
                mesh.add_face(base, base + i as u32, base + i as u32 + 1);
            }
        }
    }

    mesh
}
