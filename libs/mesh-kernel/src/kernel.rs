//! # Geometry Kernel
//!
//! The set of mesh operations the electrode pipeline relies on, behind one
//! trait so the pipeline does not depend on a particular geometry engine.

use crate::error::MeshResult;
use crate::ops::boolean::{self, BooleanOp};
use crate::ops::query::PointQuery;
use crate::ops::{clean, hull, intersect, query, submesh};
use crate::primitives;
use crate::Mesh;
use glam::DVec3;

/// Mesh operations used by electrode placement, imprinting and separation.
///
/// Every operation returns a new mesh; inputs are never modified.
pub trait GeometryKernel {
    /// Concatenates meshes without geometric processing.
    fn merge(&self, meshes: &[&Mesh]) -> Mesh {
        Mesh::merged(meshes.iter().copied())
    }

    /// Solid set operation on two closed meshes.
    fn boolean(&self, a: &Mesh, b: &Mesh, op: BooleanOp) -> MeshResult<Mesh>;

    /// Outer boundary of a union of possibly overlapping shells.
    fn outer_hull(&self, mesh: &Mesh) -> MeshResult<Mesh>;

    /// Nearest face, closest point and squared distance for each point.
    fn distance_to_mesh(&self, mesh: &Mesh, points: &[DVec3]) -> MeshResult<Vec<PointQuery>>;

    /// As [`distance_to_mesh`](Self::distance_to_mesh), negative inside.
    fn signed_distance_to_mesh(
        &self,
        mesh: &Mesh,
        points: &[DVec3],
    ) -> MeshResult<Vec<PointQuery>>;

    /// Sorted pairs `[i, j]`, `i < j`, of faces whose interiors intersect.
    fn detect_self_intersection(&self, mesh: &Mesh) -> MeshResult<Vec<[usize; 2]>>;

    /// Welds vertices closer than `tolerance`; the face count is unchanged.
    fn remove_duplicated_vertices(&self, mesh: &Mesh, tolerance: f64) -> MeshResult<Mesh>;

    /// Dissolves vertices lying flat inside a planar patch or on a straight
    /// patch border, except those within `tolerance` of a `protected` point.
    fn remove_redundant_vertices(
        &self,
        mesh: &Mesh,
        protected: &[DVec3],
        tolerance: f64,
    ) -> MeshResult<Mesh>;

    /// Extracts voxels (volumetric meshes) or faces by index and records
    /// their source indices in `ori_voxel_index` / `ori_face_index`.
    fn submesh(&self, mesh: &Mesh, indices: &[usize]) -> MeshResult<Mesh>;

    /// Closed cylinder between two end centers.
    fn generate_cylinder(
        &self,
        p0: DVec3,
        p1: DVec3,
        r0: f64,
        r1: f64,
        segments: u32,
    ) -> MeshResult<Mesh>;
}

/// Pure-Rust kernel: BSP booleans, brute-force parallel queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct BspKernel;

impl GeometryKernel for BspKernel {
    fn boolean(&self, a: &Mesh, b: &Mesh, op: BooleanOp) -> MeshResult<Mesh> {
        Ok(boolean::boolean(op, a, b))
    }

    fn outer_hull(&self, mesh: &Mesh) -> MeshResult<Mesh> {
        hull::outer_hull(mesh)
    }

    fn distance_to_mesh(&self, mesh: &Mesh, points: &[DVec3]) -> MeshResult<Vec<PointQuery>> {
        query::distance_to_mesh(mesh, points)
    }

    fn signed_distance_to_mesh(
        &self,
        mesh: &Mesh,
        points: &[DVec3],
    ) -> MeshResult<Vec<PointQuery>> {
        query::signed_distance_to_mesh(mesh, points)
    }

    fn detect_self_intersection(&self, mesh: &Mesh) -> MeshResult<Vec<[usize; 2]>> {
        Ok(intersect::detect_self_intersection(mesh))
    }

    fn remove_duplicated_vertices(&self, mesh: &Mesh, tolerance: f64) -> MeshResult<Mesh> {
        clean::remove_duplicated_vertices(mesh, tolerance)
    }

    fn remove_redundant_vertices(
        &self,
        mesh: &Mesh,
        protected: &[DVec3],
        tolerance: f64,
    ) -> MeshResult<Mesh> {
        clean::remove_redundant_vertices(mesh, protected, tolerance)
    }

    fn submesh(&self, mesh: &Mesh, indices: &[usize]) -> MeshResult<Mesh> {
        submesh::submesh(mesh, indices)
    }

    fn generate_cylinder(
        &self,
        p0: DVec3,
        p1: DVec3,
        r0: f64,
        r1: f64,
        segments: u32,
    ) -> MeshResult<Mesh> {
        primitives::generate_cylinder(p0, p1, r0, r1, segments)
    }
}
