//! # Outer Hull
//!
//! Outer boundary of a surface made of several closed, possibly overlapping
//! shells.
//!
//! ## Algorithm
//!
//! 1. Weld coincident vertices so each shell is one connected component.
//! 2. Split faces into components connected through shared vertices.
//! 3. Fold a BSP union over the components; overlapping volume and the
//!    faces buried inside it disappear.

use super::boolean::union;
use super::clean::remove_duplicated_vertices;
use crate::connectivity::Connectivity;
use crate::error::{MeshError, MeshResult};
use crate::Mesh;
use config::constants::VERTEX_MERGE_EPSILON;
use std::collections::VecDeque;

/// Computes the outer hull of `mesh`.
///
/// # Errors
///
/// [`MeshError::BooleanFailed`] when a non-empty input collapses to nothing.
pub fn outer_hull(mesh: &Mesh) -> MeshResult<Mesh> {
    let welded = remove_duplicated_vertices(mesh, VERTEX_MERGE_EPSILON)?;
    let components = face_components(&welded);
    log::debug!(
        "outer hull: {} faces in {} components",
        welded.face_count(),
        components.len()
    );

    let mut hull = Mesh::new();
    for faces in components {
        let shell = super::submesh::submesh(&welded, &faces)?;
        hull = union(&hull, &shell);
    }

    if hull.face_count() == 0 && mesh.face_count() > 0 {
        return Err(MeshError::boolean_failed(format!(
            "outer hull of {} faces is empty",
            mesh.face_count()
        )));
    }
    Ok(hull)
}

/// Groups faces connected through shared vertices. Components are ordered by
/// their lowest face index; faces within a component ascend.
pub fn face_components(mesh: &Mesh) -> Vec<Vec<usize>> {
    let adjacency = Connectivity::build(mesh.vertex_count(), mesh.faces(), &[]);
    let mut component_of = vec![usize::MAX; mesh.face_count()];
    let mut components = Vec::new();

    for seed in 0..mesh.face_count() {
        if component_of[seed] != usize::MAX {
            continue;
        }
        let id = components.len();
        let mut members = Vec::new();
        let mut queue = VecDeque::from([seed]);
        component_of[seed] = id;

        while let Some(face) = queue.pop_front() {
            members.push(face);
            for v in mesh.face(face) {
                for &next in adjacency.vertex_faces(v as usize) {
                    if component_of[next] == usize::MAX {
                        component_of[next] = id;
                        queue.push_back(next);
                    }
                }
            }
        }

        members.sort_unstable();
        components.push(members);
    }

    components
}
