//! # Imprint Engine
//!
//! Merges an electrode solid into a surface so the result is one surface
//! with the electrode footprint cut in and the protruding part attached.
//!
//! ## Stages
//!
//! 1. `model = surface + electrode` (concatenation)
//! 2. `hull = outer_hull(model)`
//! 3. `tangent = electrode - surface`
//! 4. `outer_diff = hull - tangent`
//! 5. `conditioned = outer_diff + tangent` (concatenation)
//! 6. weld duplicated vertices
//! 7. dissolve split vertices that lie flat on a planar patch; vertices of
//!    the input surface are always kept
//! 8. drop the first face of every self-intersecting pair
//!
//! Self-intersection detection is deterministic and the final extraction
//! keeps positions and vertex identity, so the conditioned surface has no
//! self-intersecting pairs left.
//!
//! On a flat surface whose vertices include the electrode rim, the
//! conditioned surface has exactly the surface vertices plus the protruding
//! cap ring. Rims that cut across surface faces add their crossing points.

use crate::error::ElectrodeResult;
use config::constants::VERTEX_MERGE_EPSILON;
use mesh_kernel::{BooleanOp, GeometryKernel, Mesh};
use std::collections::BTreeSet;

/// Output of [`imprint`].
#[derive(Debug, Clone)]
pub struct Imprint {
    /// Surface with the electrode imprinted.
    pub conditioned: Mesh,
    /// Outer hull minus the protruding part of the electrode.
    pub outer_diff: Mesh,
}

/// Imprints `electrode` into `surface`.
pub fn imprint<K: GeometryKernel + ?Sized>(
    kernel: &K,
    surface: &Mesh,
    electrode: &Mesh,
) -> ElectrodeResult<Imprint> {
    let model = kernel.merge(&[surface, electrode]);
    let hull = kernel.outer_hull(&model)?;
    log::debug!("imprint: outer hull has {} faces", hull.face_count());

    let tangent = kernel.boolean(electrode, surface, BooleanOp::Difference)?;
    let outer_diff = kernel.boolean(&hull, &tangent, BooleanOp::Difference)?;
    log::debug!(
        "imprint: tangent {} faces, outer diff {} faces",
        tangent.face_count(),
        outer_diff.face_count()
    );

    let merged = kernel.merge(&[&outer_diff, &tangent]);
    let welded = kernel.remove_duplicated_vertices(&merged, VERTEX_MERGE_EPSILON)?;
    let reduced =
        kernel.remove_redundant_vertices(&welded, surface.vertices(), VERTEX_MERGE_EPSILON)?;
    log::debug!(
        "imprint: {} of {} vertices kept after dissolving split vertices",
        reduced.vertex_count(),
        welded.vertex_count()
    );

    let conditioned = drop_self_intersections(kernel, &reduced)?;
    Ok(Imprint {
        conditioned,
        outer_diff,
    })
}

/// Removes the first face of every self-intersecting pair, without merging
/// vertices.
pub fn drop_self_intersections<K: GeometryKernel + ?Sized>(
    kernel: &K,
    mesh: &Mesh,
) -> ElectrodeResult<Mesh> {
    let pairs = kernel.detect_self_intersection(mesh)?;
    let dropped: BTreeSet<usize> = pairs.iter().map(|[first, _]| *first).collect();
    if !dropped.is_empty() {
        log::warn!(
            "dropping {} of {} faces involved in {} self-intersecting pairs",
            dropped.len(),
            mesh.face_count(),
            pairs.len()
        );
    }

    let keep: Vec<usize> = (0..mesh.face_count())
        .filter(|f| !dropped.contains(f))
        .collect();
    Ok(kernel.submesh(mesh, &keep)?)
}
