//! # Separator
//!
//! Splits a meshed model into per-electrode submeshes and the rest.
//!
//! Elements are voxels when the mesh has them and faces otherwise. An element
//! belongs to a region of interest when at least one of its vertices lies in
//! the box; every other element belongs to the rest.

use crate::error::{ElectrodeError, ElectrodeResult};
use crate::placement::BoundingBox;
use config::constants::{ORIGINAL_FACE_INDEX, ORIGINAL_VOXEL_INDEX};
use mesh_kernel::{AttributeData, GeometryKernel, Mesh, MeshError};

/// Output of [`separate_one`].
#[derive(Debug, Clone)]
pub struct Separation {
    /// Elements touching the box.
    pub roi: Mesh,
    /// All other elements; `None` when the box captured everything.
    pub rest: Option<Mesh>,
}

/// The two domains of a meshed model, both extracted from it with an
/// original-index attribute.
#[derive(Debug, Clone, Copy)]
pub struct ModelDomains<'a> {
    /// Head tissue elements.
    pub surface: &'a Mesh,
    /// Elements of every electrode.
    pub electrodes: &'a Mesh,
}

/// Output of [`separate_many`].
#[derive(Debug, Clone)]
pub struct SeparatedModel {
    /// One submesh per box, in box order. Original indices refer to the model.
    pub electrodes: Vec<Mesh>,
    /// Surface domain plus electrode elements no box captured.
    pub rest_surface: Mesh,
}

/// Name of the original-index attribute written by submesh extraction.
pub fn original_index_attribute(mesh: &Mesh) -> &'static str {
    if mesh.has_voxels() {
        ORIGINAL_VOXEL_INDEX
    } else {
        ORIGINAL_FACE_INDEX
    }
}

fn elements(mesh: &Mesh) -> Vec<Vec<u32>> {
    if mesh.has_voxels() {
        mesh.voxels().iter().map(|v| v.to_vec()).collect()
    } else {
        mesh.faces().iter().map(|f| f.to_vec()).collect()
    }
}

/// Partitions `mesh` by `bbox`.
pub fn separate_one<K: GeometryKernel + ?Sized>(
    kernel: &K,
    mesh: &Mesh,
    bbox: &BoundingBox,
) -> ElectrodeResult<Separation> {
    let inside: Vec<bool> = mesh.vertices().iter().map(|v| bbox.contains(*v)).collect();

    let (roi_ids, rest_ids): (Vec<usize>, Vec<usize>) = elements(mesh)
        .iter()
        .enumerate()
        .map(|(i, element)| (i, element.iter().any(|&v| inside[v as usize])))
        .fold((Vec::new(), Vec::new()), |(mut roi, mut rest), (i, hit)| {
            if hit {
                roi.push(i);
            } else {
                rest.push(i);
            }
            (roi, rest)
        });

    if roi_ids.is_empty() {
        log::warn!("no elements inside {bbox:?}");
    }
    log::debug!(
        "separated {} elements into {} inside and {} outside",
        roi_ids.len() + rest_ids.len(),
        roi_ids.len(),
        rest_ids.len()
    );

    let roi = kernel.submesh(mesh, &roi_ids)?;
    let rest = if rest_ids.is_empty() {
        None
    } else {
        Some(kernel.submesh(mesh, &rest_ids)?)
    };
    Ok(Separation { roi, rest })
}

/// Re-targets the original-index attribute of `mesh` through `lineage`.
fn compose(mesh: &mut Mesh, name: &str, lineage: &[usize]) -> ElectrodeResult<Vec<usize>> {
    let composed = mesh
        .index_attribute(name)?
        .iter()
        .map(|&i| {
            lineage.get(i).copied().ok_or(ElectrodeError::Kernel(
                MeshError::IndexOutOfRange {
                    index: i,
                    len: lineage.len(),
                },
            ))
        })
        .collect::<ElectrodeResult<Vec<_>>>()?;
    mesh.set_attribute(name, AttributeData::Indices(composed.clone()))?;
    Ok(composed)
}

/// Separates every electrode of a meshed model.
///
/// Each box is applied to what the previous boxes left of the electrode
/// domain. Once nothing is left, later electrodes come out empty. The rest
/// surface is extracted from `model` again, from the surface domain's
/// elements followed by the unclaimed electrode elements.
pub fn separate_many<K: GeometryKernel + ?Sized>(
    kernel: &K,
    model: &Mesh,
    domains: ModelDomains<'_>,
    bboxes: &[BoundingBox],
) -> ElectrodeResult<SeparatedModel> {
    let name = original_index_attribute(model);
    let mut lineage = domains.electrodes.index_attribute(name)?.to_vec();
    let mut remainder = Some(domains.electrodes.clone());
    let mut electrodes = Vec::with_capacity(bboxes.len());

    for (n, bbox) in bboxes.iter().enumerate() {
        let Some(current) = remainder.take() else {
            log::warn!("electrode {n} has no elements left to claim");
            electrodes.push(Mesh::new());
            continue;
        };

        let Separation { mut roi, rest } = separate_one(kernel, &current, bbox)?;
        compose(&mut roi, name, &lineage)?;
        electrodes.push(roi);

        if let Some(mut rest) = rest {
            lineage = compose(&mut rest, name, &lineage)?;
            remainder = Some(rest);
        }
    }

    let mut rest_ids = domains.surface.index_attribute(name)?.to_vec();
    if remainder.is_some() {
        rest_ids.extend_from_slice(&lineage);
    }
    let rest_surface = kernel.submesh(model, &rest_ids)?;
    log::debug!(
        "separated {} electrodes; rest surface has {} elements",
        electrodes.len(),
        rest_ids.len()
    );

    Ok(SeparatedModel {
        electrodes,
        rest_surface,
    })
}
