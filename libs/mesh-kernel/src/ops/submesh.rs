//! # Submesh Extraction
//!
//! Selects voxels (for volumetric meshes) or faces and compacts the vertex
//! array. Each element of the result remembers its index in the source mesh
//! through the `ori_voxel_index` / `ori_face_index` attribute.

use crate::attributes::{AttributeData, ElementKind};
use crate::error::{MeshError, MeshResult};
use crate::Mesh;
use config::constants::{ORIGINAL_FACE_INDEX, ORIGINAL_VOXEL_INDEX};
use std::collections::HashMap;

/// Extracts the elements at `indices`, in the given order.
///
/// Vertices used by the selection are kept in their original relative order.
/// For volumetric meshes the surface of the result is the set of tetrahedron
/// faces that occur exactly once among the selected voxels.
///
/// # Errors
///
/// [`MeshError::IndexOutOfRange`] for an index past the element count.
///
/// # Example
///
/// ```rust
/// use mesh_kernel::ops::submesh::submesh;
/// use mesh_kernel::primitives::generate_box;
/// use glam::DVec3;
///
/// let cube = generate_box(DVec3::ZERO, DVec3::ONE);
/// let part = submesh(&cube, &[0, 1]).unwrap();
/// assert_eq!(part.face_count(), 2);
/// assert_eq!(part.index_attribute("ori_face_index").unwrap(), &[0, 1]);
/// ```
pub fn submesh(mesh: &Mesh, indices: &[usize]) -> MeshResult<Mesh> {
    if mesh.has_voxels() {
        voxel_submesh(mesh, indices)
    } else {
        face_submesh(mesh, indices)
    }
}

fn check_range(indices: &[usize], len: usize) -> MeshResult<()> {
    match indices.iter().find(|&&i| i >= len) {
        Some(&index) => Err(MeshError::IndexOutOfRange { index, len }),
        None => Ok(()),
    }
}

/// Maps used source vertices to compact indices, preserving order.
fn compact_vertices<'a>(
    mesh: &Mesh,
    used: impl Iterator<Item = &'a u32>,
) -> (Vec<glam::DVec3>, Vec<Option<u32>>) {
    let mut keep = vec![false; mesh.vertex_count()];
    for &v in used {
        keep[v as usize] = true;
    }
    let mut remap = vec![None; mesh.vertex_count()];
    let mut vertices = Vec::new();
    for (i, position) in mesh.vertices().iter().enumerate() {
        if keep[i] {
            remap[i] = Some(vertices.len() as u32);
            vertices.push(*position);
        }
    }
    (vertices, remap)
}

fn reindex<const N: usize>(element: [u32; N], remap: &[Option<u32>]) -> MeshResult<[u32; N]> {
    let mut out = [0; N];
    for (slot, v) in out.iter_mut().zip(element) {
        *slot = remap[v as usize].ok_or_else(|| {
            MeshError::invalid_topology(format!("vertex {v} missing from submesh"))
        })?;
    }
    Ok(out)
}

fn face_submesh(mesh: &Mesh, indices: &[usize]) -> MeshResult<Mesh> {
    check_range(indices, mesh.face_count())?;

    let selected: Vec<[u32; 3]> = indices.iter().map(|&f| mesh.face(f)).collect();
    let (vertices, remap) = compact_vertices(mesh, selected.iter().flatten());
    let faces = selected
        .into_iter()
        .map(|f| reindex(f, &remap))
        .collect::<MeshResult<Vec<_>>>()?;

    let mut result = Mesh::from_parts(vertices, faces, Vec::new())?;
    result.add_attribute(ORIGINAL_FACE_INDEX, ElementKind::Face)?;
    result.set_attribute(ORIGINAL_FACE_INDEX, AttributeData::Indices(indices.to_vec()))?;
    Ok(result)
}

fn voxel_submesh(mesh: &Mesh, indices: &[usize]) -> MeshResult<Mesh> {
    check_range(indices, mesh.voxel_count())?;

    let selected: Vec<[u32; 4]> = indices.iter().map(|&v| mesh.voxels()[v]).collect();
    let (vertices, remap) = compact_vertices(mesh, selected.iter().flatten());
    let voxels = selected
        .into_iter()
        .map(|v| reindex(v, &remap))
        .collect::<MeshResult<Vec<_>>>()?;
    let faces = boundary_faces(&vertices, &voxels);

    let mut result = Mesh::from_parts(vertices, faces, voxels)?;
    result.add_attribute(ORIGINAL_VOXEL_INDEX, ElementKind::Voxel)?;
    result.set_attribute(ORIGINAL_VOXEL_INDEX, AttributeData::Indices(indices.to_vec()))?;
    Ok(result)
}

/// Tetrahedron faces seen once, wound outward, in order of first appearance.
pub fn boundary_faces(vertices: &[glam::DVec3], voxels: &[[u32; 4]]) -> Vec<[u32; 3]> {
    let mut candidates: Vec<[u32; 3]> = Vec::with_capacity(voxels.len() * 4);
    let mut seen: HashMap<[u32; 3], usize> = HashMap::new();

    for &voxel in voxels {
        let [a, b, c, d] = voxel;
        let p = |i: u32| vertices[i as usize];
        let volume = (p(b) - p(a)).dot((p(c) - p(a)).cross(p(d) - p(a)));
        let tet = if volume < 0.0 { [a, c, b, d] } else { voxel };
        let [a, b, c, d] = tet;

        for face in [[a, c, b], [a, b, d], [a, d, c], [b, c, d]] {
            let mut key = face;
            key.sort_unstable();
            *seen.entry(key).or_insert(0) += 1;
            candidates.push(face);
        }
    }

    candidates
        .into_iter()
        .filter(|face| {
            let mut key = *face;
            key.sort_unstable();
            seen.get(&key) == Some(&1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    /// Two tetrahedra sharing the face (1, 2, 3).
    fn two_tets() -> Mesh {
        Mesh::from_parts(
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, DVec3::ONE],
            vec![],
            vec![[0, 1, 2, 3], [4, 1, 3, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_face_submesh_compacts_vertices() {
        let mesh = Mesh::from_parts(
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, DVec3::ONE],
            vec![[0, 1, 2], [4, 3, 1]],
            vec![],
        )
        .unwrap();

        let part = submesh(&mesh, &[1]).unwrap();
        assert_eq!(part.vertices(), &[DVec3::X, DVec3::Z, DVec3::ONE]);
        assert_eq!(part.faces(), &[[2, 1, 0]]);
        assert_eq!(part.index_attribute(ORIGINAL_FACE_INDEX).unwrap(), &[1]);
    }

    #[test]
    fn test_voxel_submesh_single() {
        let part = submesh(&two_tets(), &[1]).unwrap();
        assert_eq!(part.voxel_count(), 1);
        assert_eq!(part.vertex_count(), 4);
        assert_eq!(part.face_count(), 4);
        assert_eq!(part.index_attribute(ORIGINAL_VOXEL_INDEX).unwrap(), &[1]);
    }

    #[test]
    fn test_voxel_submesh_hides_shared_face() {
        let part = submesh(&two_tets(), &[0, 1]).unwrap();
        assert_eq!(part.voxel_count(), 2);
        assert_eq!(part.face_count(), 6);
    }

    #[test]
    fn test_boundary_faces_wound_outward() {
        let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
        let centroid = DVec3::splat(0.25);
        for voxel in [[0, 1, 2, 3], [0, 2, 1, 3]] {
            for [a, b, c] in boundary_faces(&vertices, &[voxel]) {
                let (pa, pb, pc) = (vertices[a as usize], vertices[b as usize], vertices[c as usize]);
                let normal = (pb - pa).cross(pc - pa);
                assert!(normal.dot(pa - centroid) > 0.0);
            }
        }
    }

    #[test]
    fn test_submesh_out_of_range() {
        let err = submesh(&two_tets(), &[2]).unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn test_empty_selection() {
        let part = submesh(&two_tets(), &[]).unwrap();
        assert!(part.is_empty());
        assert_eq!(part.voxel_count(), 0);
    }
}
