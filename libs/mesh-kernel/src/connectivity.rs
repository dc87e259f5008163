//! # Connectivity
//!
//! Vertex → element adjacency derived from a mesh's topology. Built once by
//! [`Mesh::enable_connectivity`](crate::Mesh::enable_connectivity) and
//! discarded whenever the topology changes.

/// Vertex adjacency index.
///
/// Adjacent elements of a vertex are listed in ascending element order, so
/// "the first adjacent face" is the lowest-indexed face using the vertex.
#[derive(Debug, Clone, Default)]
pub struct Connectivity {
    vertex_faces: Vec<Vec<usize>>,
    vertex_voxels: Vec<Vec<usize>>,
}

impl Connectivity {
    /// Builds the adjacency for `vertex_count` vertices.
    ///
    /// Indices outside `0..vertex_count` are ignored; the mesh validates
    /// topology before calling this.
    pub fn build(vertex_count: usize, faces: &[[u32; 3]], voxels: &[[u32; 4]]) -> Self {
        Self {
            vertex_faces: incidence(vertex_count, faces),
            vertex_voxels: incidence(vertex_count, voxels),
        }
    }

    /// Faces using vertex `v`. Empty for an unknown or isolated vertex.
    pub fn vertex_faces(&self, v: usize) -> &[usize] {
        self.vertex_faces.get(v).map(Vec::as_slice).unwrap_or_default()
    }

    /// Voxels using vertex `v`. Empty for an unknown or isolated vertex.
    pub fn vertex_voxels(&self, v: usize) -> &[usize] {
        self.vertex_voxels.get(v).map(Vec::as_slice).unwrap_or_default()
    }
}

fn incidence<const N: usize>(vertex_count: usize, elements: &[[u32; N]]) -> Vec<Vec<usize>> {
    let mut table = vec![Vec::new(); vertex_count];
    for (element, indices) in elements.iter().enumerate() {
        for &v in indices {
            if let Some(slot) = table.get_mut(v as usize) {
                // A degenerate element may repeat a vertex.
                if slot.last() != Some(&element) {
                    slot.push(element);
                }
            }
        }
    }
    table
}
