//! # Mesh Data Structure
//!
//! Triangle surface or tetrahedral volume with typed per-element attributes
//! and an optional derived adjacency index.

use crate::attributes::{AttributeData, Attributes, ElementKind};
use crate::connectivity::Connectivity;
use crate::error::{MeshError, MeshResult};
use config::constants::EPSILON;
use glam::DVec3;

/// A triangle (and optionally tetrahedron) mesh.
///
/// All geometry uses f64. Faces index into `vertices`; so do voxels when the
/// mesh is volumetric.
///
/// # Example
///
/// ```rust
/// use mesh_kernel::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face(0, 1, 2);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices
    faces: Vec<[u32; 3]>,
    /// Tetrahedron indices (empty for surface meshes)
    voxels: Vec<[u32; 4]>,
    /// Per-element named data
    attributes: Attributes,
    /// Vertex adjacency, present after `enable_connectivity`
    connectivity: Option<Connectivity>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            ..Self::default()
        }
    }

    /// Creates a mesh from raw arrays, checking every index.
    ///
    /// # Errors
    ///
    /// [`MeshError::InvalidTopology`] if a face or voxel references a vertex
    /// that does not exist.
    pub fn from_parts(
        vertices: Vec<DVec3>,
        faces: Vec<[u32; 3]>,
        voxels: Vec<[u32; 4]>,
    ) -> MeshResult<Self> {
        let count = vertices.len();
        let in_range = |index: &u32| (*index as usize) < count;
        if let Some(face) = faces.iter().position(|f| !f.iter().all(in_range)) {
            return Err(MeshError::invalid_topology(format!(
                "face {face} references a vertex outside 0..{count}"
            )));
        }
        if let Some(voxel) = voxels.iter().position(|v| !v.iter().all(in_range)) {
            return Err(MeshError::invalid_topology(format!(
                "voxel {voxel} references a vertex outside 0..{count}"
            )));
        }
        Ok(Self {
            vertices,
            faces,
            voxels,
            ..Self::default()
        })
    }

    /// Concatenates meshes without any geometric processing.
    ///
    /// Indices of later meshes are offset by the vertex count of the earlier
    /// ones. Attributes and connectivity are not carried over.
    pub fn merged<'a>(meshes: impl IntoIterator<Item = &'a Mesh>) -> Mesh {
        let mut result = Mesh::new();
        for mesh in meshes {
            result.merge(mesh);
        }
        result
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of tetrahedra.
    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Returns true if the mesh has tetrahedra.
    #[inline]
    pub fn has_voxels(&self) -> bool {
        !self.voxels.is_empty()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of elements of the given kind.
    pub fn element_count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Vertex => self.vertex_count(),
            ElementKind::Face => self.face_count(),
            ElementKind::Voxel => self.voxel_count(),
        }
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        self.topology_changed(ElementKind::Vertex);
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices and returns its index.
    ///
    /// Indices must refer to vertices already added. This is only asserted
    /// in debug builds; use [`from_parts`](Self::from_parts) or
    /// [`validate`](Self::validate) to check meshes built from untrusted data.
    pub fn add_face(&mut self, v0: u32, v1: u32, v2: u32) -> usize {
        debug_assert!(
            [v0, v1, v2].iter().all(|&i| (i as usize) < self.vertices.len()),
            "face [{v0}, {v1}, {v2}] references a vertex outside 0..{}",
            self.vertices.len()
        );
        self.topology_changed(ElementKind::Face);
        self.faces.push([v0, v1, v2]);
        self.faces.len() - 1
    }

    /// Adds a tetrahedron by vertex indices and returns its index.
    ///
    /// Indices are checked as in [`add_face`](Self::add_face).
    pub fn add_voxel(&mut self, voxel: [u32; 4]) -> usize {
        debug_assert!(
            voxel.iter().all(|&i| (i as usize) < self.vertices.len()),
            "voxel {voxel:?} references a vertex outside 0..{}",
            self.vertices.len()
        );
        self.topology_changed(ElementKind::Voxel);
        self.voxels.push(voxel);
        self.voxels.len() - 1
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Returns a reference to the tetrahedra.
    #[inline]
    pub fn voxels(&self) -> &[[u32; 4]] {
        &self.voxels
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn face(&self, index: usize) -> [u32; 3] {
        self.faces[index]
    }

    /// Returns the three corner positions of a triangle.
    #[inline]
    pub fn face_positions(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.faces[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Index of the first vertex exactly equal to `point`.
    pub fn find_vertex(&self, point: DVec3) -> Option<usize> {
        self.vertices.iter().position(|v| *v == point)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Appends another mesh to this one.
    ///
    /// Attributes of both meshes are dropped.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|f| f.map(|i| i + offset)));
        self.voxels
            .extend(other.voxels.iter().map(|v| v.map(|i| i + offset)));

        self.attributes = Attributes::new();
        self.connectivity = None;
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face and voxel indices are valid
    /// - No degenerate triangles (repeated index or zero area)
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;
        let in_range = |i: &u32| *i < vertex_count;

        if !self.voxels.iter().all(|v| v.iter().all(in_range)) {
            return false;
        }

        self.faces.iter().all(|tri| {
            if !tri.iter().all(in_range) {
                return false;
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }
            let v0 = self.vertex(tri[0]);
            let v1 = self.vertex(tri[1]);
            let v2 = self.vertex(tri[2]);
            (v1 - v0).cross(v2 - v0).length() >= EPSILON
        })
    }

    // -------------------------------------------------------------------------
    // Connectivity
    // -------------------------------------------------------------------------

    /// Builds the vertex adjacency index. Repeated calls are no-ops.
    pub fn enable_connectivity(&mut self) {
        if self.connectivity.is_none() {
            self.connectivity = Some(Connectivity::build(
                self.vertices.len(),
                &self.faces,
                &self.voxels,
            ));
        }
    }

    /// Returns true once `enable_connectivity` has been called.
    pub fn has_connectivity(&self) -> bool {
        self.connectivity.is_some()
    }

    /// Faces using vertex `v`, in ascending order.
    ///
    /// # Errors
    ///
    /// [`MeshError::ConnectivityDisabled`] before `enable_connectivity`.
    pub fn vertex_adjacent_faces(&self, v: usize) -> MeshResult<&[usize]> {
        self.connectivity
            .as_ref()
            .map(|c| c.vertex_faces(v))
            .ok_or(MeshError::ConnectivityDisabled)
    }

    /// Voxels using vertex `v`, in ascending order.
    ///
    /// # Errors
    ///
    /// [`MeshError::ConnectivityDisabled`] before `enable_connectivity`.
    pub fn vertex_adjacent_voxels(&self, v: usize) -> MeshResult<&[usize]> {
        self.connectivity
            .as_ref()
            .map(|c| c.vertex_voxels(v))
            .ok_or(MeshError::ConnectivityDisabled)
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    /// Declares a new attribute parallel to elements of `kind`.
    pub fn add_attribute(&mut self, name: &str, kind: ElementKind) -> MeshResult<()> {
        self.attributes.declare(name, kind)
    }

    /// Writes a declared attribute.
    ///
    /// # Errors
    ///
    /// [`MeshError::UnknownAttribute`] if `name` was never declared and
    /// [`MeshError::AttributeLength`] if `data` is not parallel to the
    /// elements the attribute describes.
    pub fn set_attribute(&mut self, name: &str, data: AttributeData) -> MeshResult<()> {
        let expected = self.element_count(self.attributes.kind(name)?);
        if data.len() != expected {
            return Err(MeshError::AttributeLength {
                name: name.to_string(),
                expected,
                actual: data.len(),
            });
        }
        self.attributes.store(name, data)
    }

    /// Reads a written attribute.
    pub fn attribute(&self, name: &str) -> MeshResult<&AttributeData> {
        self.attributes.get(name)
    }

    /// Reads a written index attribute.
    pub fn index_attribute(&self, name: &str) -> MeshResult<&[usize]> {
        self.attribute(name)?
            .as_indices()
            .ok_or_else(|| MeshError::AttributeKind {
                name: name.to_string(),
                found: "scalar",
            })
    }

    /// Element kind a declared attribute is parallel to.
    pub fn attribute_kind(&self, name: &str) -> MeshResult<ElementKind> {
        self.attributes.kind(name)
    }

    /// Returns true if the attribute is declared.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// Names of all declared attributes.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.names()
    }

    fn topology_changed(&mut self, kind: ElementKind) {
        self.attributes.invalidate(kind);
        self.connectivity = None;
    }
}
