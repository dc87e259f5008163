//! # Mesh Attributes
//!
//! Typed per-element side-table attached to a [`Mesh`](crate::Mesh).
//!
//! Every attribute is declared first with the kind of element it describes
//! and written afterwards with a sequence parallel to those elements:
//!
//! ```rust
//! use mesh_kernel::{AttributeData, ElementKind, Mesh};
//! use glam::DVec3;
//!
//! let mut mesh = Mesh::new();
//! mesh.add_vertex(DVec3::ZERO);
//! mesh.add_vertex(DVec3::X);
//! mesh.add_vertex(DVec3::Y);
//! mesh.add_face(0, 1, 2);
//!
//! mesh.add_attribute("ori_face_index", ElementKind::Face).unwrap();
//! mesh.set_attribute("ori_face_index", AttributeData::Indices(vec![7])).unwrap();
//! assert_eq!(mesh.index_attribute("ori_face_index").unwrap(), &[7]);
//! ```

use crate::error::{MeshError, MeshResult};
use std::collections::BTreeMap;

/// The kind of mesh element an attribute is parallel to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// One value per vertex.
    Vertex,
    /// One value per triangle.
    Face,
    /// One value per tetrahedron.
    Voxel,
}

/// Values of a single attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeData {
    /// Element indices into some other mesh.
    Indices(Vec<usize>),
    /// Real-valued data.
    Scalars(Vec<f64>),
}

impl AttributeData {
    /// Number of values stored.
    pub fn len(&self) -> usize {
        match self {
            Self::Indices(values) => values.len(),
            Self::Scalars(values) => values.len(),
        }
    }

    /// Returns true if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the index values, if this is an index attribute.
    pub fn as_indices(&self) -> Option<&[usize]> {
        match self {
            Self::Indices(values) => Some(values),
            Self::Scalars(_) => None,
        }
    }

    /// Returns the scalar values, if this is a scalar attribute.
    pub fn as_scalars(&self) -> Option<&[f64]> {
        match self {
            Self::Scalars(values) => Some(values),
            Self::Indices(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    kind: ElementKind,
    data: Option<AttributeData>,
}

/// Named attribute table. Lengths are checked by the owning mesh.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: BTreeMap<String, Entry>,
}

impl Attributes {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new attribute.
    pub fn declare(&mut self, name: &str, kind: ElementKind) -> MeshResult<()> {
        if self.entries.contains_key(name) {
            return Err(MeshError::AttributeExists {
                name: name.to_string(),
            });
        }
        self.entries
            .insert(name.to_string(), Entry { kind, data: None });
        Ok(())
    }

    /// Element kind of a declared attribute.
    pub fn kind(&self, name: &str) -> MeshResult<ElementKind> {
        self.entries
            .get(name)
            .map(|entry| entry.kind)
            .ok_or_else(|| MeshError::unknown_attribute(name))
    }

    /// Stores values for a declared attribute. The caller checks the length.
    pub(crate) fn store(&mut self, name: &str, data: AttributeData) -> MeshResult<()> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| MeshError::unknown_attribute(name))?;
        entry.data = Some(data);
        Ok(())
    }

    /// Returns the values of a declared and written attribute.
    pub fn get(&self, name: &str) -> MeshResult<&AttributeData> {
        self.entries
            .get(name)
            .and_then(|entry| entry.data.as_ref())
            .ok_or_else(|| MeshError::unknown_attribute(name))
    }

    /// Returns true if the attribute is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names of all declared attributes, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Drops every attribute describing elements of `kind`.
    pub(crate) fn invalidate(&mut self, kind: ElementKind) {
        self.entries.retain(|_, entry| entry.kind != kind);
    }
}
