//! # Mesh Errors
//!
//! Error types for mesh kernel operations.

use thiserror::Error;

/// Errors that can occur during mesh kernel operations.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Invalid mesh topology (e.g. an index out of range)
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Boolean operation failed
    #[error("Boolean operation failed: {message}")]
    BooleanFailed { message: String },

    /// Adjacency was queried before `enable_connectivity`
    #[error("Connectivity is not enabled on this mesh")]
    ConnectivityDisabled,

    /// Attribute was read or written without being declared
    #[error("Unknown attribute: {name}")]
    UnknownAttribute { name: String },

    /// Attribute was declared twice
    #[error("Attribute already declared: {name}")]
    AttributeExists { name: String },

    /// Attribute data does not match the element count
    #[error("Attribute '{name}' expects {expected} values, got {actual}")]
    AttributeLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Attribute data has the wrong value kind
    #[error("Attribute '{name}' holds {found} values")]
    AttributeKind { name: String, found: &'static str },

    /// Element index out of range
    #[error("Index {index} out of range (len: {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl MeshError {
    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            message: message.into(),
        }
    }

    /// Creates an unknown attribute error.
    pub fn unknown_attribute(name: impl Into<String>) -> Self {
        Self::UnknownAttribute { name: name.into() }
    }
}

/// Result type alias for mesh kernel operations.
pub type MeshResult<T> = Result<T, MeshError>;
