//! # Electrode Errors
//!
//! Error types for electrode placement, imprinting and separation.

use glam::DVec3;
use mesh_kernel::MeshError;
use thiserror::Error;

/// Errors that can occur in the electrode pipeline.
#[derive(Debug, Error)]
pub enum ElectrodeError {
    /// Electrodes were requested before any positioning call
    #[error("Electrodes are not positioned yet; call a positioning function first")]
    NotPositioned,

    /// A direction could not be normalized
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// No surface vertex has exactly these coordinates
    #[error("No surface vertex at {point}")]
    VertexNotFound { point: DVec3 },

    /// Electrode configuration is inconsistent
    #[error("Invalid electrode attributes: {0}")]
    InvalidAttributes(String),

    /// Failure inside the geometry kernel
    #[error(transparent)]
    Kernel(#[from] MeshError),
}

/// Result type alias for electrode operations.
pub type ElectrodeResult<T> = Result<T, ElectrodeError>;
