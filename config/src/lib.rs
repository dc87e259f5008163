//! # Config Crate
//!
//! Centralized configuration constants for the electrode imprint pipeline.
//! Tolerances used by the geometry kernel, default electrode geometry and
//! the names of the standard mesh attributes are defined here so that the
//! kernel and the pipeline agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_ELECTRODE_WIDTH, ORIGINAL_VOXEL_INDEX, approx_zero};
//!
//! let half_depth = DEFAULT_ELECTRODE_WIDTH / 4.0;
//! assert!(half_depth > 0.0);
//! assert_eq!(ORIGINAL_VOXEL_INDEX, "ori_voxel_index");
//! assert!(approx_zero(1e-12));
//! ```

pub mod constants;

#[cfg(test)]
mod tests;
