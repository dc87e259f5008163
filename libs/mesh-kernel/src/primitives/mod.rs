//! # Primitives
//!
//! Closed solids used as electrodes and as test fixtures.

pub mod cube;
pub mod cylinder;

pub use cube::generate_box;
pub use cylinder::generate_cylinder;
