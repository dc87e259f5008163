//! # Mesh Kernel
//!
//! Triangle / tetrahedral meshes and the geometry operations the electrode
//! pipeline is built on.
//!
//! ## Architecture
//!
//! ```text
//! Mesh (+ attributes, connectivity) → GeometryKernel → new Mesh
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust:
//! - **Boolean Operations**: BSP trees (csg.js algorithm)
//! - **Outer Hull**: component-wise BSP union
//! - **Distance Queries**: parallel brute force, ray-cast inside test
//! - **Self-Intersection**: sweep and prune + exact plane predicates
//! - **Primitives**: box, cylinder along an arbitrary axis
//!
//! ## Usage
//!
//! ```rust
//! use mesh_kernel::{BooleanOp, BspKernel, GeometryKernel};
//! use mesh_kernel::primitives::generate_box;
//! use glam::DVec3;
//!
//! let kernel = BspKernel;
//! let a = generate_box(DVec3::ZERO, DVec3::ONE);
//! let b = generate_box(DVec3::splat(0.5), DVec3::splat(1.5));
//! let joined = kernel.boolean(&a, &b, BooleanOp::Union).unwrap();
//! assert!(joined.face_count() > 0);
//! ```

pub mod attributes;
pub mod connectivity;
pub mod error;
pub mod kernel;
pub mod mesh;
pub mod ops;
pub mod primitives;

pub use attributes::{AttributeData, ElementKind};
pub use error::{MeshError, MeshResult};
pub use kernel::{BspKernel, GeometryKernel};
pub use mesh::Mesh;
pub use ops::boolean::BooleanOp;
pub use ops::query::PointQuery;
