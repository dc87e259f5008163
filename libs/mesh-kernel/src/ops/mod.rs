//! # Mesh Operations
//!
//! Geometry algorithms over [`Mesh`](crate::Mesh):
//!
//! - `boolean`: BSP union, difference and intersection
//! - `hull`: outer hull of overlapping shells
//! - `query`: nearest face and signed distance
//! - `intersect`: self-intersecting face pairs
//! - `clean`: vertex welding and redundant vertex removal
//! - `submesh`: element extraction with original-index attributes

pub mod boolean;
pub mod clean;
pub mod hull;
pub mod intersect;
pub mod query;
pub mod submesh;
