//! # Electrode Imprint
//!
//! Places electrode cylinders on a scanned surface, imprints them into it,
//! and separates a meshed model back into per-electrode domains.
//!
//! ## Architecture
//!
//! ```text
//! ElectrodeAttributes → placement → ElectrodeArray → imprint → conditioned surface
//!                                        │
//!                          bounding boxes + meshed model → separate → per-electrode meshes
//! ```
//!
//! Every geometric operation goes through a [`GeometryKernel`](mesh_kernel::GeometryKernel);
//! [`ElectrodeOperations`] defaults to [`BspKernel`](mesh_kernel::BspKernel).
//!
//! ## Usage
//!
//! ```rust
//! use electrode_imprint::{imprint, place_on_points, ElectrodeAttributes};
//! use mesh_kernel::primitives::generate_box;
//! use mesh_kernel::BspKernel;
//! use glam::DVec3;
//!
//! let mut surface = generate_box(DVec3::splat(-10.0), DVec3::splat(10.0));
//! surface.enable_connectivity();
//!
//! let mut attrs = ElectrodeAttributes::with_points(["Cz"], [DVec3::new(-9.0, -9.5, 11.0)]);
//! attrs.elements = 8;
//! let array = place_on_points(&BspKernel, &surface, &attrs).unwrap();
//! let result = imprint(&BspKernel, &surface, &array.single_mesh()).unwrap();
//! assert!(result.conditioned.face_count() > 0);
//! ```

pub mod attributes;
pub mod error;
pub mod imprint;
pub mod orientation;
pub mod placement;
pub mod separate;
pub mod session;

pub use attributes::{ElectrodeAttributes, SphericalPosition};
pub use error::{ElectrodeError, ElectrodeResult};
pub use imprint::{imprint, Imprint};
pub use orientation::{orient_from_adjacency, orient_from_signed_distance};
pub use placement::{
    electrode_cylinder, electrode_position_sphere, place_on_points, place_on_sphere, BoundingBox,
    ElectrodeArray, ElectrodeRecord,
};
pub use separate::{separate_many, separate_one, ModelDomains, SeparatedModel, Separation};
pub use session::ElectrodeOperations;
