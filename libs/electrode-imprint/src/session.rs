//! # Electrode Session
//!
//! Stateful wrapper tying one surface and one configuration to the placement
//! and imprint functions.
//!
//! ## Example
//!
//! ```rust
//! use electrode_imprint::{ElectrodeAttributes, ElectrodeOperations};
//! use mesh_kernel::primitives::generate_box;
//! use glam::DVec3;
//!
//! let surface = generate_box(DVec3::splat(-10.0), DVec3::splat(10.0));
//! let mut attrs = ElectrodeAttributes::with_points(["Cz"], [DVec3::new(-9.0, -9.5, 11.0)]);
//! attrs.elements = 8;
//!
//! let mut session = ElectrodeOperations::new(surface, attrs);
//! assert!(session.electrode_array().is_err());
//! session.standard_electrode_positioning().unwrap();
//! assert_eq!(session.electrode_array().unwrap().len(), 1);
//! ```

use crate::attributes::ElectrodeAttributes;
use crate::error::{ElectrodeError, ElectrodeResult};
use crate::imprint::{imprint, Imprint};
use crate::placement::{place_on_points, place_on_sphere, ElectrodeArray};
use mesh_kernel::{BspKernel, GeometryKernel, Mesh};

/// Electrode placement and imprinting on one surface.
#[derive(Debug, Clone)]
pub struct ElectrodeOperations<K: GeometryKernel = BspKernel> {
    kernel: K,
    surface: Mesh,
    attributes: ElectrodeAttributes,
    electrode_array: ElectrodeArray,
}

impl ElectrodeOperations<BspKernel> {
    /// Creates a session with the built-in kernel.
    pub fn new(surface: Mesh, attributes: ElectrodeAttributes) -> Self {
        Self::with_kernel(BspKernel, surface, attributes)
    }
}

impl<K: GeometryKernel> ElectrodeOperations<K> {
    /// Creates a session; enables connectivity on `surface`.
    pub fn with_kernel(kernel: K, mut surface: Mesh, attributes: ElectrodeAttributes) -> Self {
        surface.enable_connectivity();
        log::info!(
            "electrode session on a surface with {} vertices and {} faces",
            surface.vertex_count(),
            surface.face_count()
        );
        Self {
            kernel,
            surface,
            attributes,
            electrode_array: ElectrodeArray::new(),
        }
    }

    pub fn surface(&self) -> &Mesh {
        &self.surface
    }

    pub fn attributes(&self) -> &ElectrodeAttributes {
        &self.attributes
    }

    /// Places electrodes at the configured point targets.
    pub fn standard_electrode_positioning(&mut self) -> ElectrodeResult<()> {
        let placed = place_on_points(&self.kernel, &self.surface, &self.attributes)?;
        log::info!("positioned {} electrodes on point targets", placed.len());
        self.electrode_array.extend(placed);
        Ok(())
    }

    /// Places electrodes at the configured angular targets.
    pub fn sphere_electrode_positioning(&mut self) -> ElectrodeResult<()> {
        let placed = place_on_sphere(&self.kernel, &self.surface, &self.attributes)?;
        log::info!("positioned {} electrodes on angular targets", placed.len());
        self.electrode_array.extend(placed);
        Ok(())
    }

    /// Placed electrodes.
    ///
    /// # Errors
    ///
    /// [`ElectrodeError::NotPositioned`] before any placement.
    pub fn electrode_array(&self) -> ElectrodeResult<&ElectrodeArray> {
        if self.electrode_array.is_empty() {
            return Err(ElectrodeError::NotPositioned);
        }
        Ok(&self.electrode_array)
    }

    /// All electrode solids as one mesh.
    pub fn electrode_single_mesh(&self) -> ElectrodeResult<Mesh> {
        Ok(self.electrode_array()?.single_mesh())
    }

    /// Imprints every placed electrode into the surface.
    pub fn add_electrodes_on_skin(&self) -> ElectrodeResult<Imprint> {
        let electrodes = self.electrode_single_mesh()?;
        let result = imprint(&self.kernel, &self.surface, &electrodes)?;
        log::info!(
            "imprinted {} electrodes; conditioned surface has {} faces",
            self.electrode_array.len(),
            result.conditioned.face_count()
        );
        Ok(result)
    }
}
