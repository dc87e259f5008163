//! # Electrode Placer
//!
//! Builds electrode cylinders at surface targets.
//!
//! ## Modes
//!
//! - **Point targets**: each target snaps to the first vertex of its nearest
//!   surface face; the axis follows the adjacent face normal.
//! - **Angular targets**: each target sits on a sphere; the axis comes from
//!   the nearest face edge crossed with the vertical.
//!
//! Either way the cylinder spans `width / 2` centered on the anchor.

use crate::attributes::ElectrodeAttributes;
use crate::error::{ElectrodeError, ElectrodeResult};
use crate::orientation::{orient_from_adjacency, orient_from_signed_distance};
use glam::DVec3;
use indexmap::IndexMap;
use mesh_kernel::{GeometryKernel, Mesh, MeshError};
use serde::{Deserialize, Serialize};

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// Axis-aligned region of interest around an electrode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl BoundingBox {
    /// Box spanning two corners.
    pub fn from_corners(min: DVec3, max: DVec3) -> Self {
        Self {
            x_min: min.x,
            x_max: max.x,
            y_min: min.y,
            y_max: max.y,
            z_min: min.z,
            z_max: max.z,
        }
    }

    /// Exact vertex extent of a mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let (min, max) = mesh.bounding_box();
        Self::from_corners(min, max)
    }

    /// Minimum corner.
    pub fn min(&self) -> DVec3 {
        DVec3::new(self.x_min, self.y_min, self.z_min)
    }

    /// Maximum corner.
    pub fn max(&self) -> DVec3 {
        DVec3::new(self.x_max, self.y_max, self.z_max)
    }

    /// Inclusive on every face of the box.
    pub fn contains(&self, point: DVec3) -> bool {
        (self.x_min..=self.x_max).contains(&point.x)
            && (self.y_min..=self.y_max).contains(&point.y)
            && (self.z_min..=self.z_max).contains(&point.z)
    }
}

// =============================================================================
// ELECTRODE ARRAY
// =============================================================================

/// One placed electrode.
#[derive(Debug, Clone)]
pub struct ElectrodeRecord {
    /// Closed cylinder.
    pub mesh: Mesh,
    /// Exact extent of `mesh`.
    pub dom_roi: BoundingBox,
}

impl ElectrodeRecord {
    /// Wraps a solid and computes its box.
    pub fn new(mesh: Mesh) -> Self {
        let dom_roi = BoundingBox::from_mesh(&mesh);
        Self { mesh, dom_roi }
    }
}

/// Electrodes by unique name, in insertion order.
///
/// Inserting an existing name replaces the record in place.
#[derive(Debug, Clone, Default)]
pub struct ElectrodeArray {
    records: IndexMap<String, ElectrodeRecord>,
}

impl ElectrodeArray {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an electrode.
    pub fn insert(&mut self, name: impl Into<String>, record: ElectrodeRecord) {
        self.records.insert(name.into(), record);
    }

    /// Moves every electrode of `other` into this array.
    pub fn extend(&mut self, other: ElectrodeArray) {
        self.records.extend(other.records);
    }

    pub fn get(&self, name: &str) -> Option<&ElectrodeRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Electrode names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// `(name, record)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElectrodeRecord)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Boxes in array order, ready for [`separate_many`](crate::separate_many).
    pub fn bounding_boxes(&self) -> Vec<BoundingBox> {
        self.records.values().map(|r| r.dom_roi).collect()
    }

    /// Concatenation of every electrode solid in array order.
    pub fn single_mesh(&self) -> Mesh {
        Mesh::merged(self.records.values().map(|r| &r.mesh))
    }
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// Point on a sphere of `radius` at azimuth `theta` and elevation `phi`
/// (degrees).
///
/// # Example
///
/// ```rust
/// use electrode_imprint::electrode_position_sphere;
///
/// let p = electrode_position_sphere(2.0, 0.0, 0.0);
/// assert_eq!(p.x, 2.0);
/// ```
pub fn electrode_position_sphere(radius: f64, theta: f64, phi: f64) -> DVec3 {
    let (theta, phi) = (theta.to_radians(), phi.to_radians());
    DVec3::new(
        radius * phi.cos() * theta.cos(),
        radius * phi.cos() * theta.sin(),
        radius * phi.sin(),
    )
}

/// Cylinder of height `width / 2` centered on `anchor` along `axis`.
pub fn electrode_cylinder<K: GeometryKernel + ?Sized>(
    kernel: &K,
    anchor: DVec3,
    axis: DVec3,
    width: f64,
    radius: f64,
    elements: u32,
) -> ElectrodeResult<Mesh> {
    let offset = width * axis / 4.0;
    Ok(kernel.generate_cylinder(anchor - offset, anchor + offset, radius, radius, elements)?)
}

/// Places one electrode per named point target.
///
/// The surface needs connectivity enabled.
pub fn place_on_points<K: GeometryKernel + ?Sized>(
    kernel: &K,
    surface: &Mesh,
    attributes: &ElectrodeAttributes,
) -> ElectrodeResult<ElectrodeArray> {
    attributes.validate_points()?;
    let mut array = ElectrodeArray::new();
    if attributes.names.is_empty() {
        return Ok(array);
    }

    let nearest = kernel.distance_to_mesh(surface, &attributes.coordinates)?;
    for (name, query) in attributes.names.iter().zip(&nearest) {
        let [first, _, _] = surface.faces().get(query.face).copied().ok_or(
            MeshError::IndexOutOfRange {
                index: query.face,
                len: surface.face_count(),
            },
        )?;
        let anchor = surface.vertex(first);
        let axis = orient_from_adjacency(surface, anchor)?;
        let mesh = electrode_cylinder(
            kernel,
            anchor,
            axis,
            attributes.width,
            attributes.radius,
            attributes.elements,
        )?;
        log::debug!("placed electrode {name} at {anchor} along {axis}");
        array.insert(name.clone(), ElectrodeRecord::new(mesh));
    }

    Ok(array)
}

/// Places one electrode per angular target.
pub fn place_on_sphere<K: GeometryKernel + ?Sized>(
    kernel: &K,
    surface: &Mesh,
    attributes: &ElectrodeAttributes,
) -> ElectrodeResult<ElectrodeArray> {
    let skin_radius = match attributes.skin_radius {
        Some(radius) => radius,
        None => skin_radius_of(surface)?,
    };
    let delta = DVec3::new(0.0, 0.0, -attributes.cylinder_width);

    let mut array = ElectrodeArray::new();
    for (name, target) in &attributes.electrodes {
        let anchor = electrode_position_sphere(skin_radius, target.theta, target.phi);
        let axis = orient_from_signed_distance(kernel, surface, anchor, delta)?;
        let mesh = electrode_cylinder(
            kernel,
            anchor,
            axis,
            attributes.cylinder_width,
            attributes.cylinder_radius,
            attributes.elements,
        )?;
        log::debug!(
            "placed electrode {name} at theta={} phi={} along {axis}",
            target.theta,
            target.phi
        );
        array.insert(name.clone(), ElectrodeRecord::new(mesh));
    }

    Ok(array)
}

/// Largest x coordinate of the surface.
fn skin_radius_of(surface: &Mesh) -> ElectrodeResult<f64> {
    surface
        .vertices()
        .iter()
        .map(|v| v.x)
        .reduce(f64::max)
        .ok_or_else(|| ElectrodeError::DegenerateGeometry("surface has no vertices".into()))
}
