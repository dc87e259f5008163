//! # Electrode Attributes
//!
//! Runtime configuration of electrode geometry and targets, loadable from
//! any serde format. Missing fields take their defaults.
//!
//! ```rust
//! use electrode_imprint::ElectrodeAttributes;
//!
//! let attrs = ElectrodeAttributes::default();
//! assert_eq!(attrs.width, 3.0);
//! assert_eq!(attrs.radius, 4.0);
//! assert_eq!(attrs.elements, 150);
//! ```

use crate::error::{ElectrodeError, ElectrodeResult};
use config::constants::{
    DEFAULT_ELECTRODE_ELEMENTS, DEFAULT_ELECTRODE_RADIUS, DEFAULT_ELECTRODE_WIDTH,
};
use glam::DVec3;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Angular target on a sphere, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SphericalPosition {
    /// Azimuth in the xy-plane, from +x towards +y.
    pub theta: f64,
    /// Elevation above the xy-plane.
    #[serde(default)]
    pub phi: f64,
}

/// Electrode geometry and targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectrodeAttributes {
    /// Cylinder height for point targets.
    pub width: f64,
    /// Cylinder radius for point targets.
    pub radius: f64,
    /// Segments around the cylinder.
    pub elements: u32,
    /// Electrode names, parallel to `coordinates`.
    pub names: Vec<String>,
    /// Target points near the surface.
    pub coordinates: Vec<DVec3>,
    /// Cylinder height for angular targets.
    pub cylinder_width: f64,
    /// Cylinder radius for angular targets.
    pub cylinder_radius: f64,
    /// Sphere radius for angular targets; the largest surface x coordinate
    /// when absent.
    pub skin_radius: Option<f64>,
    /// Angular targets by electrode name, in placement order.
    pub electrodes: IndexMap<String, SphericalPosition>,
}

impl Default for ElectrodeAttributes {
    fn default() -> Self {
        Self {
            width: DEFAULT_ELECTRODE_WIDTH,
            radius: DEFAULT_ELECTRODE_RADIUS,
            elements: DEFAULT_ELECTRODE_ELEMENTS,
            names: Vec::new(),
            coordinates: Vec::new(),
            cylinder_width: DEFAULT_ELECTRODE_WIDTH,
            cylinder_radius: DEFAULT_ELECTRODE_RADIUS,
            skin_radius: None,
            electrodes: IndexMap::new(),
        }
    }
}

impl ElectrodeAttributes {
    /// Point-target configuration with default geometry.
    pub fn with_points(
        names: impl IntoIterator<Item = impl Into<String>>,
        coordinates: impl IntoIterator<Item = DVec3>,
    ) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            coordinates: coordinates.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Checks that every point target has a name.
    pub fn validate_points(&self) -> ElectrodeResult<()> {
        if self.names.len() != self.coordinates.len() {
            return Err(ElectrodeError::InvalidAttributes(format!(
                "{} electrode names but {} coordinates",
                self.names.len(),
                self.coordinates.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_points_mismatch() {
        let attrs = ElectrodeAttributes::with_points(["Fz", "Cz"], [DVec3::ZERO]);
        assert!(matches!(
            attrs.validate_points(),
            Err(ElectrodeError::InvalidAttributes(_))
        ));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "names": ["Fz"],
            "coordinates": [[1.0, 2.0, 3.0]],
            "electrodes": {
                "T8": {"theta": 0.0},
                "Cz": {"theta": 0.0, "phi": 90.0},
                "T7": {"theta": 180.0}
            }
        }"#;
        let attrs: ElectrodeAttributes = serde_json::from_str(json).unwrap();

        assert_eq!(attrs.width, DEFAULT_ELECTRODE_WIDTH);
        assert_eq!(attrs.coordinates, vec![DVec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(attrs.skin_radius, None);
        let order: Vec<&str> = attrs.electrodes.keys().map(String::as_str).collect();
        assert_eq!(order, ["T8", "Cz", "T7"]);
        assert_eq!(attrs.electrodes["Cz"].phi, 90.0);
        assert_eq!(attrs.electrodes["T8"].phi, 0.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut attrs = ElectrodeAttributes::with_points(["Fz"], [DVec3::Z]);
        attrs.skin_radius = Some(90.0);
        let json = serde_json::to_string(&attrs).unwrap();
        let back: ElectrodeAttributes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attrs);
    }
}
