//! # Plane for BSP Operations
//!
//! Oriented plane with point classification.

use config::constants::PLANE_EPSILON;
use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// On the plane (within `PLANE_EPSILON`).
    Coplanar,
    /// Positive side.
    Front,
    /// Negative side.
    Back,
    /// Vertices on both sides (polygons only).
    Spanning,
}

impl Classification {
    /// Combines the classifications of two parts of the same polygon.
    pub fn combine(self, other: Classification) -> Classification {
        use Classification::*;
        match (self, other) {
            (Coplanar, c) | (c, Coplanar) => c,
            (Front, Front) => Front,
            (Back, Back) => Back,
            _ => Spanning,
        }
    }
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane `normal · p = w` with unit normal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    normal: DVec3,
    w: f64,
}

impl Plane {
    /// Creates a plane from a unit normal and its offset.
    #[cfg(test)]
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Plane through three points, counter-clockwise seen from the front.
    ///
    /// Returns `None` for collinear points.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a).try_normalize()?;
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    /// Unit normal.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Offset from the origin along the normal.
    #[cfg(test)]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Same plane facing the other way.
    pub fn flip(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance; positive in front.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    /// Classifies a point.
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > PLANE_EPSILON {
            Classification::Front
        } else if dist < -PLANE_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
