//! # Polygon for BSP Operations
//!
//! Convex planar polygon with splitting support.

use super::plane::{Classification, Plane};
use glam::DVec3;

/// Destination lists for [`Polygon::split`].
#[derive(Debug, Default)]
pub struct SplitResult {
    /// Coplanar, facing the same way as the splitting plane.
    pub coplanar_front: Vec<Polygon>,
    /// Coplanar, facing the opposite way.
    pub coplanar_back: Vec<Polygon>,
    /// Entirely or partly in front.
    pub front: Vec<Polygon>,
    /// Entirely or partly behind.
    pub back: Vec<Polygon>,
}

/// A convex polygon with its supporting plane.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Vertices in counter-clockwise order seen from the front.
    vertices: Vec<DVec3>,
    plane: Plane,
}

impl Polygon {
    /// Creates a polygon; `None` when fewer than three vertices or the first
    /// three are collinear.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    /// Polygon vertices.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Supporting plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Reverses winding and plane in place.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane = self.plane.flip();
    }

    /// Classifies the whole polygon against a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        self.vertices
            .iter()
            .fold(Classification::Coplanar, |acc, v| {
                acc.combine(plane.classify_point(*v))
            })
    }

    /// Splits this polygon by `plane` into `out`.
    pub fn split(self, plane: &Plane, out: &mut SplitResult) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            Classification::Front => out.front.push(self),
            Classification::Back => out.back.push(self),
            Classification::Spanning => {
                let mut front_verts = Vec::with_capacity(self.vertices.len() + 1);
                let mut back_verts = Vec::with_capacity(self.vertices.len() + 1);

                for (i, &vi) in self.vertices.iter().enumerate() {
                    let vj = self.vertices[(i + 1) % self.vertices.len()];
                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }

                    if ti.combine(tj) == Classification::Spanning {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let crossing = vi.lerp(vj, di / (di - dj));
                        front_verts.push(crossing);
                        back_verts.push(crossing);
                    }
                }

                // The pieces keep the parent plane; their leading vertices
                // may be collinear even when the piece itself is not.
                if front_verts.len() >= 3 {
                    out.front.push(Polygon {
                        vertices: front_verts,
                        plane: self.plane,
                    });
                }
                if back_verts.len() >= 3 {
                    out.back.push(Polygon {
                        vertices: back_verts,
                        plane: self.plane,
                    });
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
