//! # Point Queries
//!
//! Nearest face, closest point and signed distance of query points against a
//! triangle mesh. Points are processed in parallel; each one scans every face,
//! so results do not depend on the thread count.

use crate::error::{MeshError, MeshResult};
use crate::Mesh;
use glam::DVec3;
use rayon::prelude::*;

/// Minimum ray parameter counted as a hit.
const RAY_EPSILON: f64 = 1e-12;

/// Result of a nearest-face query for one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointQuery {
    /// Squared distance to the closest point. Negative inside a closed mesh
    /// for signed queries.
    pub squared_distance: f64,
    /// Index of the nearest face; the lowest index wins ties.
    pub face: usize,
    /// Closest point on that face.
    pub closest_point: DVec3,
}

impl PointQuery {
    /// Unsigned distance.
    pub fn distance(&self) -> f64 {
        self.squared_distance.abs().sqrt()
    }
}

/// Nearest face and closest point for every query point.
///
/// # Errors
///
/// [`MeshError::DegenerateGeometry`] if the mesh has no faces.
pub fn distance_to_mesh(mesh: &Mesh, points: &[DVec3]) -> MeshResult<Vec<PointQuery>> {
    if mesh.face_count() == 0 {
        return Err(MeshError::degenerate("distance query against a mesh without faces"));
    }
    Ok(points.par_iter().map(|p| nearest_face(mesh, *p)).collect())
}

/// Like [`distance_to_mesh`], with the distance negated for points inside the
/// mesh.
///
/// Inside/outside is decided by majority vote over rays cast along the six
/// axis directions, which tolerates rays grazing edges and small gaps.
pub fn signed_distance_to_mesh(mesh: &Mesh, points: &[DVec3]) -> MeshResult<Vec<PointQuery>> {
    let mut queries = distance_to_mesh(mesh, points)?;
    queries
        .par_iter_mut()
        .zip(points.par_iter())
        .for_each(|(query, point)| {
            if point_inside(mesh, *point) {
                query.squared_distance = -query.squared_distance;
            }
        });
    Ok(queries)
}

/// Ray-casting inside test with 6-direction majority voting.
pub fn point_inside(mesh: &Mesh, point: DVec3) -> bool {
    const DIRS: [DVec3; 6] = [
        DVec3::X,
        DVec3::NEG_X,
        DVec3::Y,
        DVec3::NEG_Y,
        DVec3::Z,
        DVec3::NEG_Z,
    ];

    let inside_votes = DIRS
        .iter()
        .filter(|dir| count_ray_intersections(mesh, point, **dir) % 2 == 1)
        .count();

    inside_votes >= 3
}

fn nearest_face(mesh: &Mesh, point: DVec3) -> PointQuery {
    let mut best = PointQuery {
        squared_distance: f64::INFINITY,
        face: 0,
        closest_point: DVec3::ZERO,
    };
    for face in 0..mesh.face_count() {
        let [a, b, c] = mesh.face_positions(face);
        let closest = closest_point_on_triangle(point, a, b, c);
        let d2 = point.distance_squared(closest);
        if d2 < best.squared_distance {
            best = PointQuery {
                squared_distance: d2,
                face,
                closest_point: closest,
            };
        }
    }
    best
}

fn count_ray_intersections(mesh: &Mesh, origin: DVec3, dir: DVec3) -> usize {
    (0..mesh.face_count())
        .filter(|&f| {
            let [a, b, c] = mesh.face_positions(f);
            ray_triangle_intersect(origin, dir, a, b, c)
        })
        .count()
}

/// Möller–Trumbore ray/triangle test, positive direction only.
pub fn ray_triangle_intersect(origin: DVec3, dir: DVec3, v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = dir.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < RAY_EPSILON {
        return false;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    f * edge2.dot(q) > RAY_EPSILON
}

/// Closest point on triangle `abc` to `p` by Voronoi region classification.
pub fn closest_point_on_triangle(p: DVec3, a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let denom = d1 - d3;
        return if denom > 0.0 { a + ab * (d1 / denom) } else { a };
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let denom = d2 - d6;
        return if denom > 0.0 { a + ac * (d2 / denom) } else { a };
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let denom = (d4 - d3) + (d5 - d6);
        return if denom > 0.0 { b + (c - b) * ((d4 - d3) / denom) } else { b };
    }

    let denom = va + vb + vc;
    if denom.abs() < f64::MIN_POSITIVE {
        return a;
    }
    let v = vb / denom;
    let w = vc / denom;
    a + ab * v + ac * w
}
