//! # Self-Intersection Detection
//!
//! Finds pairs of faces whose interiors intersect.
//!
//! ## Algorithm
//!
//! 1. Broad phase: sweep and prune over face bounding boxes sorted along x.
//! 2. Narrow phase (parallel): triangle/triangle test. Plane sides come from
//!    the exact `orient3d` predicate; distances within a tolerance scaled by
//!    the pair's longest edge count as "on the plane".
//!    - Non-coplanar pairs intersect when each triangle strictly straddles
//!      the other's plane and their crossing segments overlap with positive
//!      length.
//!    - Coplanar pairs intersect when their projections overlap with
//!      positive area, so duplicated faces are reported.
//!
//! Faces that only touch along an edge or at a vertex are not reported.
//! Degenerate faces are ignored.

use crate::Mesh;
use config::constants::INTERSECTION_EPSILON;
use glam::{DVec2, DVec3};
use rayon::prelude::*;
use robust::{orient3d, Coord3D};

/// Pairs `[i, j]` with `i < j` of faces that intersect, sorted.
///
/// # Example
///
/// ```rust
/// use mesh_kernel::ops::intersect::detect_self_intersection;
/// use mesh_kernel::primitives::generate_box;
/// use glam::DVec3;
///
/// let cube = generate_box(DVec3::ZERO, DVec3::ONE);
/// assert!(detect_self_intersection(&cube).is_empty());
/// ```
pub fn detect_self_intersection(mesh: &Mesh) -> Vec<[usize; 2]> {
    let boxes: Vec<(usize, DVec3, DVec3)> = (0..mesh.face_count())
        .filter(|&f| !is_degenerate(mesh, f))
        .map(|f| {
            let [a, b, c] = mesh.face_positions(f);
            (f, a.min(b).min(c), a.max(b).max(c))
        })
        .collect();

    let candidates = sweep_and_prune(boxes);

    let mut pairs: Vec<[usize; 2]> = candidates
        .into_par_iter()
        .filter(|&[i, j]| triangles_intersect(mesh.face_positions(i), mesh.face_positions(j)))
        .collect();
    pairs.sort_unstable();

    if !pairs.is_empty() {
        log::debug!(
            "detected {} self-intersecting face pairs among {} faces",
            pairs.len(),
            mesh.face_count()
        );
    }
    pairs
}

fn is_degenerate(mesh: &Mesh, face: usize) -> bool {
    let [i, j, k] = mesh.face(face);
    if i == j || j == k || i == k {
        return true;
    }
    let [a, b, c] = mesh.face_positions(face);
    let longest = longest_edge(&[a, b, c]);
    (b - a).cross(c - a).length() <= INTERSECTION_EPSILON * longest * longest
}

/// Candidate pairs whose bounding boxes overlap (touching included).
fn sweep_and_prune(mut boxes: Vec<(usize, DVec3, DVec3)>) -> Vec<[usize; 2]> {
    boxes.sort_by(|a, b| a.1.x.total_cmp(&b.1.x).then(a.0.cmp(&b.0)));

    let mut candidates = Vec::new();
    for (n, (fi, min_i, max_i)) in boxes.iter().enumerate() {
        for (fj, min_j, max_j) in &boxes[n + 1..] {
            if min_j.x > max_i.x {
                break;
            }
            let overlaps = min_j.y <= max_i.y
                && min_i.y <= max_j.y
                && min_j.z <= max_i.z
                && min_i.z <= max_j.z;
            if overlaps {
                candidates.push([*fi.min(fj), *fi.max(fj)]);
            }
        }
    }
    candidates
}

fn longest_edge(tri: &[DVec3; 3]) -> f64 {
    tri[0]
        .distance(tri[1])
        .max(tri[1].distance(tri[2]))
        .max(tri[2].distance(tri[0]))
}

fn coord(p: DVec3) -> Coord3D<f64> {
    Coord3D {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

/// Signed distances of `points` to the plane of `tri`; positive on the side
/// the counter-clockwise normal points to.
fn plane_distances(tri: &[DVec3; 3], points: &[DVec3; 3]) -> [f64; 3] {
    let norm = (tri[1] - tri[0]).cross(tri[2] - tri[0]).length();
    (*points).map(|p| -orient3d(coord(tri[0]), coord(tri[1]), coord(tri[2]), coord(p)) / norm)
}

fn snap(distances: [f64; 3], tol: f64) -> [f64; 3] {
    distances.map(|d| if d.abs() <= tol { 0.0 } else { d })
}

fn straddles(d: &[f64; 3]) -> bool {
    d.iter().any(|&x| x > 0.0) && d.iter().any(|&x| x < 0.0)
}

/// Triangle/triangle interior intersection test.
pub fn triangles_intersect(a: [DVec3; 3], b: [DVec3; 3]) -> bool {
    let tol = INTERSECTION_EPSILON * longest_edge(&a).max(longest_edge(&b));

    let db = snap(plane_distances(&a, &b), tol);
    if db.iter().all(|&d| d == 0.0) {
        return coplanar_overlap(&a, &b, tol);
    }
    if !straddles(&db) {
        return false;
    }
    let da = snap(plane_distances(&b, &a), tol);
    if !straddles(&da) {
        return false;
    }

    let na = (a[1] - a[0]).cross(a[2] - a[0]);
    let nb = (b[1] - b[0]).cross(b[2] - b[0]);
    let Some(dir) = na.cross(nb).try_normalize() else {
        return false;
    };

    let (a_min, a_max) = crossing_interval(&a, &da, dir);
    let (b_min, b_max) = crossing_interval(&b, &db, dir);
    a_max.min(b_max) - a_min.max(b_min) > tol
}

/// Extent along `dir` of the segment where `tri` crosses the other plane.
fn crossing_interval(tri: &[DVec3; 3], d: &[f64; 3], dir: DVec3) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut push = |t: f64| {
        lo = lo.min(t);
        hi = hi.max(t);
    };
    for i in 0..3 {
        let j = (i + 1) % 3;
        if d[i] == 0.0 {
            push(dir.dot(tri[i]));
        }
        if d[i] * d[j] < 0.0 {
            let point = tri[i].lerp(tri[j], d[i] / (d[i] - d[j]));
            push(dir.dot(point));
        }
    }
    (lo, hi)
}

/// Separating-axis test in the plane; touching counts as separated.
fn coplanar_overlap(a: &[DVec3; 3], b: &[DVec3; 3], tol: f64) -> bool {
    let n = (a[1] - a[0]).cross(a[2] - a[0]).abs();
    let project = |p: DVec3| {
        if n.x >= n.y && n.x >= n.z {
            DVec2::new(p.y, p.z)
        } else if n.y >= n.z {
            DVec2::new(p.z, p.x)
        } else {
            DVec2::new(p.x, p.y)
        }
    };
    let pa = (*a).map(project);
    let pb = (*b).map(project);

    let axes = pa
        .iter()
        .zip(pa.iter().cycle().skip(1))
        .chain(pb.iter().zip(pb.iter().cycle().skip(1)))
        .filter_map(|(p, q)| (*q - *p).perp().try_normalize());

    for axis in axes {
        let (a_min, a_max) = extent(&pa, axis);
        let (b_min, b_max) = extent(&pb, axis);
        if a_max.min(b_max) - a_min.max(b_min) <= tol {
            return false;
        }
    }
    true
}

fn extent(points: &[DVec2; 3], axis: DVec2) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        let t = axis.dot(*p);
        (lo.min(t), hi.max(t))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::generate_box;

    fn tri(points: [[f64; 3]; 3]) -> [DVec3; 3] {
        points.map(DVec3::from_array)
    }

    #[test]
    fn test_crossing_triangles() {
        let a = tri([[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]]);
        let b = tri([[0.5, 0.5, -1.0], [0.5, 0.5, 1.0], [1.5, -0.5, 0.0]]);
        assert!(triangles_intersect(a, b));
        assert!(triangles_intersect(b, a));
    }

    #[test]
    fn test_separated_triangles() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = tri([[5.0, 5.0, -1.0], [5.0, 5.0, 1.0], [6.0, 5.0, 0.0]]);
        assert!(!triangles_intersect(a, b));
    }

    #[test]
    fn test_shared_edge_not_reported() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!triangles_intersect(a, b));
    }

    #[test]
    fn test_coplanar_adjacent_not_reported() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]);
        let b = tri([[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        assert!(!triangles_intersect(a, b));
    }

    #[test]
    fn test_coplanar_overlap_reported() {
        let a = tri([[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]]);
        let b = tri([[0.5, 0.5, 0.0], [3.0, 0.5, 0.0], [0.5, 3.0, 0.0]]);
        assert!(triangles_intersect(a, b));
    }

    #[test]
    fn test_closed_box_is_clean() {
        let cube = generate_box(DVec3::ZERO, DVec3::ONE);
        assert!(detect_self_intersection(&cube).is_empty());
    }

    #[test]
    fn test_duplicate_face_detected() {
        let mut mesh = generate_box(DVec3::ZERO, DVec3::ONE);
        let [a, b, c] = mesh.face(0);
        mesh.add_face(a, b, c);
        let pairs = detect_self_intersection(&mesh);
        assert_eq!(pairs, vec![[0, 12]]);
    }

    #[test]
    fn test_interpenetrating_boxes() {
        let a = generate_box(DVec3::ZERO, DVec3::ONE);
        let b = generate_box(DVec3::splat(0.5), DVec3::splat(1.5));
        let merged = Mesh::merged([&a, &b]);
        let pairs = detect_self_intersection(&merged);
        assert!(!pairs.is_empty());
        assert!(pairs.iter().all(|[i, j]| i < j && *i < 12 && *j >= 12));
    }

    #[test]
    fn test_degenerate_face_ignored() {
        let mut mesh = generate_box(DVec3::ZERO, DVec3::ONE);
        let v = mesh.add_vertex(DVec3::new(0.5, 0.5, 0.0));
        mesh.add_face(v, v, 0);
        assert!(detect_self_intersection(&mesh).is_empty());
    }
}
