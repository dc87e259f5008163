//! Tests for BSP boolean operations.

use super::*;
use crate::primitives::generate_box;
use approx::assert_relative_eq;
use glam::DVec3;

/// Signed volume by the divergence theorem; positive for outward winding.
fn volume(mesh: &Mesh) -> f64 {
    (0..mesh.face_count())
        .map(|f| {
            let [a, b, c] = mesh.face_positions(f);
            a.dot(b.cross(c)) / 6.0
        })
        .sum()
}

fn cube(size: f64, center: DVec3) -> Mesh {
    let h = DVec3::splat(size / 2.0);
    generate_box(center - h, center + h)
}

#[test]
fn test_union_non_overlapping() {
    let a = cube(2.0, DVec3::new(-2.0, 0.0, 0.0));
    let b = cube(2.0, DVec3::new(2.0, 0.0, 0.0));

    let result = union(&a, &b);
    assert_relative_eq!(volume(&result), 16.0, epsilon = 1e-6);
}

#[test]
fn test_union_overlapping() {
    let a = cube(2.0, DVec3::ZERO);
    let b = cube(2.0, DVec3::new(1.0, 0.0, 0.0));

    let result = union(&a, &b);
    assert_relative_eq!(volume(&result), 12.0, epsilon = 1e-6);
    let (min, max) = result.bounding_box();
    assert_relative_eq!(min.x, -1.0, epsilon = 1e-9);
    assert_relative_eq!(max.x, 2.0, epsilon = 1e-9);
}

#[test]
fn test_union_with_empty() {
    let a = cube(2.0, DVec3::ZERO);
    let result = union(&a, &Mesh::new());
    assert_eq!(result.face_count(), 12);
}

#[test]
fn test_difference_overlapping() {
    let a = cube(2.0, DVec3::ZERO);
    let b = cube(2.0, DVec3::new(1.0, 0.0, 0.0));

    let result = difference(&a, &b);
    assert_relative_eq!(volume(&result), 4.0, epsilon = 1e-6);
    let (_, max) = result.bounding_box();
    assert_relative_eq!(max.x, 0.0, epsilon = 1e-9);
}

#[test]
fn test_difference_hollow() {
    let a = cube(4.0, DVec3::ZERO);
    let b = cube(2.0, DVec3::ZERO);

    let result = difference(&a, &b);
    assert_relative_eq!(volume(&result), 56.0, epsilon = 1e-6);
}

#[test]
fn test_difference_non_overlapping() {
    let a = cube(2.0, DVec3::new(-2.0, 0.0, 0.0));
    let b = cube(2.0, DVec3::new(2.0, 0.0, 0.0));

    let result = difference(&a, &b);
    assert_relative_eq!(volume(&result), 8.0, epsilon = 1e-6);
}

#[test]
fn test_difference_of_empty() {
    let b = cube(2.0, DVec3::ZERO);
    assert!(difference(&Mesh::new(), &b).is_empty());
}

#[test]
fn test_intersection_overlapping() {
    let a = cube(2.0, DVec3::ZERO);
    let b = cube(2.0, DVec3::new(1.0, 0.0, 0.0));

    let result = intersection(&a, &b);
    assert_relative_eq!(volume(&result), 4.0, epsilon = 1e-6);
}

#[test]
fn test_intersection_non_overlapping() {
    let a = cube(2.0, DVec3::new(-2.0, 0.0, 0.0));
    let b = cube(2.0, DVec3::new(2.0, 0.0, 0.0));

    let result = intersection(&a, &b);
    assert_eq!(result.face_count(), 0);
}

#[test]
fn test_boolean_dispatch() {
    let a = cube(2.0, DVec3::ZERO);
    let b = cube(2.0, DVec3::new(1.0, 0.0, 0.0));
    let via_op = boolean(BooleanOp::Difference, &a, &b);
    assert_relative_eq!(volume(&via_op), volume(&difference(&a, &b)), epsilon = 1e-9);
}
