//! # Tests for Config Constants
//!
//! Unit tests verifying the consistency of configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_plane_epsilon_is_coarser_than_epsilon() {
    assert!(
        PLANE_EPSILON > EPSILON,
        "BSP plane thickness should absorb numerical noise"
    );
}

#[test]
fn test_intersection_epsilon_is_small() {
    assert!(INTERSECTION_EPSILON < 1e-6);
}

#[test]
fn test_coplanar_epsilon_is_finer_than_plane_epsilon() {
    assert!(COPLANAR_EPSILON > 0.0);
    assert!(COPLANAR_EPSILON < PLANE_EPSILON);
}

// =============================================================================
// ELECTRODE TESTS
// =============================================================================

#[test]
fn test_default_electrode_geometry() {
    assert_eq!(DEFAULT_ELECTRODE_WIDTH, 3.0);
    assert_eq!(DEFAULT_ELECTRODE_RADIUS, 4.0);
    assert_eq!(DEFAULT_ELECTRODE_ELEMENTS, 150);
}

#[test]
fn test_default_elements_exceed_minimum() {
    assert!(DEFAULT_ELECTRODE_ELEMENTS >= MIN_CYLINDER_SEGMENTS);
}

// =============================================================================
// ATTRIBUTE NAME TESTS
// =============================================================================

#[test]
fn test_attribute_names_are_distinct() {
    assert_ne!(ORIGINAL_VOXEL_INDEX, ORIGINAL_FACE_INDEX);
}

// =============================================================================
// HELPER TESTS
// =============================================================================

#[test]
fn test_approx_equal() {
    assert!(approx_equal(2.0, 2.0));
    assert!(!approx_equal(2.0, 2.0 + 1e-6));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(-1e-11));
    assert!(!approx_zero(1e-3));
}
