//! # Configuration Constants
//!
//! Centralized constants for the electrode imprint pipeline.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Electrode**: Default electrode cylinder geometry
//! - **Attributes**: Names of the standard per-element mesh attributes

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Distance under which two vertices are coalesced by duplicate removal.
///
/// Matches the default tolerance of the common mesh-processing libraries
/// used to prepare head models, which weld only numerically identical points.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_MERGE_EPSILON;
///
/// let d = 1e-14_f64;
/// assert!(d < VERTEX_MERGE_EPSILON);
/// ```
pub const VERTEX_MERGE_EPSILON: f64 = 1e-12;

/// Thickness of a plane when classifying points during BSP booleans.
///
/// Points closer than this to a splitting plane are treated as coplanar.
pub const PLANE_EPSILON: f64 = 1e-5;

/// Relative tolerance for triangle/triangle intersection tests.
///
/// Scaled by the length of the longest edge of the pair under test, so that
/// faces that merely touch along an edge or at a vertex are not reported.
pub const INTERSECTION_EPSILON: f64 = 1e-9;

/// Tolerance on unit normals and collinearity when deciding that a vertex
/// sits on a flat patch and can be dissolved.
pub const COPLANAR_EPSILON: f64 = 1e-9;

// =============================================================================
// ELECTRODE CONSTANTS
// =============================================================================

/// Default electrode width (cylinder height) in model units.
///
/// The cylinder extends `width / 4` to either side of the anchor point.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_ELECTRODE_WIDTH;
///
/// let cap_separation = DEFAULT_ELECTRODE_WIDTH / 2.0;
/// assert_eq!(cap_separation, 1.5);
/// ```
pub const DEFAULT_ELECTRODE_WIDTH: f64 = 3.0;

/// Default electrode radius in model units.
pub const DEFAULT_ELECTRODE_RADIUS: f64 = 4.0;

/// Default number of segments of the electrode cross-section.
pub const DEFAULT_ELECTRODE_ELEMENTS: u32 = 150;

/// Minimum number of segments for a cylinder cross-section.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_CYLINDER_SEGMENTS;
///
/// let requested = 2;
/// assert!(requested < MIN_CYLINDER_SEGMENTS);
/// ```
pub const MIN_CYLINDER_SEGMENTS: u32 = 3;

// =============================================================================
// ATTRIBUTE NAMES
// =============================================================================

/// Per-voxel attribute holding the voxel's index in an ancestor mesh.
pub const ORIGINAL_VOXEL_INDEX: &str = "ori_voxel_index";

/// Per-face attribute holding the face's index in an ancestor mesh.
pub const ORIGINAL_FACE_INDEX: &str = "ori_face_index";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
