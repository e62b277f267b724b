//! # Configuration Constants
//!
//! Centralized constants for the layer meshing pipeline. All discretization
//! parameters, precision values and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Point, area and snapping tolerances
//! - **Discretization**: Default arc parameters (segments, chord lengths)
//! - **Limits**: Maximum values for safety bounds

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Relative tolerance when checking that a triangulated cap covers its
/// outline.
///
/// The cap area may differ from the outline's shoelace area by this
/// fraction of the outline area (or of one square unit for tiny outlines).
///
/// # Example
///
/// ```rust
/// use config::constants::AREA_TOLERANCE;
///
/// let expected: f64 = 100.0;
/// let covered = 100.0 - 1e-12;
/// assert!((covered - expected).abs() <= AREA_TOLERANCE * expected.max(1.0));
/// ```
pub const AREA_TOLERANCE: f64 = 1e-9;

/// Relative distance, scaled by the extent of the merged outlines, within
/// which a point produced by merging overlapping outlines is matched back to
/// an existing vertex.
pub const SNAP_TOLERANCE: f64 = 1e-7;

/// Twice a triangle's area over its squared longest edge, at or below which
/// the triangle counts as a sliver and is flipped away where possible.
///
/// # Example
///
/// ```rust
/// use config::constants::SLIVER_RATIO;
///
/// // A 1 x 1e-14 triangle is flat for all practical purposes
/// let twice_area = 1.0 * 1e-14;
/// assert!(twice_area <= SLIVER_RATIO * 1.0);
/// ```
pub const SLIVER_RATIO: f64 = 1e-12;

/// Distance below which two consecutive contour points are considered the
/// same point.
///
/// Pushing a vertex closer than this to its predecessor is rejected so that
/// no zero-length edge ever reaches the triangulator.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_EPSILON;
///
/// fn coincident(a: [f64; 2], b: [f64; 2]) -> bool {
///     let dx = a[0] - b[0];
///     let dy = a[1] - b[1];
///     (dx * dx + dy * dy).sqrt() < VERTEX_EPSILON
/// }
///
/// assert!(coincident([1.0, 1.0], [1.0, 1.0 + 1e-9]));
/// ```
pub const VERTEX_EPSILON: f64 = 1e-8;

/// Smallest radius or width a primitive builder accepts.
///
/// Circles, arcs and slots at or below this size are reported as degenerate
/// instead of being silently dropped.
///
/// # Example
///
/// ```rust
/// use config::constants::{MIN_FEATURE_SIZE, VERTEX_EPSILON};
///
/// assert!(MIN_FEATURE_SIZE > VERTEX_EPSILON);
/// ```
pub const MIN_FEATURE_SIZE: f64 = 1e-6;

// =============================================================================
// DISCRETIZATION CONSTANTS
// =============================================================================

/// Default upper bound on the number of segments used for a full circle.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_MAX_SEGMENTS, MIN_SEGMENTS};
///
/// assert!(DEFAULT_MAX_SEGMENTS > MIN_SEGMENTS);
/// ```
pub const DEFAULT_MAX_SEGMENTS: u32 = 32;

/// Default minimum chord length (the finest discretization step).
///
/// Tuned for millimeter input: a 0.1 mm chord keeps small vias round
/// without spending hundreds of vertices on them.
pub const DEFAULT_MIN_CHORD: f64 = 0.1;

/// Default maximum chord length (the coarsest discretization step).
pub const DEFAULT_MAX_CHORD: f64 = 1.0;

/// Minimum number of segments for a full circle.
///
/// A circle needs at least 3 points to enclose any area.
pub const MIN_SEGMENTS: u32 = 3;

/// Minimum number of segments for a partial arc.
///
/// Two segments keep a half circle from collapsing into a straight line.
pub const MIN_ARC_SEGMENTS: u32 = 2;

/// Hard cap accepted for a configured `max_segments`.
///
/// # Example
///
/// ```rust
/// use config::constants::{ABSOLUTE_MAX_SEGMENTS, DEFAULT_MAX_SEGMENTS};
///
/// assert!(DEFAULT_MAX_SEGMENTS <= ABSOLUTE_MAX_SEGMENTS);
/// ```
pub const ABSOLUTE_MAX_SEGMENTS: u32 = 1000;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in a single contour set.
///
/// Safety limit to prevent memory exhaustion from runaway layer geometry.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let vertex_count = 1000;
/// assert!(vertex_count < MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum number of contours in a single contour set.
pub const MAX_CONTOURS: usize = 1_000_000;

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of discretization settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.min_chord <= config.max_chord);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Upper bound on segments per full circle.
    pub max_segments: u32,
    /// Finest allowed chord length.
    pub min_chord: f64,
    /// Coarsest allowed chord length.
    pub max_chord: f64,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// segment cap and chord bounds.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(48, 0.05, 0.5).expect("valid config");
    /// assert_eq!(cfg.max_segments, 48);
    /// ```
    pub fn new(max_segments: u32, min_chord: f64, max_chord: f64) -> Result<Self, ConfigError> {
        if !(MIN_SEGMENTS..=ABSOLUTE_MAX_SEGMENTS).contains(&max_segments) {
            return Err(ConfigError::InvalidSegments(max_segments));
        }
        if !min_chord.is_finite() || min_chord <= 0.0 {
            return Err(ConfigError::InvalidChord(min_chord));
        }
        if !max_chord.is_finite() || max_chord <= 0.0 {
            return Err(ConfigError::InvalidChord(max_chord));
        }
        if min_chord > max_chord {
            return Err(ConfigError::InvertedChordBounds {
                min: min_chord,
                max: max_chord,
            });
        }
        Ok(Self {
            max_segments,
            min_chord,
            max_chord,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            max_segments: DEFAULT_MAX_SEGMENTS,
            min_chord: DEFAULT_MIN_CHORD,
            max_chord: DEFAULT_MAX_CHORD,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the segment cap is outside `MIN_SEGMENTS..=ABSOLUTE_MAX_SEGMENTS`.
    InvalidSegments(u32),
    /// Raised when a chord length is zero, negative or not finite.
    InvalidChord(f64),
    /// Raised when the minimum chord exceeds the maximum chord.
    InvertedChordBounds {
        /// Requested minimum chord.
        min: f64,
        /// Requested maximum chord.
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSegments(value) => write!(
                f,
                "max_segments must be within {MIN_SEGMENTS}..={ABSOLUTE_MAX_SEGMENTS}: {value}"
            ),
            ConfigError::InvalidChord(value) => {
                write!(f, "chord length must be positive and finite: {value}")
            }
            ConfigError::InvertedChordBounds { min, max } => {
                write!(f, "min_chord {min} exceeds max_chord {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
