//! # Arc Discretization Parameters
//!
//! Chord-length driven segment counts for circles and arcs.
//!
//! ## Algorithm
//!
//! ```text
//! chord    = clamp(circumference / max_segments, min_chord, max_chord)
//! segments = clamp(round(circumference / chord), MIN_SEGMENTS, max_segments)
//! ```
//!
//! Small features get chords near `min_chord`, large ones are capped at
//! `max_segments`. The count never decreases as the radius grows.
//!
//! `max_chord` is validated and stored but never changes a count: a chord
//! clamped down to it would ask for more than `max_segments`, and the cap
//! wins. The result is `min(max_segments, round(length / min_chord))`
//! within the floor.
//!
//! Arcs apply the same rule to their swept length, with the segment cap
//! scaled by the swept fraction of a full turn and a floor of
//! `MIN_ARC_SEGMENTS`.

use crate::error::GeometryResult;
use config::constants::{GlobalConfig, MIN_ARC_SEGMENTS, MIN_SEGMENTS};
use std::f64::consts::TAU;

/// Discretization settings for circles, arcs and slot caps.
///
/// ## Example
///
/// ```rust
/// use layer_mesh::ArcParams;
///
/// let params = ArcParams::new(32, 0.2, 0.5).unwrap();
/// assert_eq!(params.circle_segments(1.0), 31);
/// assert!(params.circle_segments(100.0) <= 32);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArcParams {
    config: GlobalConfig,
}

impl From<GlobalConfig> for ArcParams {
    fn from(config: GlobalConfig) -> Self {
        Self { config }
    }
}

impl ArcParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the segment cap is out of range or the chord
    /// bounds are not positive, finite and ordered.
    pub fn new(max_segments: u32, min_chord: f64, max_chord: f64) -> GeometryResult<Self> {
        Ok(GlobalConfig::new(max_segments, min_chord, max_chord)?.into())
    }

    /// Upper bound on segments per full circle.
    #[inline]
    pub fn max_segments(&self) -> u32 {
        self.config.max_segments
    }

    /// Finest allowed chord.
    #[inline]
    pub fn min_chord(&self) -> f64 {
        self.config.min_chord
    }

    /// Coarsest allowed chord. Kept for callers; segment counts are
    /// decided by `min_chord` and `max_segments` alone.
    #[inline]
    pub fn max_chord(&self) -> f64 {
        self.config.max_chord
    }

    /// Segment count for a full circle of the given radius.
    pub fn circle_segments(&self, radius: f64) -> u32 {
        let circumference = TAU * radius.abs();
        self.segments_for_length(circumference, self.config.max_segments, MIN_SEGMENTS)
    }

    /// Segment count for an arc of the given radius and sweep (degrees).
    ///
    /// A zero sweep or one of a full turn or more counts as a full circle.
    pub fn arc_segments(&self, radius: f64, sweep_deg: f64) -> u32 {
        let sweep = sweep_deg.abs();
        if sweep == 0.0 || sweep >= 360.0 {
            return self.circle_segments(radius);
        }
        let fraction = sweep / 360.0;
        let cap = ((self.config.max_segments as f64 * fraction).ceil() as u32).max(MIN_ARC_SEGMENTS);
        let length = TAU * radius.abs() * fraction;
        self.segments_for_length(length, cap, MIN_ARC_SEGMENTS)
    }

    fn segments_for_length(&self, length: f64, cap: u32, floor: u32) -> u32 {
        if length.is_nan() || length <= 0.0 {
            return floor;
        }
        let chord = (length / cap as f64).clamp(self.config.min_chord, self.config.max_chord);
        let n = (length / chord).round();
        (n as u32).clamp(floor, cap.max(floor))
    }
}
