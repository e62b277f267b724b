//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_tolerances_are_small_and_positive() {
    assert!(AREA_TOLERANCE > 0.0 && AREA_TOLERANCE < 1e-6);
    assert!(SNAP_TOLERANCE > 0.0 && SNAP_TOLERANCE < 1e-3);
    assert!(SLIVER_RATIO > 0.0 && SLIVER_RATIO < AREA_TOLERANCE);
}

#[test]
fn test_min_feature_size_above_vertex_epsilon() {
    // A feature must be larger than the duplicate-point threshold,
    // otherwise every point of a tiny circle would be rejected.
    assert!(MIN_FEATURE_SIZE > VERTEX_EPSILON);
}

// =============================================================================
// DISCRETIZATION TESTS
// =============================================================================

#[test]
fn test_min_segments_at_least_three() {
    // A circle needs at least 3 points to form a polygon
    assert!(MIN_SEGMENTS >= 3);
}

#[test]
fn test_min_arc_segments_below_circle_minimum() {
    assert!(MIN_ARC_SEGMENTS >= 2);
    assert!(MIN_ARC_SEGMENTS <= MIN_SEGMENTS);
}

#[test]
fn test_default_chords_ordered() {
    assert!(DEFAULT_MIN_CHORD > 0.0);
    assert!(DEFAULT_MIN_CHORD <= DEFAULT_MAX_CHORD);
}

#[test]
fn test_default_max_segments_in_range() {
    assert!(DEFAULT_MAX_SEGMENTS >= MIN_SEGMENTS);
    assert!(DEFAULT_MAX_SEGMENTS <= ABSOLUTE_MAX_SEGMENTS);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_max_vertices_reasonable() {
    // Should allow full board outlines but prevent memory exhaustion
    assert!(MAX_VERTICES >= 1_000_000);
}

#[test]
fn test_max_contours_reasonable() {
    assert!(MAX_CONTOURS >= 10_000);
    assert!(MAX_CONTOURS <= MAX_VERTICES);
}
