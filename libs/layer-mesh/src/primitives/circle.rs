//! # Circle and Arc Points
//!
//! Generates the outline points of circles and circular arcs.

use crate::error::{GeometryError, GeometryResult};
use crate::params::ArcParams;
use config::constants::MIN_FEATURE_SIZE;
use glam::DVec2;
use std::f64::consts::TAU;

/// Rejects radii that are too small (or not finite) to build a feature from.
pub(crate) fn check_radius(what: &str, radius: f64) -> GeometryResult<()> {
    if !radius.is_finite() || radius <= MIN_FEATURE_SIZE {
        return Err(GeometryError::degenerate(format!(
            "{what} radius must exceed {MIN_FEATURE_SIZE}: {radius}"
        )));
    }
    Ok(())
}

/// Counter-clockwise points of a full circle, starting at `start_deg`.
///
/// # Example
///
/// ```rust
/// use layer_mesh::primitives::circle_points;
/// use layer_mesh::ArcParams;
/// use glam::DVec2;
///
/// let points = circle_points(&ArcParams::default(), DVec2::ZERO, 1.0, 0.0).unwrap();
/// assert_eq!(points.len(), 32);
/// ```
pub fn circle_points(
    params: &ArcParams,
    center: DVec2,
    radius: f64,
    start_deg: f64,
) -> GeometryResult<Vec<DVec2>> {
    check_radius("Circle", radius)?;
    let segments = params.circle_segments(radius);
    let start = start_deg.to_radians();
    Ok((0..segments)
        .map(|i| {
            let theta = start + TAU * i as f64 / segments as f64;
            center + radius * DVec2::new(theta.cos(), theta.sin())
        })
        .collect())
}

/// Points of an arc from `start_deg` sweeping `sweep_deg`, both ends included.
///
/// Positive sweeps run counter-clockwise. A zero sweep, or one of a full
/// turn or more, yields a full circle (clockwise for negative sweeps).
pub fn arc_points(
    params: &ArcParams,
    center: DVec2,
    radius: f64,
    start_deg: f64,
    sweep_deg: f64,
) -> GeometryResult<Vec<DVec2>> {
    check_radius("Arc", radius)?;
    if !start_deg.is_finite() || !sweep_deg.is_finite() {
        return Err(GeometryError::degenerate(format!(
            "Arc angles must be finite: start={start_deg}, sweep={sweep_deg}"
        )));
    }

    if sweep_deg == 0.0 || sweep_deg.abs() >= 360.0 {
        let mut points = circle_points(params, center, radius, start_deg)?;
        if sweep_deg < 0.0 {
            // Keep the start point first, walk the other way round.
            points[1..].reverse();
        }
        return Ok(points);
    }

    let segments = params.arc_segments(radius, sweep_deg);
    Ok((0..=segments)
        .map(|i| {
            let angle = start_deg + sweep_deg * i as f64 / segments as f64;
            let theta = angle.to_radians();
            center + radius * DVec2::new(theta.cos(), theta.sin())
        })
        .collect())
}
