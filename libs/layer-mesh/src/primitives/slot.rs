//! # Slot Points
//!
//! An oblong hole or pad: two half-circle caps joined by straight runs.
//!
//! ```text
//!        (-L/2, r) ________________ (L/2, r)
//!                 /                \
//!                |        +         |
//!                 \________________/
//!        (-L/2,-r)                  (L/2,-r)
//! ```
//!
//! `L` is the distance between the cap centers, `r` is half the width.

use crate::error::{GeometryError, GeometryResult};
use crate::params::ArcParams;
use config::constants::{MIN_FEATURE_SIZE, VERTEX_EPSILON};
use glam::DVec2;

use super::circle::circle_points;

/// Counter-clockwise slot outline centered on `center`, rotated by
/// `rotation_deg` about that center.
///
/// Each cap uses an even segment count, so the points at the tips of the
/// slot's long axis are always part of the outline.
///
/// # Errors
///
/// `DegenerateShape` when the width is not above `MIN_FEATURE_SIZE` or the
/// length is negative.
pub fn slot_points(
    params: &ArcParams,
    center: DVec2,
    length: f64,
    width: f64,
    rotation_deg: f64,
) -> GeometryResult<Vec<DVec2>> {
    if !width.is_finite() || width <= MIN_FEATURE_SIZE {
        return Err(GeometryError::degenerate(format!(
            "Slot width must exceed {MIN_FEATURE_SIZE}: {width}"
        )));
    }
    if !length.is_finite() || length < 0.0 {
        return Err(GeometryError::degenerate(format!(
            "Slot length must be non-negative: {length}"
        )));
    }

    let radius = width / 2.0;
    if length < VERTEX_EPSILON {
        return circle_points(params, center, radius, rotation_deg);
    }

    let cap = even_cap_segments(params, radius);
    let half = length / 2.0;
    let rotation = DVec2::from_angle(rotation_deg.to_radians());

    let mut points = Vec::with_capacity(2 * cap as usize + 2);
    // Right cap from -90 to 90, then left cap from 90 to 270.
    for (cap_center, start) in [(DVec2::new(half, 0.0), -90.0), (DVec2::new(-half, 0.0), 90.0)] {
        for i in 0..=cap {
            let theta = (start + 180.0 * i as f64 / cap as f64).to_radians();
            let local = cap_center + radius * DVec2::new(theta.cos(), theta.sin());
            points.push(center + rotation.rotate(local));
        }
    }
    Ok(points)
}

/// Half-circle segment count, rounded up to an even number.
fn even_cap_segments(params: &ArcParams, radius: f64) -> u32 {
    let n = params.arc_segments(radius, 180.0);
    n + n % 2
}
