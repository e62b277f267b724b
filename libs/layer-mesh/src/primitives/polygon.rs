//! # Polygon Points

use crate::error::{GeometryError, GeometryResult};
use config::constants::VERTEX_EPSILON;
use glam::DVec2;

/// Rotates `points` by `rotation_deg` about the origin, then moves them by
/// `offset`.
///
/// Consecutive duplicates and a closing point repeating the first are
/// dropped.
///
/// # Errors
///
/// `DegenerateShape` if fewer than three distinct points remain.
pub fn polygon_points(
    points: &[DVec2],
    offset: DVec2,
    rotation_deg: f64,
) -> GeometryResult<Vec<DVec2>> {
    let rotation = DVec2::from_angle(rotation_deg.to_radians());

    let mut out: Vec<DVec2> = Vec::with_capacity(points.len());
    for &p in points {
        if !p.is_finite() {
            return Err(GeometryError::degenerate(format!(
                "Polygon point is not finite: {p}"
            )));
        }
        let q = offset + rotation.rotate(p);
        if out.last().is_some_and(|last| last.distance(q) < VERTEX_EPSILON) {
            continue;
        }
        out.push(q);
    }
    while out.len() > 1 && out[0].distance(out[out.len() - 1]) < VERTEX_EPSILON {
        out.pop();
    }

    if out.len() < 3 {
        return Err(GeometryError::degenerate(format!(
            "Polygon needs at least 3 distinct points, got {}",
            out.len()
        )));
    }
    Ok(out)
}
