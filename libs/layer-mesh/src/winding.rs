//! # Winding Normalizer
//!
//! Brings every contour of a set into canonical orientation: solids
//! counter-clockwise, holes clockwise. Runs at the start of every
//! triangulation and may be called directly.

use crate::contour::ContourSet;
use config::constants::VERTEX_EPSILON;
use tracing::debug;

/// Normalizes all contours of `set` and returns how many were reversed.
///
/// A last vertex that repeats the first one (an explicitly closed loop) is
/// dropped first. Calling this twice changes nothing the second time.
///
/// # Example
///
/// ```rust
/// use layer_mesh::{normalize_windings, ContourSet};
///
/// let mut set = ContourSet::new();
/// let hole = set.add_circle(0.0, 0.0, 1.0, true, false).unwrap();
/// assert_eq!(normalize_windings(&mut set), 1);
/// assert!(set.contour(hole).unwrap().signed_area() < 0.0);
/// assert_eq!(normalize_windings(&mut set), 0);
/// ```
pub fn normalize_windings(set: &mut ContourSet) -> usize {
    let mut reversed = 0;
    for index in 0..set.size() {
        trim_closing_vertex(set, index);

        let contour = &mut set.contours_mut()[index];
        let wrong = if contour.is_hole {
            contour.signed_area > 0.0
        } else {
            contour.signed_area < 0.0
        };
        if wrong {
            contour.reverse();
            reversed += 1;
        }
    }
    if reversed > 0 {
        debug!(reversed, contours = set.size(), "normalized contour windings");
    }
    reversed
}

fn trim_closing_vertex(set: &mut ContourSet, index: usize) {
    let (first, last) = {
        let vertices = &set.contours()[index].vertices;
        if vertices.len() < 2 {
            return;
        }
        (vertices[0], vertices[vertices.len() - 1])
    };
    if set.position_of(first).distance(set.position_of(last)) < VERTEX_EPSILON {
        set.contours_mut()[index].vertices.pop();
        set.refresh_area(index);
    }
}
