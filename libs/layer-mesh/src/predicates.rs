//! # Geometric Predicates
//!
//! Orientation, area and containment tests shared by the contour store,
//! the winding normalizer and the triangulator. Orientation uses the
//! adaptive-precision `robust::orient2d`, so the sign is exact even for
//! nearly collinear points.

use glam::DVec2;
use robust::{orient2d, Coord};

/// Twice the signed area of triangle `abc`.
///
/// Positive when `a`, `b`, `c` turn counter-clockwise, negative when they
/// turn clockwise and exactly zero when collinear.
#[inline]
pub fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// Shoelace signed area of a closed ring (closure implied).
///
/// Positive for counter-clockwise rings.
pub fn signed_area<I>(points: I) -> f64
where
    I: IntoIterator<Item = DVec2>,
{
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return 0.0;
    };
    let mut sum = 0.0;
    let mut prev = first;
    for p in iter {
        sum += prev.perp_dot(p);
        prev = p;
    }
    sum += prev.perp_dot(first);
    sum * 0.5
}

/// Even-odd containment test of `p` against a closed ring.
///
/// Points exactly on the boundary may report either side; callers reject
/// touching contours before relying on this.
pub fn point_in_ring(p: DVec2, ring: &[DVec2]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// True when `q` lies within the bounding box of segment `pr`.
///
/// Only meaningful when `p`, `q`, `r` are already known to be collinear.
#[inline]
fn on_segment(p: DVec2, q: DVec2, r: DVec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Closed segment intersection test: proper crossings, touching endpoints
/// and collinear overlaps all count.
pub fn segments_intersect(p1: DVec2, q1: DVec2, p2: DVec2, q2: DVec2) -> bool {
    let o1 = orient(p1, q1, p2).signum_or_zero();
    let o2 = orient(p1, q1, q2).signum_or_zero();
    let o3 = orient(p2, q2, p1).signum_or_zero();
    let o4 = orient(p2, q2, q1).signum_or_zero();

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && on_segment(p1, p2, q1))
        || (o2 == 0 && on_segment(p1, q2, q1))
        || (o3 == 0 && on_segment(p2, p1, q2))
        || (o4 == 0 && on_segment(p2, q1, q2))
}

/// Sign helper that maps exact zero to zero instead of `f64::signum`'s 1.0.
trait SignumOrZero {
    fn signum_or_zero(self) -> i8;
}

impl SignumOrZero for f64 {
    #[inline]
    fn signum_or_zero(self) -> i8 {
        if self > 0.0 {
            1
        } else if self < 0.0 {
            -1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(0.0, 2.0),
        ]
    }

    #[test]
    fn test_orient_signs() {
        let a = DVec2::ZERO;
        let b = DVec2::X;
        assert!(orient(a, b, DVec2::Y) > 0.0);
        assert!(orient(a, b, -DVec2::Y) < 0.0);
        assert_eq!(orient(a, b, DVec2::new(2.0, 0.0)), 0.0);
    }

    #[test]
    fn test_signed_area_follows_winding() {
        let ccw = square();
        assert_relative_eq!(signed_area(ccw.iter().copied()), 4.0);
        assert_relative_eq!(signed_area(ccw.iter().rev().copied()), -4.0);
        assert_eq!(signed_area(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_point_in_ring() {
        let ring = square();
        assert!(point_in_ring(DVec2::new(1.0, 1.0), &ring));
        assert!(!point_in_ring(DVec2::new(3.0, 1.0), &ring));
        assert!(!point_in_ring(DVec2::new(1.0, 1.0), &ring[..2]));
    }

    #[test]
    fn test_segments_intersect_cases() {
        let o = DVec2::ZERO;
        // Proper crossing
        assert!(segments_intersect(o, DVec2::new(2.0, 2.0), DVec2::new(0.0, 2.0), DVec2::new(2.0, 0.0)));
        // Disjoint parallel
        assert!(!segments_intersect(o, DVec2::X, DVec2::Y, DVec2::new(1.0, 1.0)));
        // T-junction touch
        assert!(segments_intersect(o, DVec2::new(2.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0)));
        // Collinear overlap
        assert!(segments_intersect(o, DVec2::new(2.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(3.0, 0.0)));
        // Collinear but apart
        assert!(!segments_intersect(o, DVec2::X, DVec2::new(2.0, 0.0), DVec2::new(3.0, 0.0)));
    }
}
