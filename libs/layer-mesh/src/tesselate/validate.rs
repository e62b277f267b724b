//! # Pre-triangulation Checks
//!
//! Sweeps the edges of every participating contour and sorts each
//! contact into one of three outcomes:
//!
//! - neighbouring edges of one contour may only share their common vertex,
//!   anything else (crossing, touching, folding back) is a self-intersection
//! - a solid and a hole that cross or touch are a contour crossing
//! - two solids, or two holes, that cross or touch are merged later

use crate::contour::ContourSet;
use crate::error::{FaultKind, TesselationFault};
use crate::predicates::{orient, segments_intersect};
use glam::DVec2;

#[derive(Debug, Clone, Copy)]
struct Edge {
    a: DVec2,
    b: DVec2,
    contour: usize,
    slot: usize,
    len: usize,
    min_x: f64,
    max_x: f64,
}

impl Edge {
    fn adjacent(&self, other: &Edge) -> bool {
        self.contour == other.contour
            && ((self.slot + 1) % self.len == other.slot || (other.slot + 1) % other.len == self.slot)
    }
}

/// Rejects self-intersections and solid/hole contacts among `contours`.
///
/// Returns the sorted pairs of same-role contours that cross or touch.
pub(crate) fn check_edges(
    set: &ContourSet,
    contours: &[usize],
) -> Result<Vec<(usize, usize)>, TesselationFault> {
    let mut edges = Vec::new();
    for &ci in contours {
        let ring = positions(set, ci);
        let len = ring.len();
        for (slot, &a) in ring.iter().enumerate() {
            let b = ring[(slot + 1) % len];
            edges.push(Edge {
                a,
                b,
                contour: ci,
                slot,
                len,
                min_x: a.x.min(b.x),
                max_x: a.x.max(b.x),
            });
        }
    }
    edges.sort_by(|e, f| {
        e.min_x
            .total_cmp(&f.min_x)
            .then(e.contour.cmp(&f.contour))
            .then(e.slot.cmp(&f.slot))
    });

    let mut merges = Vec::new();
    for (i, e) in edges.iter().enumerate() {
        for f in edges[i + 1..].iter().take_while(|f| f.min_x <= e.max_x) {
            let hit = if e.adjacent(f) {
                folds_back(e, f)
            } else {
                segments_intersect(e.a, e.b, f.a, f.b)
            };
            if !hit {
                continue;
            }
            let same_role = e.contour != f.contour
                && set.contours()[e.contour].is_hole() == set.contours()[f.contour].is_hole();
            if same_role {
                merges.push((e.contour.min(f.contour), e.contour.max(f.contour)));
            } else {
                return Err(edge_fault(set, e, f));
            }
        }
    }
    merges.sort_unstable();
    merges.dedup();
    Ok(merges)
}

/// True when two neighbouring edges overlap beyond their shared vertex.
fn folds_back(e: &Edge, f: &Edge) -> bool {
    let (shared, u, w) = if (e.slot + 1) % e.len == f.slot {
        (e.b, e.a, f.b)
    } else {
        (e.a, e.b, f.a)
    };
    orient(shared, u, w) == 0.0 && (u - shared).dot(w - shared) > 0.0
}

fn edge_fault(set: &ContourSet, e: &Edge, f: &Edge) -> TesselationFault {
    let kind = if e.contour == f.contour {
        FaultKind::SelfIntersection
    } else {
        FaultKind::ContourCrossing
    };
    let culprit = if (f.contour, f.slot) > (e.contour, e.slot) { f } else { e };
    TesselationFault {
        contour: set.contours()[culprit.contour].id(),
        vertex: culprit.slot,
        kind,
    }
}

fn positions(set: &ContourSet, index: usize) -> Vec<DVec2> {
    set.contours()[index]
        .vertices()
        .iter()
        .map(|&v| set.position_of(v))
        .collect()
}
