//! # Outlines
//!
//! The closed loops that bound material once overlapping contours are
//! merged, and the solid/hole nesting between them.
//!
//! ## Merging
//!
//! Contours of the same role that cross or touch (two drills of a slotted
//! via, two overlapping pads) are replaced by the boundary of their union,
//! computed with `geo`'s boolean operations. Union points that match an
//! input vertex reuse its handle; intersection points become new vertices
//! carrying the `plated` flag of the nearest input vertex.
//!
//! ## Nesting
//!
//! Every outline finds its smallest enclosing outline. Walking outward from
//! there to the first outline that is kept:
//!
//! ```text
//! solid  inside nothing or a kept hole   kept
//! solid  inside a kept solid             covered, merged into it
//! hole   inside a kept solid             kept, punched into that solid
//! hole   inside nothing or a kept hole   ignored
//! ```

use crate::contour::{ContourId, ContourSet};
use crate::error::{FaultKind, TesselationFault};
use crate::predicates::{point_in_ring, signed_area};
use crate::vertex::{VertexId, VertexPool};
use config::constants::SNAP_TOLERANCE;
use geo::{BooleanOps, LineString, MultiPolygon, Polygon};
use glam::DVec2;
use tracing::debug;

/// A closed loop handed to the cap filler.
///
/// Solids run counter-clockwise, holes clockwise.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Outline {
    pub vertices: Vec<VertexId>,
    pub positions: Vec<DVec2>,
    pub is_hole: bool,
    /// Contour blamed when the outline cannot be filled.
    pub contour: ContourId,
    /// Unsigned enclosed area.
    pub area: f64,
}

impl Outline {
    fn new(
        mut vertices: Vec<VertexId>,
        mut positions: Vec<DVec2>,
        is_hole: bool,
        contour: ContourId,
    ) -> Self {
        let signed = signed_area(positions.iter().copied());
        if (signed < 0.0) != is_hole {
            vertices.reverse();
            positions.reverse();
        }
        Self {
            vertices,
            positions,
            is_hole,
            contour,
            area: signed.abs(),
        }
    }

    /// A point strictly inside any outline that encloses this one.
    fn sample_point(&self) -> DVec2 {
        (self.positions[0] + self.positions[1]) * 0.5
    }
}

/// One kept solid with the holes punched into it, as outline indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Group {
    pub solid: usize,
    pub holes: Vec<usize>,
}

/// Builds one outline per contour, or per merged cluster of contours.
///
/// `contours` must be sorted and already checked, `merges` lists the
/// pairs of same-role contours that cross or touch. Returns the outlines
/// in order of their first contour and the number of vertices created.
pub(crate) fn build(
    set: &mut ContourSet,
    contours: &[usize],
    merges: &[(usize, usize)],
) -> Result<(Vec<Outline>, usize), TesselationFault> {
    let mut outlines = Vec::with_capacity(contours.len());
    let mut created = 0;
    for members in clusters(contours, merges) {
        if let [single] = members[..] {
            let contour = &set.contours()[single];
            let positions = contour
                .vertices()
                .iter()
                .map(|&v| set.position_of(v))
                .collect();
            outlines.push(Outline::new(
                contour.vertices().to_vec(),
                positions,
                contour.is_hole(),
                contour.id(),
            ));
        } else {
            let (merged, added) = merge(set, &members)?;
            created += added;
            outlines.extend(merged);
        }
    }
    Ok((outlines, created))
}

/// Groups contours linked by `merges`, each group in index order and the
/// groups ordered by their first contour.
fn clusters(contours: &[usize], merges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    fn root(parent: &mut [usize], mut k: usize) -> usize {
        while parent[k] != k {
            parent[k] = parent[parent[k]];
            k = parent[k];
        }
        k
    }

    let mut parent: Vec<usize> = (0..contours.len()).collect();
    for &(a, b) in merges {
        if let (Ok(a), Ok(b)) = (contours.binary_search(&a), contours.binary_search(&b)) {
            let (ra, rb) = (root(&mut parent, a), root(&mut parent, b));
            // The smaller index stays root, so every root is its cluster's first member.
            parent[ra.max(rb)] = ra.min(rb);
        }
    }

    let mut slot_of: Vec<Option<usize>> = vec![None; contours.len()];
    let mut out: Vec<Vec<usize>> = Vec::new();
    for (k, &ci) in contours.iter().enumerate() {
        let r = root(&mut parent, k);
        let slot = *slot_of[r].get_or_insert_with(|| {
            out.push(Vec::new());
            out.len() - 1
        });
        out[slot].push(ci);
    }
    out
}

#[derive(Debug, Clone, Copy)]
struct Known {
    pos: DVec2,
    id: VertexId,
    plated: bool,
}

/// Replaces a cluster of same-role contours with the outlines of their union.
///
/// Exterior rings keep the cluster's role, interior rings take the
/// opposite one.
fn merge(set: &mut ContourSet, members: &[usize]) -> Result<(Vec<Outline>, usize), TesselationFault> {
    let first = &set.contours()[members[0]];
    let (is_hole, blame) = (first.is_hole(), first.id());

    let mut known = Vec::new();
    let mut union: Option<MultiPolygon<f64>> = None;
    for &ci in members {
        let contour = &set.contours()[ci];
        let ring: Vec<(f64, f64)> = contour
            .vertices()
            .iter()
            .map(|&id| {
                let pos = set.position_of(id);
                known.push(Known {
                    pos,
                    id,
                    plated: contour.is_plated(),
                });
                (pos.x, pos.y)
            })
            .collect();
        let shape = MultiPolygon::new(vec![Polygon::new(LineString::from(ring), Vec::new())]);
        union = Some(match union {
            Some(acc) => acc.union(&shape),
            None => shape,
        });
    }
    let union = union.unwrap_or_else(|| MultiPolygon::new(Vec::new()));

    let (min, max) = bounds(known.iter().map(|k| k.pos));
    let tolerance = SNAP_TOLERANCE * (max - min).max_element().max(1.0);
    let mut fresh: Vec<(DVec2, VertexId)> = Vec::new();
    let mut outlines = Vec::new();
    for polygon in &union.0 {
        let rings = std::iter::once((polygon.exterior(), is_hole))
            .chain(polygon.interiors().iter().map(|r| (r, !is_hole)));
        for (ring, role) in rings {
            let mut coords: Vec<DVec2> = ring.coords().map(|c| DVec2::new(c.x, c.y)).collect();
            if coords.len() > 1 && coords.first() == coords.last() {
                coords.pop();
            }

            let mut vertices: Vec<VertexId> = Vec::with_capacity(coords.len());
            let mut positions = Vec::with_capacity(coords.len());
            for p in coords {
                let (id, pos) = snap(set.pool_mut(), &known, &mut fresh, p, tolerance);
                if vertices.last() != Some(&id) {
                    vertices.push(id);
                    positions.push(pos);
                }
            }
            if vertices.len() > 1 && vertices.first() == vertices.last() {
                vertices.pop();
                positions.pop();
            }
            if vertices.len() < 3 || signed_area(positions.iter().copied()) == 0.0 {
                continue;
            }
            outlines.push(Outline::new(vertices, positions, role, blame));
        }
    }

    if outlines.is_empty() {
        return Err(TesselationFault {
            contour: blame,
            vertex: 0,
            kind: FaultKind::Unresolved,
        });
    }
    debug!(
        contours = members.len(),
        outlines = outlines.len(),
        added = fresh.len(),
        "merged overlapping contours"
    );
    Ok((outlines, fresh.len()))
}

/// Handle for a union point: an input vertex within `tolerance`, a point
/// already created for this cluster, or a new vertex.
fn snap(
    pool: &mut VertexPool,
    known: &[Known],
    fresh: &mut Vec<(DVec2, VertexId)>,
    p: DVec2,
    tolerance: f64,
) -> (VertexId, DVec2) {
    let nearest = known
        .iter()
        .min_by(|a, b| a.pos.distance_squared(p).total_cmp(&b.pos.distance_squared(p)));
    if let Some(k) = nearest.filter(|k| k.pos.distance(p) <= tolerance) {
        return (k.id, k.pos);
    }
    if let Some(&(pos, id)) = fresh.iter().find(|(q, _)| q.distance(p) <= tolerance) {
        return (id, pos);
    }
    let id = pool.add(p.x, p.y, nearest.is_some_and(|k| k.plated));
    fresh.push((p, id));
    (id, p)
}

/// Pairs every kept solid with the kept holes punched into it.
///
/// Outlines must not cross or touch each other, so one point decides
/// containment of a whole outline.
pub(crate) fn nest(outlines: &[Outline]) -> Vec<Group> {
    let n = outlines.len();
    let boxes: Vec<(DVec2, DVec2)> = outlines
        .iter()
        .map(|o| bounds(o.positions.iter().copied()))
        .collect();
    let mut by_area: Vec<usize> = (0..n).collect();
    by_area.sort_by(|&a, &b| outlines[b].area.total_cmp(&outlines[a].area));

    let mut kept = vec![false; n];
    let mut anchor: Vec<Option<usize>> = vec![None; n];
    let mut group_of: Vec<Option<usize>> = vec![None; n];
    let mut groups: Vec<Group> = Vec::new();
    for &k in &by_area {
        let outline = &outlines[k];
        let sample = outline.sample_point();
        let container = by_area
            .iter()
            .copied()
            .filter(|&j| outlines[j].area > outline.area)
            .filter(|&j| inside_box(sample, boxes[j]) && point_in_ring(sample, &outlines[j].positions))
            .min_by(|&i, &j| outlines[i].area.total_cmp(&outlines[j].area));
        // Containers are larger, so they were visited first.
        let ancestor = container.and_then(|j| if kept[j] { Some(j) } else { anchor[j] });
        anchor[k] = ancestor;

        match (outline.is_hole, ancestor) {
            (false, Some(j)) if !outlines[j].is_hole => {
                debug!(contour = %outline.contour, "solid inside another solid merged into it");
            }
            (false, _) => {
                kept[k] = true;
                group_of[k] = Some(groups.len());
                groups.push(Group {
                    solid: k,
                    holes: Vec::new(),
                });
            }
            (true, Some(j)) if !outlines[j].is_hole => {
                kept[k] = true;
                if let Some(g) = group_of[j] {
                    groups[g].holes.push(k);
                }
            }
            (true, _) => {
                debug!(contour = %outline.contour, "hole outside every solid ignored");
            }
        }
    }

    for group in &mut groups {
        group.holes.sort_unstable();
    }
    groups.sort_by_key(|g| g.solid);
    groups
}

fn bounds<I: IntoIterator<Item = DVec2>>(points: I) -> (DVec2, DVec2) {
    points.into_iter().fold(
        (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
        |(min, max), p| (min.min(p), max.max(p)),
    )
}

#[inline]
fn inside_box(p: DVec2, (min, max): (DVec2, DVec2)) -> bool {
    p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
}
