//! # Triangulator
//!
//! Turns the solids and holes of a [`ContourSet`] into a conforming list of
//! counter-clockwise triangles.
//!
//! ## Pipeline
//!
//! ```text
//! normalize windings → skip degenerate contours → edge sweep
//!     → merge overlapping solids and holes → nesting → earcut each cap
//!     → number vertices
//! ```
//!
//! Any fault is recorded on the set and returned again on every later call
//! until the fault is reset. Vertices created by a failed run are removed
//! from the pool again.

mod cap;
mod outline;
mod validate;


use crate::contour::ContourSet;
use crate::error::TesselationFault;
use crate::predicates::orient;
use crate::vertex::VertexId;
use crate::winding::normalize_windings;
use glam::DVec2;
use outline::Outline;
use tracing::{debug, instrument, warn};

/// Three vertex handles, counter-clockwise seen from +Z.
pub type Triangle = [VertexId; 3];

/// Triangulates every solid of `set` together with its holes.
///
/// On success every vertex on a kept outline, and every Steiner point,
/// carries a contiguous `insertion_order`. Vertices of a solid covered by
/// another solid are left unnumbered.
///
/// # Errors
///
/// The [`TesselationFault`] describing the first problem found. The fault
/// is also stored on the set; no partial triangulation is kept.
///
/// # Example
///
/// ```rust
/// use layer_mesh::{triangulate, ContourSet};
///
/// let mut set = ContourSet::new();
/// set.add_circle(0.0, 0.0, 5.0, false, false).unwrap();
/// set.add_circle(0.0, 0.0, 1.0, true, false).unwrap();
/// let triangles = triangulate(&mut set).unwrap();
/// assert!(!triangles.is_empty());
/// ```
#[instrument(level = "debug", skip_all, fields(contours = set.size()))]
pub fn triangulate(set: &mut ContourSet) -> Result<Vec<Triangle>, TesselationFault> {
    if let Some(fault) = set.fault() {
        return Err(fault);
    }
    set.discard_derived();
    set.pool_mut().reset_insertion_order();
    normalize_windings(set);

    let mark = set.vertex_count();
    let result = run(set);
    match &result {
        Ok(_) => set.keep_derived(mark),
        Err(fault) => {
            warn!(%fault, "tesselation failed");
            set.pool_mut().truncate(mark);
            set.pool_mut().reset_insertion_order();
            set.set_fault(*fault);
        }
    }
    result
}

fn run(set: &mut ContourSet) -> Result<Vec<Triangle>, TesselationFault> {
    let participating = participating_contours(set);
    let merges = validate::check_edges(set, &participating)?;
    let (outlines, merged_points) = outline::build(set, &participating, &merges)?;
    let groups = outline::nest(&outlines);

    let mut triangles = Vec::new();
    let mut steiner = Vec::new();
    let mut live = Vec::new();
    for group in &groups {
        let holes: Vec<&Outline> = group.holes.iter().map(|&h| &outlines[h]).collect();
        let fill = cap::fill(&outlines[group.solid], &holes, set.pool_mut())?;
        triangles.extend(fill.triangles);
        steiner.extend(fill.steiner);
        live.push(group.solid);
        live.extend(group.holes.iter().copied());
    }

    live.sort_unstable();
    let mut order = 0u32;
    for &k in &live {
        for &id in &outlines[k].vertices {
            if set.pool().get(id).is_some_and(|v| v.insertion_order.is_none()) {
                set.pool_mut().set_insertion_order(id, order);
                order += 1;
            }
        }
    }
    for &id in &steiner {
        set.pool_mut().set_insertion_order(id, order);
        order += 1;
    }
    set.set_boundaries(live.iter().map(|&k| outlines[k].vertices.clone()).collect());

    debug!(
        solids = groups.len(),
        holes = live.len() - groups.len(),
        merged_points,
        steiner = steiner.len(),
        triangles = triangles.len(),
        "tesselated contour set"
    );
    Ok(triangles)
}

/// Indices of contours with at least three vertices and non-zero area.
fn participating_contours(set: &ContourSet) -> Vec<usize> {
    let mut out = Vec::with_capacity(set.size());
    for (index, contour) in set.contours().iter().enumerate() {
        let ring = loop_positions(set, index);
        let collinear = ring.len() < 3
            || ring
                .windows(2)
                .skip(1)
                .all(|w| orient(ring[0], w[0], w[1]) == 0.0);
        if collinear {
            warn!(
                contour = %contour.id(),
                vertices = ring.len(),
                "skipping degenerate contour"
            );
            continue;
        }
        out.push(index);
    }
    out
}

fn loop_positions(set: &ContourSet, index: usize) -> Vec<DVec2> {
    set.contours()[index]
        .vertices()
        .iter()
        .map(|&v| set.position_of(v))
        .collect()
}
