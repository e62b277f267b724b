//! # Layer Batches
//!
//! Board exports mesh many independent layers (copper, mask, silkscreen,
//! outline). Each [`ContourSet`] owns all of its state, so a batch can be
//! tesselated in parallel without locks.

use crate::contour::ContourSet;
use crate::error::GeometryResult;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Tesselates every set in parallel.
///
/// Returns one result per set, in input order: the triangle count on
/// success, or the set's error. A failure in one layer does not affect the
/// others.
///
/// # Example
///
/// ```rust
/// use layer_mesh::{tesselate_layers, ContourSet};
///
/// let mut layers = vec![ContourSet::new(), ContourSet::new()];
/// layers[0].add_circle(0.0, 0.0, 1.0, false, false).unwrap();
/// layers[1].add_slot(0.0, 0.0, 2.0, 1.0, 0.0, false, false).unwrap();
/// let results = tesselate_layers(&mut layers);
/// assert!(results.iter().all(|r| r.is_ok()));
/// ```
#[instrument(level = "debug", skip_all, fields(layers = sets.len()))]
pub fn tesselate_layers(sets: &mut [ContourSet]) -> Vec<GeometryResult<usize>> {
    let results: Vec<GeometryResult<usize>> = sets
        .par_iter_mut()
        .map(|set| set.tesselate().map(|triangles| triangles.len()))
        .collect();
    let failed = results.iter().filter(|r| r.is_err()).count();
    debug!(failed, "tesselated layer batch");
    results
}
