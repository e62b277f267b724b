//! # Contour Set
//!
//! Store for the contours of one layer or feature, together with the vertex
//! pool they index into, the discretization parameters used by the
//! primitive builders and the cached triangulation.

use super::{Contour, ContourId};
use crate::error::{GeometryError, GeometryResult, TesselationFault};
use crate::params::ArcParams;
use crate::predicates::signed_area;
use crate::tesselate::{triangulate, Triangle};
use crate::vertex::{Vertex, VertexId, VertexPool};
use config::constants::{MAX_CONTOURS, MAX_VERTICES, VERTEX_EPSILON};
use glam::DVec2;
use std::ops::Range;

/// Solids and holes of one layer, meshed together.
///
/// # Example
///
/// ```rust
/// use layer_mesh::ContourSet;
///
/// let mut set = ContourSet::new();
/// let outline = set.new_contour(false, false).unwrap();
/// for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)] {
///     set.push_vertex(outline, x, y).unwrap();
/// }
/// let triangles = set.tesselate().unwrap();
/// assert_eq!(triangles.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ContourSet {
    pool: VertexPool,
    contours: Vec<Contour>,
    params: ArcParams,
    max_vertices: usize,
    max_contours: usize,
    offset: DVec2,
    triangles: Option<Vec<Triangle>>,
    boundaries: Vec<Vec<VertexId>>,
    /// Pool range holding the points the last tesselation created.
    derived_tail: Range<usize>,
    /// Created points still in the pool, not counted against the ceiling.
    derived_total: usize,
    fault: Option<TesselationFault>,
}

impl Default for ContourSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ContourSet {
    /// Creates an empty set with default limits and arc parameters.
    pub fn new() -> Self {
        Self::with_limits(MAX_VERTICES, MAX_CONTOURS)
    }

    /// Creates an empty set with custom vertex and contour ceilings.
    pub fn with_limits(max_vertices: usize, max_contours: usize) -> Self {
        Self {
            pool: VertexPool::new(),
            contours: Vec::new(),
            params: ArcParams::default(),
            max_vertices,
            max_contours,
            offset: DVec2::ZERO,
            triangles: None,
            boundaries: Vec::new(),
            derived_tail: 0..0,
            derived_total: 0,
            fault: None,
        }
    }

    // =========================================================================
    // CONTOURS
    // =========================================================================

    /// Opens a new, empty contour.
    ///
    /// # Errors
    ///
    /// `PoolExhausted` when the contour ceiling is reached.
    pub fn new_contour(&mut self, is_hole: bool, is_plated: bool) -> GeometryResult<ContourId> {
        if self.contours.len() >= self.max_contours {
            return Err(GeometryError::exhausted("contour", self.max_contours));
        }
        let id = ContourId(self.contours.len() as u32);
        self.contours.push(Contour::new(id, is_hole, is_plated));
        self.triangles = None;
        Ok(id)
    }

    /// Appends a point to a contour.
    ///
    /// Returns `Ok(false)` without storing anything when the point lies
    /// within `VERTEX_EPSILON` of the contour's previous vertex.
    ///
    /// # Errors
    ///
    /// `UnknownContour` for a foreign id, `PoolExhausted` at the vertex
    /// ceiling.
    pub fn push_vertex(&mut self, contour: ContourId, x: f64, y: f64) -> GeometryResult<bool> {
        let position = DVec2::new(x, y);
        let ends = {
            let c = self.contour_ref(contour)?;
            match (c.vertices.first(), c.vertices.last()) {
                (Some(&first), Some(&last)) => {
                    let first = self.position_of(first);
                    let last = self.position_of(last);
                    if last.distance(position) < VERTEX_EPSILON {
                        return Ok(false);
                    }
                    Some((first, last))
                }
                _ => None,
            }
        };
        if self.pool.len() - self.derived_total >= self.max_vertices {
            return Err(GeometryError::exhausted("vertex", self.max_vertices));
        }

        let plated = self.contours[contour.index()].is_plated;
        let id = self.pool.add(x, y, plated);
        self.contours[contour.index()].push(id, position, ends);
        self.triangles = None;
        Ok(true)
    }

    /// Reverses a contour if its orientation does not match the role.
    ///
    /// Holes are wanted clockwise, solids counter-clockwise. Returns whether
    /// the contour was reversed; calling it twice never reverses twice.
    pub fn ensure_winding(&mut self, contour: ContourId, want_hole: bool) -> GeometryResult<bool> {
        let c = self.contour_mut(contour)?;
        let wrong = if want_hole {
            c.signed_area > 0.0
        } else {
            c.signed_area < 0.0
        };
        if wrong {
            c.reverse();
            self.triangles = None;
        }
        Ok(wrong)
    }

    /// Number of contours.
    #[inline]
    pub fn size(&self) -> usize {
        self.contours.len()
    }

    /// Returns true if the set holds no contours.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Looks up a contour.
    pub fn contour(&self, id: ContourId) -> Option<&Contour> {
        self.contours.get(id.index())
    }

    /// All contours in creation order.
    #[inline]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// Looks up a vertex.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.pool.get(id)
    }

    /// Number of vertices in the pool, points created by tesselation included.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pool.len()
    }

    /// Read access to the vertex pool.
    #[inline]
    pub fn pool(&self) -> &VertexPool {
        &self.pool
    }

    /// Drops every vertex, contour, triangulation and fault.
    ///
    /// Arc parameters, limits and offsets are kept.
    pub fn clear(&mut self) {
        self.pool.clear();
        self.contours.clear();
        self.triangles = None;
        self.boundaries.clear();
        self.derived_tail = 0..0;
        self.derived_total = 0;
        self.fault = None;
    }

    /// Axis-aligned bounds of every contour vertex, before offsets.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let mut points = self
            .contours
            .iter()
            .flat_map(|c| c.vertices.iter())
            .map(|&id| self.position_of(id));
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Translation applied to every vertex at mesh extraction.
    pub fn set_vertex_offsets(&mut self, dx: f64, dy: f64) {
        self.offset = DVec2::new(dx, dy);
    }

    /// Current extraction offset.
    #[inline]
    pub fn vertex_offsets(&self) -> DVec2 {
        self.offset
    }

    /// Copies every hole contour of `other` into this set.
    ///
    /// Returns the number of holes copied. Used to punch a shared drill
    /// layer into several copper layers.
    pub fn append_holes_from(&mut self, other: &ContourSet) -> GeometryResult<usize> {
        let mut copied = 0;
        for hole in other.contours.iter().filter(|c| c.is_hole) {
            let id = self.new_contour(true, hole.is_plated)?;
            for &v in &hole.vertices {
                let p = other.position_of(v);
                self.push_vertex(id, p.x, p.y)?;
            }
            copied += 1;
        }
        Ok(copied)
    }

    // =========================================================================
    // ARC PARAMETERS
    // =========================================================================

    /// Replaces the discretization parameters used by later builder calls.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the values fail validation; the previous
    /// parameters stay in effect.
    pub fn set_arc_params(
        &mut self,
        max_segments: u32,
        min_chord: f64,
        max_chord: f64,
    ) -> GeometryResult<()> {
        self.params = ArcParams::new(max_segments, min_chord, max_chord)?;
        Ok(())
    }

    /// Restores the default discretization parameters.
    pub fn reset_arc_params(&mut self) {
        self.params = ArcParams::default();
    }

    /// Parameters used by the primitive builders.
    #[inline]
    pub fn arc_params(&self) -> ArcParams {
        self.params
    }

    // =========================================================================
    // TESSELATION
    // =========================================================================

    /// Triangulates the set and keeps the result for mesh extraction.
    ///
    /// # Errors
    ///
    /// `Tesselation` with the stored fault. A set that has faulted keeps
    /// returning that fault until [`reset_fault`](Self::reset_fault).
    pub fn tesselate(&mut self) -> GeometryResult<&[Triangle]> {
        let triangles = triangulate(self)?;
        let stored = self.triangles.insert(triangles);
        Ok(stored.as_slice())
    }

    /// Triangles of the last successful tesselation.
    pub fn triangles(&self) -> Option<&[Triangle]> {
        self.triangles.as_deref()
    }

    /// Closed loops bounding the last successful tesselation, solids
    /// counter-clockwise and holes clockwise.
    ///
    /// These differ from [`contours`](Self::contours) where overlapping
    /// contours were merged or a solid was covered by another.
    pub fn boundary_loops(&self) -> Option<&[Vec<VertexId>]> {
        self.triangles.as_ref().map(|_| self.boundaries.as_slice())
    }

    /// Returns true if a triangulation is available for extraction.
    #[inline]
    pub fn is_tesselated(&self) -> bool {
        self.triangles.is_some()
    }

    /// The recorded tesselation fault, if any.
    #[inline]
    pub fn fault(&self) -> Option<TesselationFault> {
        self.fault
    }

    /// Forgets a recorded fault so the set can be tesselated again.
    pub fn reset_fault(&mut self) {
        self.fault = None;
    }

    // =========================================================================
    // CRATE INTERNALS
    // =========================================================================

    fn contour_ref(&self, id: ContourId) -> GeometryResult<&Contour> {
        self.contours
            .get(id.index())
            .ok_or(GeometryError::UnknownContour(id))
    }

    fn contour_mut(&mut self, id: ContourId) -> GeometryResult<&mut Contour> {
        self.contours
            .get_mut(id.index())
            .ok_or(GeometryError::UnknownContour(id))
    }

    /// Position of a vertex known to belong to this set.
    #[inline]
    pub(crate) fn position_of(&self, id: VertexId) -> DVec2 {
        self.pool.position(id).unwrap_or(DVec2::NAN)
    }

    pub(crate) fn pool_mut(&mut self) -> &mut VertexPool {
        &mut self.pool
    }

    pub(crate) fn contours_mut(&mut self) -> &mut [Contour] {
        &mut self.contours
    }

    pub(crate) fn set_fault(&mut self, fault: TesselationFault) {
        self.fault = Some(fault);
        self.triangles = None;
        self.boundaries.clear();
    }

    pub(crate) fn set_boundaries(&mut self, loops: Vec<Vec<VertexId>>) {
        self.boundaries = loops;
    }

    /// Drops the points the last tesselation created, if nothing was added
    /// to the pool after them.
    pub(crate) fn discard_derived(&mut self) {
        if !self.derived_tail.is_empty() && self.derived_tail.end == self.pool.len() {
            self.pool.truncate(self.derived_tail.start);
            self.derived_total -= self.derived_tail.len();
        }
        self.derived_tail = 0..0;
    }

    /// Records the pool tail from `mark` on as created by tesselation.
    pub(crate) fn keep_derived(&mut self, mark: usize) {
        self.derived_tail = mark..self.pool.len();
        self.derived_total += self.derived_tail.len();
    }

    /// Recomputes a contour's area from its vertex positions.
    pub(crate) fn refresh_area(&mut self, index: usize) {
        let area = signed_area(
            self.contours[index]
                .vertices
                .iter()
                .map(|&id| self.position_of(id)),
        );
        self.contours[index].signed_area = area;
    }
}
