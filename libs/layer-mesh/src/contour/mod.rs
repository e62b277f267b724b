//! # Contours
//!
//! A contour is an open, ordered loop of vertex handles; the closing edge
//! from the last vertex back to the first is implied. Contours are grouped
//! into a [`ContourSet`] that owns the vertex pool they index into.
//!
//! ## Orientation
//!
//! Positive signed area means counter-clockwise. After normalization solids
//! are counter-clockwise and holes are clockwise.

mod set;


pub use set::ContourSet;

use crate::vertex::VertexId;
use glam::DVec2;

/// Handle of a contour inside its [`ContourSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContourId(pub u32);

impl ContourId {
    /// Position of the contour inside the set.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ContourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One closed outline: a solid region or a hole.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub(crate) id: ContourId,
    pub(crate) vertices: Vec<VertexId>,
    pub(crate) is_hole: bool,
    pub(crate) is_plated: bool,
    pub(crate) signed_area: f64,
}

impl Contour {
    pub(crate) fn new(id: ContourId, is_hole: bool, is_plated: bool) -> Self {
        Self {
            id,
            vertices: Vec::new(),
            is_hole,
            is_plated,
            signed_area: 0.0,
        }
    }

    /// Handle of this contour.
    #[inline]
    pub fn id(&self) -> ContourId {
        self.id
    }

    /// Vertex handles in loop order.
    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Number of vertices (and edges) in the loop.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    #[inline]
    pub fn is_plated(&self) -> bool {
        self.is_plated
    }

    /// Shoelace area of the closed loop; positive when counter-clockwise.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    /// True when the loop turns counter-clockwise.
    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area > 0.0
    }

    /// Extends the running area by one point.
    ///
    /// `first` and `last` are the loop's current end points (absent for an
    /// empty loop).
    pub(crate) fn push(&mut self, id: VertexId, position: DVec2, ends: Option<(DVec2, DVec2)>) {
        if let Some((first, last)) = ends {
            // Replace the old closing edge last->first with last->p->first.
            self.signed_area +=
                0.5 * (last.perp_dot(position) + position.perp_dot(first) - last.perp_dot(first));
        }
        self.vertices.push(id);
    }

    /// Reverses the loop in place.
    pub(crate) fn reverse(&mut self) {
        self.vertices.reverse();
        self.signed_area = -self.signed_area;
    }
}
