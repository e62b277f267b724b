//! # Vertex Pool
//!
//! Arena of every 2D point added to a contour set. Contours and triangles
//! refer to points by [`VertexId`], which stays valid until the pool is
//! cleared.

use glam::DVec2;

/// Stable handle of a vertex inside its [`VertexPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Position of the vertex inside the pool storage.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in the layer plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Layer-plane coordinates (caller units, usually millimeters).
    pub position: DVec2,
    /// Handle of this vertex.
    pub id: VertexId,
    /// Output index, assigned when triangulation starts.
    ///
    /// `None` for vertices no participating contour uses.
    pub insertion_order: Option<u32>,
    /// Whether the vertex belongs to a plated feature.
    pub plated: bool,
}

/// Owns all vertices of one contour set.
///
/// # Example
///
/// ```rust
/// use layer_mesh::VertexPool;
///
/// let mut pool = VertexPool::new();
/// let id = pool.add(1.0, 2.0, false);
/// assert_eq!(pool.get(id).map(|v| v.position.x), Some(1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VertexPool {
    vertices: Vec<Vertex>,
}

impl VertexPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and returns its handle.
    ///
    /// Handles are issued in increasing order and are never reused until
    /// [`clear`](Self::clear).
    pub fn add(&mut self, x: f64, y: f64, plated: bool) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            position: DVec2::new(x, y),
            id,
            insertion_order: None,
            plated,
        });
        id
    }

    /// Looks up a vertex by handle.
    #[inline]
    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Position of a vertex, if the handle is valid.
    #[inline]
    pub fn position(&self, id: VertexId) -> Option<DVec2> {
        self.get(id).map(|v| v.position)
    }

    /// Drops every vertex. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Drops every vertex from `len` on. Handles below `len` stay valid.
    pub fn truncate(&mut self, len: usize) {
        self.vertices.truncate(len);
    }

    /// Number of vertices in the pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the pool holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over all vertices in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Assigns the output index of a vertex. Invalid handles are ignored.
    pub fn set_insertion_order(&mut self, id: VertexId, order: u32) {
        if let Some(v) = self.vertices.get_mut(id.index()) {
            v.insertion_order = Some(order);
        }
    }

    /// Forgets every output index.
    pub fn reset_insertion_order(&mut self) {
        for v in &mut self.vertices {
            v.insertion_order = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_ids_are_sequential() {
        let mut pool = VertexPool::new();
        let a = pool.add(0.0, 0.0, false);
        let b = pool.add(1.0, 0.0, true);
        assert_eq!(a, VertexId(0));
        assert_eq!(b, VertexId(1));
        assert_eq!(pool.len(), 2);
        assert!(pool.get(b).is_some_and(|v| v.plated));
    }

    #[test]
    fn test_pool_clear_invalidates_ids() {
        let mut pool = VertexPool::new();
        let a = pool.add(0.0, 0.0, false);
        pool.clear();
        assert!(pool.is_empty());
        assert!(pool.get(a).is_none());
    }

    #[test]
    fn test_truncate_keeps_earlier_handles() {
        let mut pool = VertexPool::new();
        let a = pool.add(0.0, 0.0, false);
        let b = pool.add(1.0, 0.0, false);
        pool.truncate(1);
        assert_eq!(pool.len(), 1);
        assert!(pool.get(a).is_some());
        assert!(pool.get(b).is_none());
        // Handles are issued again from the new end
        assert_eq!(pool.add(2.0, 0.0, true), b);
        pool.truncate(10);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_insertion_order_roundtrip() {
        let mut pool = VertexPool::new();
        let a = pool.add(0.0, 0.0, false);
        assert_eq!(pool.get(a).and_then(|v| v.insertion_order), None);
        pool.set_insertion_order(a, 5);
        assert_eq!(pool.get(a).and_then(|v| v.insertion_order), Some(5));
        pool.reset_insertion_order();
        assert_eq!(pool.get(a).and_then(|v| v.insertion_order), None);
        // Unknown handles are a no-op
        pool.set_insertion_order(VertexId(99), 1);
    }
}
