//! # Mesh Data Structures
//!
//! Output meshes handed to VRML/IDF writers: a flat sheet ([`Mesh2D`]) and
//! an extruded solid ([`Mesh3D`]). Both are plain vertex and index arrays.

use crate::predicates::orient;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A flat triangulated face at a single height.
///
/// # Example
///
/// ```rust
/// use layer_mesh::ContourSet;
///
/// let mut set = ContourSet::new();
/// set.add_circle(0.0, 0.0, 1.0, false, false).unwrap();
/// set.tesselate().unwrap();
/// let mesh = set.to_2d_mesh(0.035, true).unwrap();
/// assert_eq!(mesh.triangle_count(), mesh.vertex_count() - 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh2D {
    /// Vertex positions, indexed by insertion order.
    pub vertices: Vec<DVec3>,
    /// Triangle indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
    /// Plated flag per vertex.
    pub plated: Vec<bool>,
}

impl Mesh2D {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Axis-aligned bounding box as (min, max) corners.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        bounding_box(&self.vertices)
    }

    /// Signed area seen from +Z: positive for an upward facing sheet.
    pub fn area(&self) -> f64 {
        self.faces
            .iter()
            .map(|f| {
                let [a, b, c] = f.map(|i| self.vertices[i as usize]);
                0.5 * (b - a).cross(c - a).z
            })
            .sum()
    }

    /// Checks index ranges, repeated indices and exactly flat faces.
    pub fn validate(&self) -> bool {
        validate(&self.vertices, &self.faces)
    }

    /// Flattened `[x, y, z, ...]` positions in single precision.
    pub fn vertices_f32(&self) -> Vec<f32> {
        vertices_f32(&self.vertices)
    }

    /// Flattened `[i0, i1, i2, ...]` face indices.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.faces.iter().flatten().copied().collect()
    }
}

/// An extruded solid: top cap, bottom cap and side walls.
///
/// `vertices` holds the top ring (`0..n`) followed by the bottom ring
/// (`n..2n`), where `n` is the number of vertices of the flat sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh3D {
    pub vertices: Vec<DVec3>,
    /// Upward facing cap triangles.
    pub top_faces: Vec<[u32; 3]>,
    /// Downward facing cap triangles.
    pub bottom_faces: Vec<[u32; 3]>,
    /// Two triangles per contour edge, facing away from the material.
    pub side_faces: Vec<[u32; 3]>,
    /// Unit normal per side face.
    pub side_normals: Vec<DVec3>,
    /// Plated flag per vertex.
    pub plated: Vec<bool>,
}

impl Mesh3D {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles across caps and walls.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.top_faces.len() + self.bottom_faces.len() + self.side_faces.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// All faces: top, then bottom, then sides.
    pub fn faces(&self) -> impl Iterator<Item = &[u32; 3]> {
        self.top_faces
            .iter()
            .chain(&self.bottom_faces)
            .chain(&self.side_faces)
    }

    /// Axis-aligned bounding box as (min, max) corners.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        bounding_box(&self.vertices)
    }

    /// Checks index ranges, repeated indices and exactly flat faces.
    pub fn validate(&self) -> bool {
        let faces: Vec<[u32; 3]> = self.faces().copied().collect();
        validate(&self.vertices, &faces) && self.side_normals.len() == self.side_faces.len()
    }

    /// Number of directed edges without a matching opposite edge.
    ///
    /// Zero for a closed, consistently oriented solid.
    pub fn boundary_edge_count(&self) -> usize {
        let mut edges: HashMap<(u32, u32), i64> = HashMap::new();
        for f in self.faces() {
            for k in 0..3 {
                let (a, b) = (f[k], f[(k + 1) % 3]);
                if a < b {
                    *edges.entry((a, b)).or_default() += 1;
                } else {
                    *edges.entry((b, a)).or_default() -= 1;
                }
            }
        }
        edges.values().map(|n| n.unsigned_abs() as usize).sum()
    }

    /// Flattened `[x, y, z, ...]` positions in single precision.
    pub fn vertices_f32(&self) -> Vec<f32> {
        vertices_f32(&self.vertices)
    }

    /// Flattened face indices: top, then bottom, then sides.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.faces().flatten().copied().collect()
    }
}

fn bounding_box(vertices: &[DVec3]) -> (DVec3, DVec3) {
    let Some((&first, rest)) = vertices.split_first() else {
        return (DVec3::ZERO, DVec3::ZERO);
    };
    rest.iter()
        .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)))
}

fn validate(vertices: &[DVec3], faces: &[[u32; 3]]) -> bool {
    let count = vertices.len() as u32;
    faces.iter().all(|f| {
        if f.iter().any(|&i| i >= count) || f[0] == f[1] || f[1] == f[2] || f[0] == f[2] {
            return false;
        }
        let [a, b, c] = f.map(|i| vertices[i as usize]);
        !collinear(a, b, c)
    })
}

/// Exact collinearity: a triangle is flat only when all three axis-plane
/// projections are.
fn collinear(a: DVec3, b: DVec3, c: DVec3) -> bool {
    let projections: [fn(DVec3) -> DVec2; 3] = [
        |v| DVec2::new(v.x, v.y),
        |v| DVec2::new(v.y, v.z),
        |v| DVec2::new(v.z, v.x),
    ];
    projections
        .iter()
        .all(|project| orient(project(a), project(b), project(c)) == 0.0)
}

fn vertices_f32(vertices: &[DVec3]) -> Vec<f32> {
    vertices
        .iter()
        .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh2D {
        Mesh2D {
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            faces: vec![[0, 1, 2]],
            plated: vec![false; 3],
        }
    }

    #[test]
    fn test_mesh2d_counts_and_area() {
        let mesh = unit_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_empty());
        assert!((mesh.area() - 0.5).abs() < 1e-12);
        assert!(mesh.validate());
    }

    #[test]
    fn test_mesh2d_validate_rejects_bad_faces() {
        let mut mesh = unit_triangle();
        mesh.faces.push([0, 1, 5]);
        assert!(!mesh.validate());

        let mut mesh = unit_triangle();
        mesh.faces.push([0, 0, 1]);
        assert!(!mesh.validate());

        let mut mesh = unit_triangle();
        mesh.vertices.push(DVec3::new(2.0, 0.0, 0.0));
        mesh.faces.push([0, 1, 3]);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_validate_accepts_thin_but_non_flat_faces() {
        let mut mesh = unit_triangle();
        mesh.vertices.push(DVec3::new(2.0, 1e-15, 0.0));
        mesh.faces.push([0, 1, 3]);
        assert!(mesh.validate());

        // Flat in xy but not in the wall planes
        let wall = Mesh2D {
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 0.0, 1.0)],
            faces: vec![[0, 1, 2]],
            plated: vec![false; 3],
        };
        assert!(wall.validate());
    }

    #[test]
    fn test_flat_exports() {
        let mesh = unit_triangle();
        assert_eq!(mesh.vertices_f32(), vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(mesh.indices_u32(), vec![0, 1, 2]);
    }

    #[test]
    fn test_bounding_box() {
        let mesh = Mesh2D {
            vertices: vec![DVec3::new(-1.0, -2.0, -3.0), DVec3::new(4.0, 5.0, 6.0)],
            ..Default::default()
        };
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
        assert_eq!(Mesh2D::default().bounding_box(), (DVec3::ZERO, DVec3::ZERO));
    }

    #[test]
    fn test_boundary_edges_of_tetrahedron() {
        let mut mesh = Mesh3D {
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
            top_faces: vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]],
            ..Default::default()
        };
        assert_eq!(mesh.boundary_edge_count(), 0);
        mesh.top_faces.pop();
        assert_eq!(mesh.boundary_edge_count(), 3);
    }

    #[test]
    fn test_mesh_serializes() {
        fn assert_serde<T: Serialize + for<'de> Deserialize<'de>>() {}
        assert_serde::<Mesh2D>();
        assert_serde::<Mesh3D>();
    }
}
