//! # Mesh Extraction
//!
//! Lifts a tesselated [`ContourSet`] into 3D: either a flat sheet at one
//! height, or a solid extruded between two heights.
//!
//! ## Extrusion Layout
//!
//! ```text
//! top ring     0 .. n      caps: triangulation as is (faces +Z)
//! bottom ring  n .. 2n     caps: triangulation reversed (faces -Z)
//! walls        per boundary loop edge a -> b:
//!              (bot a, bot b, top b), (bot a, top b, top a)
//! ```
//!
//! Walls follow the boundary loops of the tesselation rather than the raw
//! contours, so merged and covered contours get no inner walls. Solids run
//! counter-clockwise and holes clockwise, so the same wall rule faces
//! outward from the material for both.


use crate::contour::ContourSet;
use crate::error::{GeometryError, GeometryResult};
use crate::mesh::{Mesh2D, Mesh3D};
use crate::vertex::VertexId;
use glam::DVec3;
use tracing::{debug, instrument};

impl ContourSet {
    /// Flat sheet at `height`, facing +Z when `top_facing` and -Z otherwise.
    ///
    /// Vertex positions include the set's vertex offsets.
    ///
    /// # Errors
    ///
    /// `NotTesselated` if no successful tesselation is available.
    pub fn to_2d_mesh(&self, height: f64, top_facing: bool) -> GeometryResult<Mesh2D> {
        let triangles = self.triangles().ok_or(GeometryError::NotTesselated)?;

        let offset = self.vertex_offsets();
        let live = self.pool().iter().filter(|v| v.insertion_order.is_some()).count();
        let mut vertices = vec![DVec3::ZERO; live];
        let mut plated = vec![false; live];
        for v in self.pool().iter() {
            if let Some(order) = v.insertion_order {
                let p = v.position + offset;
                vertices[order as usize] = DVec3::new(p.x, p.y, height);
                plated[order as usize] = v.plated;
            }
        }

        let faces = triangles
            .iter()
            .map(|t| {
                let [a, b, c] = [self.order_of(t[0])?, self.order_of(t[1])?, self.order_of(t[2])?];
                Ok(if top_facing { [a, b, c] } else { [a, c, b] })
            })
            .collect::<GeometryResult<Vec<_>>>()?;

        Ok(Mesh2D {
            vertices,
            faces,
            plated,
        })
    }

    /// Solid extruded between `top_z` and `bottom_z`.
    ///
    /// The heights are swapped if given in the wrong order.
    ///
    /// # Errors
    ///
    /// `NotTesselated` if no successful tesselation is available,
    /// `DegenerateShape` if both heights are equal.
    #[instrument(level = "debug", skip(self), fields(contours = self.size()))]
    pub fn to_3d_mesh(&self, top_z: f64, bottom_z: f64) -> GeometryResult<Mesh3D> {
        if top_z == bottom_z || !(top_z - bottom_z).is_finite() {
            return Err(GeometryError::degenerate(format!(
                "Extrusion needs two distinct heights: top={top_z}, bottom={bottom_z}"
            )));
        }
        let (top_z, bottom_z) = if top_z < bottom_z {
            (bottom_z, top_z)
        } else {
            (top_z, bottom_z)
        };

        let sheet = self.to_2d_mesh(top_z, true)?;
        let n = sheet.vertices.len() as u32;

        let mut vertices = sheet.vertices;
        vertices.extend_from_within(..);
        for v in &mut vertices[n as usize..] {
            v.z = bottom_z;
        }
        let mut plated = sheet.plated;
        plated.extend_from_within(..);

        let bottom_faces = sheet
            .faces
            .iter()
            .map(|&[a, b, c]| [a + n, c + n, b + n])
            .collect();

        let mut side_faces = Vec::new();
        let mut side_normals = Vec::new();
        for boundary in self.boundary_loops().unwrap_or_default() {
            let Some(ring) = self.loop_orders(boundary) else {
                continue;
            };
            for (k, &a) in ring.iter().enumerate() {
                let b = ring[(k + 1) % ring.len()];
                let (top_a, top_b) = (a, b);
                let (bot_a, bot_b) = (a + n, b + n);
                for face in [[bot_a, bot_b, top_b], [bot_a, top_b, top_a]] {
                    let [p, q, r] = face.map(|i| vertices[i as usize]);
                    side_normals.push((q - p).cross(r - p).normalize_or_zero());
                    side_faces.push(face);
                }
            }
        }

        debug!(
            vertices = vertices.len(),
            caps = sheet.faces.len() * 2,
            walls = side_faces.len(),
            "extruded contour set"
        );
        Ok(Mesh3D {
            vertices,
            top_faces: sheet.faces,
            bottom_faces,
            side_faces,
            side_normals,
            plated,
        })
    }

    fn order_of(&self, id: VertexId) -> GeometryResult<u32> {
        self.vertex(id)
            .and_then(|v| v.insertion_order)
            .ok_or(GeometryError::NotTesselated)
    }

    /// Output indices of a boundary loop, or `None` if a vertex is missing
    /// its output index.
    fn loop_orders(&self, vertices: &[VertexId]) -> Option<Vec<u32>> {
        if vertices.len() < 3 {
            return None;
        }
        vertices
            .iter()
            .map(|&id| self.vertex(id).and_then(|v| v.insertion_order))
            .collect()
    }
}
