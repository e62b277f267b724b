//! # Primitives
//!
//! Contour builders for the shapes PCB layers are made of: round pads and
//! drills (circles), arcs of tracks and outlines, oblong pads and routed
//! holes (slots) and arbitrary polygons.
//!
//! Point generation lives in free functions; the `ContourSet` methods below
//! validate, generate and only then open a contour, so a rejected shape
//! never leaves an empty contour behind.

mod circle;
mod polygon;
mod slot;


pub use circle::{arc_points, circle_points};
pub use polygon::polygon_points;
pub use slot::slot_points;

use crate::contour::{ContourId, ContourSet};
use crate::error::GeometryResult;
use glam::DVec2;

impl ContourSet {
    /// Adds a circle as a new counter-clockwise contour.
    ///
    /// # Errors
    ///
    /// `DegenerateShape` if the radius is not above `MIN_FEATURE_SIZE`.
    pub fn add_circle(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        is_hole: bool,
        is_plated: bool,
    ) -> GeometryResult<ContourId> {
        let points = circle_points(&self.arc_params(), DVec2::new(cx, cy), radius, 0.0)?;
        self.add_ring(&points, is_hole, is_plated)
    }

    /// Appends a full circle to an existing contour.
    ///
    /// Returns the number of points stored.
    pub fn append_circle(
        &mut self,
        contour: ContourId,
        cx: f64,
        cy: f64,
        radius: f64,
    ) -> GeometryResult<usize> {
        let points = circle_points(&self.arc_params(), DVec2::new(cx, cy), radius, 0.0)?;
        self.append_points(contour, &points)
    }

    /// Appends an arc to an existing contour, start and end points included.
    ///
    /// Angles are in degrees; positive sweeps run counter-clockwise.
    pub fn append_arc(
        &mut self,
        contour: ContourId,
        cx: f64,
        cy: f64,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
    ) -> GeometryResult<usize> {
        let points = arc_points(
            &self.arc_params(),
            DVec2::new(cx, cy),
            radius,
            start_deg,
            sweep_deg,
        )?;
        self.append_points(contour, &points)
    }

    /// Adds a slot as a new counter-clockwise contour.
    ///
    /// `length` is the distance between the cap centers and `width` the
    /// slot's full width.
    #[allow(clippy::too_many_arguments)]
    pub fn add_slot(
        &mut self,
        cx: f64,
        cy: f64,
        length: f64,
        width: f64,
        rotation_deg: f64,
        is_hole: bool,
        is_plated: bool,
    ) -> GeometryResult<ContourId> {
        let points = slot_points(
            &self.arc_params(),
            DVec2::new(cx, cy),
            length,
            width,
            rotation_deg,
        )?;
        self.add_ring(&points, is_hole, is_plated)
    }

    /// Adds a polygon, rotated about the origin and then moved to `(cx, cy)`.
    pub fn add_polygon(
        &mut self,
        points: &[DVec2],
        cx: f64,
        cy: f64,
        rotation_deg: f64,
        is_hole: bool,
        is_plated: bool,
    ) -> GeometryResult<ContourId> {
        let points = polygon_points(points, DVec2::new(cx, cy), rotation_deg)?;
        self.add_ring(&points, is_hole, is_plated)
    }

    fn add_ring(
        &mut self,
        points: &[DVec2],
        is_hole: bool,
        is_plated: bool,
    ) -> GeometryResult<ContourId> {
        let id = self.new_contour(is_hole, is_plated)?;
        self.append_points(id, points)?;
        Ok(id)
    }

    fn append_points(&mut self, contour: ContourId, points: &[DVec2]) -> GeometryResult<usize> {
        let mut stored = 0;
        for p in points {
            if self.push_vertex(contour, p.x, p.y)? {
                stored += 1;
            }
        }
        Ok(stored)
    }
}
