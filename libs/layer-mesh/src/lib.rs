//! # Layer Mesh
//!
//! Tesselation and extrusion of flat PCB layer geometry: copper pours,
//! silkscreen strokes, solder-mask openings, board outlines and drills.
//!
//! ## Architecture
//!
//! ```text
//! points / primitives → ContourSet → normalize_windings → triangulate
//!                                                            ↓
//!                                         to_2d_mesh / to_3d_mesh → writer
//! ```
//!
//! ## Modules
//!
//! - [`vertex`]: vertex pool with stable handles
//! - [`contour`]: contours and the per-layer [`ContourSet`]
//! - [`primitives`]: circles, arcs, slots and polygons
//! - [`winding`]: solid/hole orientation
//! - [`tesselate`]: validation, merging of overlapping contours and earcut caps
//! - [`extract`]: flat sheets and extruded solids
//! - [`batch`]: parallel tesselation of independent layers
//!
//! ## Usage
//!
//! ```rust
//! use layer_mesh::ContourSet;
//!
//! let mut pad = ContourSet::new();
//! pad.add_slot(0.0, 0.0, 2.0, 1.2, 0.0, false, true).unwrap();
//! pad.add_circle(-1.0, 0.0, 0.3, true, true).unwrap();
//! pad.add_circle(1.0, 0.0, 0.3, true, true).unwrap();
//! pad.tesselate().unwrap();
//!
//! let solid = pad.to_3d_mesh(0.035, 0.0).unwrap();
//! assert_eq!(solid.boundary_edge_count(), 0);
//! ```

pub mod batch;
pub mod contour;
pub mod error;
pub mod extract;
pub mod mesh;
pub mod params;
pub mod predicates;
pub mod primitives;
pub mod tesselate;
pub mod vertex;
pub mod winding;

pub use batch::tesselate_layers;
pub use contour::{Contour, ContourId, ContourSet};
pub use error::{FaultKind, GeometryError, GeometryResult, TesselationFault};
pub use mesh::{Mesh2D, Mesh3D};
pub use params::ArcParams;
pub use tesselate::{triangulate, Triangle};
pub use vertex::{Vertex, VertexId, VertexPool};
pub use winding::normalize_windings;
