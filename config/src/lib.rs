//! # Config Crate
//!
//! Centralized configuration constants for the layer meshing pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{VERTEX_EPSILON, DEFAULT_MAX_SEGMENTS, DEFAULT_MIN_CHORD};
//!
//! // Use VERTEX_EPSILON to reject coincident points
//! let dx: f64 = 1e-9;
//! assert!(dx.abs() < VERTEX_EPSILON);
//!
//! // Use discretization defaults when the caller sets nothing
//! let segments = DEFAULT_MAX_SEGMENTS;
//! assert!(segments >= 3);
//! assert!(DEFAULT_MIN_CHORD > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Unit Agnostic**: Lengths are in the caller's unit, tuned for millimeters
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
