//! # Geometry Errors
//!
//! Error types for contour building, tesselation and mesh extraction.
//!
//! ## Error Policy
//!
//! - Every failure is a typed error, never an empty result
//! - Faults are deterministic: the same input fails the same way
//! - The caller decides whether a failed layer aborts the export

use crate::contour::ContourId;
use config::constants::ConfigError;
use thiserror::Error;

/// What went wrong inside the triangulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// An edge of the contour crosses or touches another edge of the same contour.
    SelfIntersection,
    /// An edge of a hole crosses or touches an edge of a solid.
    ContourCrossing,
    /// No triangulation of the outline covers its area.
    Unresolved,
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FaultKind::SelfIntersection => "self-intersecting contour",
            FaultKind::ContourCrossing => "contours cross or touch",
            FaultKind::Unresolved => "no triangulation covers the outline",
        };
        f.write_str(text)
    }
}

/// A triangulation failure, pinned to the contour and vertex that caused it.
///
/// `vertex` is the position of the offending vertex inside the contour's
/// (normalized) vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tesselation fault in contour {contour} at vertex {vertex}: {kind}")]
pub struct TesselationFault {
    /// Contour holding the offending vertex.
    pub contour: ContourId,
    /// Index of the vertex inside that contour.
    pub vertex: usize,
    /// Failure category.
    pub kind: FaultKind,
}

/// Errors that can occur while building, tesselating or extracting a layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A primitive was requested with a zero or negative size.
    #[error("Degenerate shape: {message}")]
    DegenerateShape { message: String },

    /// A hard vertex or contour ceiling was reached.
    #[error("Pool exhausted: {what} limit of {limit} reached")]
    PoolExhausted { what: &'static str, limit: usize },

    /// The triangulator rejected the contour set.
    #[error(transparent)]
    Tesselation(#[from] TesselationFault),

    /// A contour id that does not belong to this set.
    #[error("Unknown contour: {0}")]
    UnknownContour(ContourId),

    /// Mesh extraction was requested before a successful tesselation.
    #[error("Contour set has not been tesselated")]
    NotTesselated,

    /// Discretization parameters failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl GeometryError {
    /// Creates a degenerate shape error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateShape {
            message: message.into(),
        }
    }

    /// Creates a pool exhaustion error.
    pub fn exhausted(what: &'static str, limit: usize) -> Self {
        Self::PoolExhausted { what, limit }
    }
}

/// Result type alias for layer meshing operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_display_names_contour_and_vertex() {
        let fault = TesselationFault {
            contour: ContourId(3),
            vertex: 7,
            kind: FaultKind::SelfIntersection,
        };
        let text = fault.to_string();
        assert!(text.contains("contour 3"));
        assert!(text.contains("vertex 7"));
        assert!(text.contains("self-intersecting"));
    }

    #[test]
    fn test_fault_converts_into_geometry_error() {
        let fault = TesselationFault {
            contour: ContourId(0),
            vertex: 0,
            kind: FaultKind::Unresolved,
        };
        let err: GeometryError = fault.into();
        assert_eq!(err, GeometryError::Tesselation(fault));
        assert_eq!(err.to_string(), fault.to_string());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeometryError>();
    }
}
