//! Error types for planum operations.

use thiserror::Error;

/// Errors that can occur during overlay, relate and transform operations.
///
/// An operation that legitimately produces nothing is not an error: it
/// returns an empty geometry collection instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanumError {
    /// Operand kinds are incompatible with the requested operation.
    #[error("{operation}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the operation that was requested.
        operation: &'static str,
        /// Geometry kinds the operation accepts.
        expected: &'static str,
        /// Geometry kind that was supplied.
        found: &'static str,
    },

    /// The operation is not defined for this geometry kind.
    #[error("{operation} is not supported for {found}")]
    UnsupportedGeometry {
        /// Name of the operation that was requested.
        operation: &'static str,
        /// Geometry kind that was supplied.
        found: &'static str,
    },

    /// A polygon ring is malformed.
    #[error("invalid ring: {reason}")]
    InvalidRing {
        /// What is wrong with the ring.
        reason: RingDefect,
    },

    /// A line has fewer than two distinct coordinates.
    #[error("degenerate line: fewer than two distinct coordinates")]
    DegenerateLine,

    /// A coordinate is NaN or infinite.
    #[error("coordinate is not finite")]
    InvalidCoordinate,

    /// A DE-9IM pattern is malformed.
    #[error("invalid DE-9IM pattern {0:?}")]
    InvalidPattern(String),

    /// A transform parameter is out of range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Accepted range.
        reason: &'static str,
    },
}

impl PlanumError {
    pub(crate) fn ring(reason: RingDefect) -> Self {
        PlanumError::InvalidRing { reason }
    }
}

/// The specific defect that made a ring invalid.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RingDefect {
    /// First and last coordinates differ.
    #[error("ring is not closed")]
    NotClosed,
    /// Fewer than four coordinates.
    #[error("ring has {count} coordinates, at least 4 required")]
    TooFewPoints {
        /// Number of coordinates found.
        count: usize,
    },
    /// Fewer than three distinct vertices.
    #[error("ring has fewer than 3 distinct vertices")]
    TooFewDistinctVertices,
    /// The ring encloses no area.
    #[error("ring has zero area")]
    ZeroArea,
    /// The ring touches or crosses itself.
    #[error("ring self-intersects at ({x}, {y})")]
    SelfIntersection {
        /// X ordinate of the offending point.
        x: f64,
        /// Y ordinate of the offending point.
        y: f64,
    },
    /// A hole lies (partly) outside its shell.
    #[error("hole lies outside its shell")]
    HoleOutsideShell,
    /// A hole lies inside another hole.
    #[error("hole lies inside another hole")]
    NestedHoles,
    /// Two rings of one polygon cross or share an edge.
    #[error("rings cross at ({x}, {y})")]
    RingsCross {
        /// X ordinate of the offending point.
        x: f64,
        /// Y ordinate of the offending point.
        y: f64,
    },
}
