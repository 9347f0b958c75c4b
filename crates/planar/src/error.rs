//! Error taxonomy for curve and shape construction.

use std::fmt;

/// Construction-time failures. Boolean, containment and integration queries on
/// valid shapes never produce these.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// Closure or simplicity violated while building a Jordan curve.
    MalformedCurve { reason: String },
    /// Connected/Disjoint member list violates ordering or relation invariants.
    ShapeConstruction { reason: String },
    /// Zero-size primitive or a curve made only of point segments.
    DegenerateInput { reason: String },
    /// Two segments share a continuous piece that could not be isolated.
    UnsupportedIntersection { segments: (usize, usize) },
}

impl GeometryError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedCurve {
            reason: reason.into(),
        }
    }

    pub(crate) fn construction(reason: impl Into<String>) -> Self {
        Self::ShapeConstruction {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedCurve { reason } => write!(f, "malformed curve: {reason}"),
            Self::ShapeConstruction { reason } => write!(f, "invalid shape members: {reason}"),
            Self::DegenerateInput { reason } => write!(f, "degenerate input: {reason}"),
            Self::UnsupportedIntersection { segments: (a, b) } => write!(
                f,
                "segments {a} and {b} coincide along a piece that could not be isolated"
            ),
        }
    }
}

impl std::error::Error for GeometryError {}
