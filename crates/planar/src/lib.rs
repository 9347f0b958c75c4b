//! Boolean algebra over curved planar regions.
//!
//! Layers, leaves first:
//! - `analytic`: scalar functions on [0,1] in power or Bernstein basis.
//! - `curve`: planar segments (analytic pairs and conic arcs), boxes, affine maps.
//! - `jordan`: closed simple curves, intersection, splitting, winding.
//! - `shape`: canonical regions, lazy boolean expressions, containment.
//! - `integrate`: Green's-theorem integrals of monomials over regions.
//!
//! API Policy
//! - Everything returns new values; nothing mutates in place.
//! - Construction fails early with [`GeometryError`]; boolean, containment and
//!   integration queries on valid shapes are total.

pub mod analytic;
pub mod cfg;
pub mod curve;
pub mod error;
pub mod integrate;
pub mod jordan;
pub mod shape;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::GeometryError;
pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::analytic::{AnalyticFunction, Bezier, Polynomial};
    pub use crate::cfg::QuadratureCfg;
    pub use crate::curve::{
        polar, Affine2, Box2, ConicArc, ParametricCurve, PiecewiseCurve, Segment,
    };
    pub use crate::error::GeometryError;
    pub use crate::integrate::{area, centroid, integrate_monomial, moment};
    pub use crate::jordan::{Intersection, JordanCurve};
    pub use crate::shape::primitive;
    pub use crate::shape::{
        ConnectedShape, Density, DisjointShape, Lazy, Shape, SimpleShape,
    };
    pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
}

/// Signed area of the parallelogram spanned by vectors `a` and `b` in R².
/// Positive for a→b counterclockwise, negative otherwise.
#[inline]
pub fn parallelogram_area(a: Vec2<f64>, b: Vec2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
