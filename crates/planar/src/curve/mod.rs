//! Planar curve pieces.
//!
//! Purpose
//! - `Segment`: one parametric piece over [0, 1], either a pair of analytic
//!   functions or a conic arc. Splitting is exact at the split point so that
//!   pieces re-join without gaps.
//! - `PiecewiseCurve`: open chain of segments (sub-arcs of Jordan curves).
//! - `USegment`/`UCurve`: equality up to reparametrization.
//! - `Affine2`, `Box2`: transforms and bounding boxes.
//!
//! External curve sources (splines, NURBS) only need to implement
//! [`ParametricCurve`]; `Segment::hermite` turns one into a segment.

mod affine;
mod arc;
mod bbox;
mod piecewise;
mod segment;
mod unparam;

pub use affine::Affine2;
pub use arc::ConicArc;
pub use bbox::Box2;
pub use piecewise::PiecewiseCurve;
pub use segment::Segment;
pub use unparam::{UCurve, USegment};

use nalgebra::Vector2;

/// A planar curve on the domain [0, 1] with derivatives.
pub trait ParametricCurve {
    fn eval(&self, t: f64) -> Vector2<f64>;
    fn derivative(&self, t: f64, order: usize) -> Vector2<f64>;
    fn tangent(&self, t: f64) -> Vector2<f64> {
        self.derivative(t, 1)
    }
}

/// Point from polar coordinates.
#[inline]
pub fn polar(radius: f64, angle: f64) -> Vector2<f64> {
    let (s, c) = angle.sin_cos();
    Vector2::new(radius * c, radius * s)
}

/// Resolution of direction values: turns are multiples of 2⁻⁵³.
const TURN_GRID: f64 = (1u64 << 53) as f64;

/// Direction of `v` in turns, in [0, 1).
///
/// Results lie on a fixed grid, so sums and differences of directions (sector
/// widths, half-turns) are exact.
#[inline]
pub(crate) fn turns(v: Vector2<f64>) -> f64 {
    let a = v.y.atan2(v.x) / std::f64::consts::TAU;
    let a = if a < 0.0 { a + 1.0 } else { a };
    let a = (a * TURN_GRID).round() / TURN_GRID;
    if a >= 1.0 {
        0.0
    } else {
        a
    }
}

/// The opposite direction of a turn value from [`turns`], exact.
#[inline]
pub(crate) fn opposite(turn: f64) -> f64 {
    if turn < 0.5 {
        turn + 0.5
    } else {
        turn - 0.5
    }
}

#[cfg(test)]
mod tests;
