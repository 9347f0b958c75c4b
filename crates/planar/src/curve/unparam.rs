//! Parametrization-free views of segments and chains.
//!
//! `USegment(a) == USegment(b)` iff both trace the same point set in the same
//! direction, regardless of speed or subdivision. The boolean engine uses this
//! to merge boundary pieces shared by two curves.

use super::{PiecewiseCurve, Segment};
use nalgebra::Vector2;

/// Distance under which a sample counts as lying on the other trace.
const EPS_TRACE: f64 = 1e-7;
const SAMPLES: usize = 8;

trait Trace {
    fn span(&self) -> f64;
    fn at(&self, s: f64) -> Vector2<f64>;
    fn locate(&self, p: Vector2<f64>) -> (f64, f64);
}

impl Trace for Segment {
    fn span(&self) -> f64 {
        1.0
    }
    fn at(&self, s: f64) -> Vector2<f64> {
        self.eval(s)
    }
    fn locate(&self, p: Vector2<f64>) -> (f64, f64) {
        self.project(p)
    }
}

impl Trace for PiecewiseCurve {
    fn span(&self) -> f64 {
        self.len() as f64
    }
    fn at(&self, s: f64) -> Vector2<f64> {
        self.eval(s)
    }
    fn locate(&self, p: Vector2<f64>) -> (f64, f64) {
        self.project(p)
    }
}

/// Every interior sample of `a` lies on `b`, visited in increasing `b` order.
fn covered_by<A: Trace, B: Trace>(a: &A, b: &B) -> bool {
    let mut last = f64::NEG_INFINITY;
    for k in 1..SAMPLES {
        let (s, d) = b.locate(a.at(a.span() * k as f64 / SAMPLES as f64));
        if d > EPS_TRACE || s < last {
            return false;
        }
        last = s;
    }
    true
}

fn same_trace<A: Trace, B: Trace>(a: &A, b: &B) -> bool {
    (a.at(0.0) - b.at(0.0)).norm() <= EPS_TRACE
        && (a.at(a.span()) - b.at(b.span())).norm() <= EPS_TRACE
        && covered_by(a, b)
        && covered_by(b, a)
}

/// Equality view over a segment.
#[derive(Clone, Copy, Debug)]
pub struct USegment<'a>(pub &'a Segment);

impl PartialEq for USegment<'_> {
    fn eq(&self, other: &Self) -> bool {
        same_trace(self.0, other.0)
    }
}

/// Equality view over a chain of segments.
#[derive(Clone, Copy, Debug)]
pub struct UCurve<'a>(pub &'a PiecewiseCurve);

impl PartialEq for UCurve<'_> {
    fn eq(&self, other: &Self) -> bool {
        same_trace(self.0, other.0)
    }
}
