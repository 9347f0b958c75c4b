//! Planar segments on the parameter domain [0, 1].

use super::{Affine2, Box2, ConicArc, ParametricCurve};
use crate::analytic::{AnalyticFunction, Bezier};
use crate::error::GeometryError;
use nalgebra::Vector2;

/// A planar parametric curve over [0, 1].
///
/// - `Analytic`: a pair of analytic coordinate functions sharing the domain.
/// - `Conic`: an elliptic or circular arc.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    Analytic {
        x: AnalyticFunction,
        y: AnalyticFunction,
    },
    Conic(ConicArc),
}

impl Segment {
    /// Straight segment from `p` to `q` (Bezier of degree 1).
    pub fn linear(p: Vector2<f64>, q: Vector2<f64>) -> Self {
        Self::Analytic {
            x: AnalyticFunction::bezier(vec![p.x, q.x]),
            y: AnalyticFunction::bezier(vec![p.y, q.y]),
        }
    }

    /// Bezier segment from its control points (at least two).
    pub fn bezier(points: &[Vector2<f64>]) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::degenerate(format!(
                "bezier segment needs at least 2 control points, got {}",
                points.len()
            )));
        }
        Ok(Self::Analytic {
            x: AnalyticFunction::bezier(points.iter().map(|p| p.x).collect()),
            y: AnalyticFunction::bezier(points.iter().map(|p| p.y).collect()),
        })
    }

    /// Power-basis segment `(Σ x_k t^k, Σ y_k t^k)`.
    pub fn polynomial(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self::Analytic {
            x: AnalyticFunction::polynomial(x),
            y: AnalyticFunction::polynomial(y),
        }
    }

    pub fn from_functions(x: AnalyticFunction, y: AnalyticFunction) -> Self {
        Self::Analytic { x, y }
    }

    pub fn conic(arc: ConicArc) -> Self {
        Self::Conic(arc)
    }

    /// Cubic Hermite segment matching an external curve's end points and end tangents.
    pub fn hermite<C: ParametricCurve + ?Sized>(curve: &C) -> Self {
        let (p0, p1) = (curve.eval(0.0), curve.eval(1.0));
        let (d0, d1) = (curve.derivative(0.0, 1), curve.derivative(1.0, 1));
        Self::Analytic {
            x: AnalyticFunction::bezier(vec![p0.x, p0.x + d0.x / 3.0, p1.x - d1.x / 3.0, p1.x]),
            y: AnalyticFunction::bezier(vec![p0.y, p0.y + d0.y / 3.0, p1.y - d1.y / 3.0, p1.y]),
        }
    }

    pub fn eval(&self, t: f64) -> Vector2<f64> {
        match self {
            Self::Analytic { x, y } => Vector2::new(x.eval(t), y.eval(t)),
            Self::Conic(arc) => arc.eval(t),
        }
    }

    /// `order`-th derivative at `t` (order 0 is the point itself).
    pub fn derivative(&self, t: f64, order: usize) -> Vector2<f64> {
        match self {
            Self::Analytic { x, y } => {
                Vector2::new(x.eval_derivative(t, order), y.eval_derivative(t, order))
            }
            Self::Conic(arc) => arc.derivative(t, order),
        }
    }

    #[inline]
    pub fn start(&self) -> Vector2<f64> {
        match self {
            Self::Conic(arc) => arc.start(),
            _ => self.eval(0.0),
        }
    }

    #[inline]
    pub fn end(&self) -> Vector2<f64> {
        match self {
            Self::Conic(arc) => arc.end(),
            _ => self.eval(1.0),
        }
    }

    /// Polynomial degree of an analytic segment; `None` for conic arcs.
    pub fn degree(&self) -> Option<usize> {
        match self {
            Self::Analytic { x, y } => Some(x.degree().max(y.degree())),
            Self::Conic(_) => None,
        }
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self.degree(), Some(d) if d <= 1)
    }

    /// A point segment: both coordinate functions constant.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Analytic { x, y } => x.is_constant() && y.is_constant(),
            Self::Conic(arc) => arc.is_degenerate(),
        }
    }

    /// Exact box: end points plus interior coordinate extrema.
    pub fn bounding_box(&self) -> Box2 {
        match self {
            Self::Analytic { x, y } => {
                let mut b = Box2::from_point(self.start()).include(self.end());
                for f in [x, y] {
                    for t in f.to_polynomial().derivative().roots_in(0.0, 1.0) {
                        b = b.include(self.eval(t));
                    }
                }
                b
            }
            Self::Conic(arc) => arc.bounding_box(),
        }
    }

    /// Split at `t`; both halves share the split point bit-for-bit.
    pub fn split_at(&self, t: f64) -> (Segment, Segment) {
        match self {
            Self::Analytic { x, y } => {
                let (xl, xr) = x.to_bezier().split_at(t);
                let (yl, yr) = y.to_bezier().split_at(t);
                (Self::from_beziers(xl, yl), Self::from_beziers(xr, yr))
            }
            Self::Conic(arc) => {
                let (l, r) = arc.split_at(t);
                (Self::Conic(l), Self::Conic(r))
            }
        }
    }

    /// The piece over [a, b], reparametrized to [0, 1].
    pub fn restrict(&self, a: f64, b: f64) -> Segment {
        if a == 0.0 && b == 1.0 {
            return self.clone();
        }
        match self {
            Self::Analytic { x, y } => {
                Self::from_beziers(x.to_bezier().restrict(a, b), y.to_bezier().restrict(a, b))
            }
            Self::Conic(arc) => Self::Conic(arc.restrict(a, b)),
        }
    }

    pub fn reverse(&self) -> Segment {
        match self {
            Self::Analytic { x, y } => Self::Analytic {
                x: reverse_fn(x),
                y: reverse_fn(y),
            },
            Self::Conic(arc) => Self::Conic(arc.reverse()),
        }
    }

    pub fn transform(&self, f: &Affine2) -> Segment {
        match self {
            Self::Analytic { x, y } => Self::Analytic {
                x: (&(x * f.m[(0, 0)]) + &(y * f.m[(0, 1)])).add_constant(f.t.x),
                y: (&(x * f.m[(1, 0)]) + &(y * f.m[(1, 1)])).add_constant(f.t.y),
            },
            Self::Conic(arc) => Self::Conic(arc.transform(f)),
        }
    }

    /// Same segment with its end points moved onto `p0`, `p1` (nearby graph nodes).
    pub fn with_endpoints(&self, p0: Vector2<f64>, p1: Vector2<f64>) -> Segment {
        match self {
            Self::Analytic { x, y } => {
                let snap = |f: &AnalyticFunction, a: f64, b: f64| {
                    let bz = f.to_bezier();
                    let mut ctrl = bz.elevate(bz.order().max(1)).ctrl().to_vec();
                    let n = ctrl.len() - 1;
                    ctrl[0] = a;
                    ctrl[n] = b;
                    AnalyticFunction::Bezier(Bezier::new(ctrl))
                };
                Self::Analytic {
                    x: snap(x, p0.x, p1.x),
                    y: snap(y, p0.y, p1.y),
                }
            }
            Self::Conic(arc) => Self::Conic(arc.with_endpoints(p0, p1)),
        }
    }

    /// Closest parameter to `p` and its distance.
    pub fn project(&self, p: Vector2<f64>) -> (f64, f64) {
        let mut candidates = vec![0.0, 1.0];
        match self {
            _ if self.is_linear() => {
                let (a, b) = (self.start(), self.end());
                let d = b - a;
                let len2 = d.norm_squared();
                if len2 > 0.0 {
                    candidates.push(((p - a).dot(&d) / len2).clamp(0.0, 1.0));
                }
            }
            Self::Conic(arc) => {
                if let Some(t) = arc.angle_of_point(p).and_then(|th| arc.param_of_angle(th)) {
                    candidates.push(t);
                }
                candidates.extend((1..16).map(|k| k as f64 / 16.0));
            }
            Self::Analytic { .. } => candidates.extend((1..32).map(|k| k as f64 / 32.0)),
        }
        let dist = |t: f64| (self.eval(t) - p).norm();
        let mut best = candidates
            .into_iter()
            .map(|t| (t, dist(t)))
            .fold((0.0, f64::INFINITY), |acc, c| if c.1 < acc.1 { c } else { acc });
        if self.is_linear() {
            return best;
        }
        let mut t = best.0;
        for _ in 0..crate::cfg::NEWTON_ITERS {
            let r = self.eval(t) - p;
            let d1 = self.derivative(t, 1);
            let d2 = self.derivative(t, 2);
            let g = r.dot(&d1);
            let dg = d1.norm_squared() + r.dot(&d2);
            if dg <= 0.0 {
                break;
            }
            let next = (t - g / dg).clamp(0.0, 1.0);
            let dn = dist(next);
            if dn < best.1 {
                best = (next, dn);
            }
            if (next - t).abs() <= 1e-15 {
                break;
            }
            t = next;
        }
        best
    }

    /// Direction of travel when leaving the point at `t`.
    pub fn heading_out(&self, t: f64) -> Vector2<f64> {
        for k in 1..=3 {
            let d = self.derivative(t, k);
            if d.norm() > 1e-12 {
                return d;
            }
        }
        self.eval((t + 1e-3).min(1.0)) - self.eval(t)
    }

    /// Direction of travel when arriving at the point at `t`.
    pub fn heading_in(&self, t: f64) -> Vector2<f64> {
        for k in 1..=3 {
            let d = self.derivative(t, k);
            if d.norm() > 1e-12 {
                return if k % 2 == 1 { d } else { -d };
            }
        }
        self.eval(t) - self.eval((t - 1e-3).max(0.0))
    }

    fn from_beziers(x: Bezier, y: Bezier) -> Segment {
        Self::Analytic {
            x: AnalyticFunction::Bezier(x),
            y: AnalyticFunction::Bezier(y),
        }
    }
}

fn reverse_fn(f: &AnalyticFunction) -> AnalyticFunction {
    match f {
        AnalyticFunction::Bezier(b) => AnalyticFunction::Bezier(b.reverse()),
        AnalyticFunction::Polynomial(_) => f.compose_affine(-1.0, 1.0),
    }
}

impl ParametricCurve for Segment {
    fn eval(&self, t: f64) -> Vector2<f64> {
        Segment::eval(self, t)
    }
    fn derivative(&self, t: f64, order: usize) -> Vector2<f64> {
        Segment::derivative(self, t, order)
    }
}
