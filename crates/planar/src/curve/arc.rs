//! Conic arcs `p(θ) = c + M (cos θ, sin θ)` for θ from θ₀ to θ₁.
//!
//! Circles and ellipses are not polynomial in their parameter, so they get their
//! own segment family. End points are stored explicitly: trigonometry at θ₁ = 2π
//! does not land exactly on the start, and Jordan closure is checked exactly.

use super::{Affine2, Box2};
use nalgebra::{Matrix2, Vector2};
use std::f64::consts::{PI, TAU};

#[derive(Clone, Debug, PartialEq)]
pub struct ConicArc {
    center: Vector2<f64>,
    axes: Matrix2<f64>,
    theta0: f64,
    theta1: f64,
    p0: Vector2<f64>,
    p1: Vector2<f64>,
}

impl ConicArc {
    pub fn new(center: Vector2<f64>, axes: Matrix2<f64>, theta0: f64, theta1: f64) -> Self {
        let p0 = center + axes * Vector2::new(theta0.cos(), theta0.sin());
        let p1 = center + axes * Vector2::new(theta1.cos(), theta1.sin());
        Self::with_points(center, axes, theta0, theta1, p0, p1)
    }

    /// Arc with caller-supplied end points (must lie on the conic at θ₀, θ₁).
    pub fn with_points(
        center: Vector2<f64>,
        axes: Matrix2<f64>,
        theta0: f64,
        theta1: f64,
        p0: Vector2<f64>,
        p1: Vector2<f64>,
    ) -> Self {
        Self {
            center,
            axes,
            theta0,
            theta1,
            p0,
            p1,
        }
    }

    pub fn circular(center: Vector2<f64>, radius: f64, theta0: f64, theta1: f64) -> Self {
        Self::new(center, Matrix2::identity() * radius, theta0, theta1)
    }

    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        self.center
    }
    #[inline]
    pub fn axes(&self) -> &Matrix2<f64> {
        &self.axes
    }
    #[inline]
    pub fn theta0(&self) -> f64 {
        self.theta0
    }
    #[inline]
    pub fn theta1(&self) -> f64 {
        self.theta1
    }
    /// Signed swept angle θ₁ − θ₀.
    #[inline]
    pub fn sweep(&self) -> f64 {
        self.theta1 - self.theta0
    }
    #[inline]
    pub fn start(&self) -> Vector2<f64> {
        self.p0
    }
    #[inline]
    pub fn end(&self) -> Vector2<f64> {
        self.p1
    }

    #[inline]
    fn angle(&self, t: f64) -> f64 {
        self.theta0 + t * self.sweep()
    }

    #[inline]
    pub fn point_at_angle(&self, theta: f64) -> Vector2<f64> {
        self.center + self.axes * Vector2::new(theta.cos(), theta.sin())
    }

    pub fn eval(&self, t: f64) -> Vector2<f64> {
        if t == 0.0 {
            self.p0
        } else if t == 1.0 {
            self.p1
        } else {
            self.point_at_angle(self.angle(t))
        }
    }

    pub fn derivative(&self, t: f64, order: usize) -> Vector2<f64> {
        if order == 0 {
            return self.eval(t);
        }
        let (s, c) = self.angle(t).sin_cos();
        let v = match order % 4 {
            1 => Vector2::new(-s, c),
            2 => Vector2::new(-c, -s),
            3 => Vector2::new(s, -c),
            _ => Vector2::new(c, s),
        };
        self.axes * v * self.sweep().powi(order as i32)
    }

    /// Sub-arc over parameters [a, b], rescaled to [0, 1].
    pub fn restrict(&self, a: f64, b: f64) -> ConicArc {
        ConicArc {
            center: self.center,
            axes: self.axes,
            theta0: self.angle(a),
            theta1: self.angle(b),
            p0: self.eval(a),
            p1: self.eval(b),
        }
    }

    pub fn split_at(&self, t: f64) -> (ConicArc, ConicArc) {
        (self.restrict(0.0, t), self.restrict(t, 1.0))
    }

    pub fn reverse(&self) -> ConicArc {
        ConicArc {
            center: self.center,
            axes: self.axes,
            theta0: self.theta1,
            theta1: self.theta0,
            p0: self.p1,
            p1: self.p0,
        }
    }

    pub fn transform(&self, f: &Affine2) -> ConicArc {
        ConicArc {
            center: f.apply(self.center),
            axes: f.m * self.axes,
            theta0: self.theta0,
            theta1: self.theta1,
            p0: f.apply(self.p0),
            p1: f.apply(self.p1),
        }
    }

    /// Replace the stored end points (used to snap onto shared graph nodes).
    pub fn with_endpoints(&self, p0: Vector2<f64>, p1: Vector2<f64>) -> ConicArc {
        ConicArc {
            p0,
            p1,
            ..self.clone()
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.sweep() == 0.0 || self.axes.determinant() == 0.0
    }

    /// Parameter at which the arc passes angle `theta` (mod 2π), if it does.
    pub fn param_of_angle(&self, theta: f64) -> Option<f64> {
        let w = self.sweep();
        if w == 0.0 {
            return None;
        }
        (-3..=3).find_map(|k| {
            let t = (theta + k as f64 * TAU - self.theta0) / w;
            (-1e-12..=1.0 + 1e-12).contains(&t).then(|| t.clamp(0.0, 1.0))
        })
    }

    /// Conic angle of `p` (exact when `p` lies on the conic).
    pub fn angle_of_point(&self, p: Vector2<f64>) -> Option<f64> {
        let q = self.axes.try_inverse()? * (p - self.center);
        Some(q.y.atan2(q.x))
    }

    pub fn bounding_box(&self) -> Box2 {
        let mut b = Box2::from_point(self.p0).include(self.p1);
        for row in 0..2 {
            let phi = self.axes[(row, 1)].atan2(self.axes[(row, 0)]);
            for theta in [phi, phi + PI] {
                if let Some(t) = self.param_of_angle(theta) {
                    b = b.include(self.point_at_angle(self.angle(t)));
                }
            }
        }
        b
    }
}
