//! Integrals of monomials over shapes.
//!
//! Purpose
//! - `integrate_monomial(shape, a, b)` = ∬ xᵃ yᵇ dA via Green's theorem over
//!   every boundary curve of the shape.
//! - Composite shapes add their members' boundary integrals: holes are clockwise
//!   and subtract themselves.
//!
//! Conventions
//! - Empty → 0. Whole → +∞ for the area, NaN for other moments.
//! - A shape bounded by a clockwise curve (unbounded region) reports the signed
//!   boundary integral, i.e. minus the integral over the excluded disk. The
//!   containment rules read the sign of this value.

pub mod green;
pub mod quadrature;

use crate::cfg::QuadratureCfg;
use crate::jordan::JordanCurve;
use crate::shape::Shape;
use nalgebra::Vector2;

fn jordan_integral(j: &JordanCurve, a: u32, b: u32, cfg: &QuadratureCfg) -> f64 {
    if a == 0 && b == 0 && *cfg == QuadratureCfg::default() {
        j.area()
    } else {
        green::boundary_integral(j.segments(), a, b, cfg)
    }
}

/// `∬_shape xᵃ yᵇ dx dy`.
pub fn integrate_monomial(shape: &Shape, a: u32, b: u32, cfg: &QuadratureCfg) -> f64 {
    match shape {
        Shape::Empty => 0.0,
        Shape::Whole => {
            if a == 0 && b == 0 {
                f64::INFINITY
            } else {
                f64::NAN
            }
        }
        Shape::Simple(s) => jordan_integral(s.jordan(), a, b, cfg),
        Shape::Connected(c) => c
            .members()
            .iter()
            .map(|s| jordan_integral(s.jordan(), a, b, cfg))
            .sum(),
        Shape::Disjoint(d) => d
            .members()
            .iter()
            .map(|m| integrate_monomial(m, a, b, cfg))
            .sum(),
    }
}

pub fn area(shape: &Shape) -> f64 {
    integrate_monomial(shape, 0, 0, &QuadratureCfg::default())
}

pub fn moment(shape: &Shape, a: u32, b: u32) -> f64 {
    integrate_monomial(shape, a, b, &QuadratureCfg::default())
}

/// Area centroid; `None` for empty, unbounded or zero-area shapes.
pub fn centroid(shape: &Shape) -> Option<Vector2<f64>> {
    let m = area(shape);
    if !(m.is_finite() && m > 0.0) || !shape.is_bounded() {
        return None;
    }
    Some(Vector2::new(moment(shape, 1, 0) / m, moment(shape, 0, 1) / m))
}
