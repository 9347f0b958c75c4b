//! Green's theorem reduction of area integrals to boundary integrals.
//!
//! `∬ xᵃ yᵇ dA = 1/(a+b+2) ∮ xᵃ yᵇ (x dy − y dx)`, summed per segment as
//! `∫₀¹ x(t)ᵃ y(t)ᵇ (x y′ − y x′) dt`. Analytic segments integrate in closed form;
//! conic arcs (and any external `ParametricCurve`) go through adaptive quadrature.

use super::quadrature;
use crate::cfg::QuadratureCfg;
use crate::curve::{ParametricCurve, Segment};

fn integrand<C: ParametricCurve + ?Sized>(c: &C, a: u32, b: u32, t: f64) -> f64 {
    let p = c.eval(t);
    let d = c.derivative(t, 1);
    p.x.powi(a as i32) * p.y.powi(b as i32) * (p.x * d.y - p.y * d.x)
}

/// `∫₀¹ xᵃ yᵇ (x y′ − y x′) dt` over one segment.
pub(crate) fn segment_term(seg: &Segment, a: u32, b: u32, cfg: &QuadratureCfg) -> f64 {
    match seg {
        Segment::Analytic { x, y } => {
            let (px, py) = (x.to_polynomial(), y.to_polynomial());
            let w = &(&px * &py.derivative()) - &(&py * &px.derivative());
            (&(&px.powi(a) * &py.powi(b)) * &w).integrate(0.0, 1.0)
        }
        Segment::Conic(_) => quadrature::adaptive(|t| integrand(seg, a, b, t), 0.0, 1.0, cfg),
    }
}

/// `∬ xᵃ yᵇ dA` over the region left of the closed chain `segments`.
pub fn boundary_integral(segments: &[Segment], a: u32, b: u32, cfg: &QuadratureCfg) -> f64 {
    let sum: f64 = segments.iter().map(|s| segment_term(s, a, b, cfg)).sum();
    sum / (a + b + 2) as f64
}

/// Same reduction for a closed chain of external curves.
pub fn curve_integral<C: ParametricCurve>(
    pieces: &[C],
    a: u32,
    b: u32,
    cfg: &QuadratureCfg,
) -> f64 {
    let sum: f64 = pieces
        .iter()
        .map(|c| quadrature::adaptive(|t| integrand(c, a, b, t), 0.0, 1.0, cfg))
        .sum();
    sum / (a + b + 2) as f64
}
