//! Numeric quadrature on intervals.

use crate::cfg::QuadratureCfg;

const GL5_NODES: [f64; 5] = [
    0.0,
    -0.538_469_310_105_683_1,
    0.538_469_310_105_683_1,
    -0.906_179_845_938_664,
    0.906_179_845_938_664,
];
const GL5_WEIGHTS: [f64; 5] = [
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
    0.236_926_885_056_189_1,
];

/// Closed Newton–Cotes rule of order 2 (Simpson).
pub fn simpson<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> f64 {
    (b - a) / 6.0 * (f(a) + 4.0 * f(0.5 * (a + b)) + f(b))
}

/// Five-point Gauss–Legendre; exact for polynomials of degree ≤ 9.
pub fn gauss_legendre<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> f64 {
    let (h, m) = (0.5 * (b - a), 0.5 * (a + b));
    h * GL5_NODES
        .iter()
        .zip(GL5_WEIGHTS)
        .map(|(x, w)| w * f(m + h * x))
        .sum::<f64>()
}

/// Adaptive Gauss–Legendre: bisect until the two halves agree with the whole
/// within `cfg.tolerance` (relative to max(1, |estimate|)), at most `cfg.max_depth` deep.
pub fn adaptive<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, cfg: &QuadratureCfg) -> f64 {
    let whole = gauss_legendre(&f, a, b);
    refine(&f, a, b, whole, cfg.tolerance, 0, cfg)
}

fn refine<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    whole: f64,
    tol: f64,
    depth: usize,
    cfg: &QuadratureCfg,
) -> f64 {
    let m = 0.5 * (a + b);
    let (l, r) = (gauss_legendre(f, a, m), gauss_legendre(f, m, b));
    let sum = l + r;
    if depth >= cfg.max_depth || (sum - whole).abs() <= tol * sum.abs().max(1.0) {
        return sum;
    }
    refine(f, a, m, l, 0.5 * tol, depth + 1, cfg) + refine(f, m, b, r, 0.5 * tol, depth + 1, cfg)
}
