//! Tolerance defaults and numeric configuration.
//!
//! Policy
//! - Geometric tolerances are fixed constants to avoid “tolerance juggling”
//!   across call sites. Coordinates are assumed to be of order 1..1e3.
//! - Quadrature is the one place callers tune accuracy, via `QuadratureCfg`.

/// Two points closer than this are the same point (closure checks are exact; this
/// is for intersection dedup and on-curve detection).
pub(crate) const EPS_POINT: f64 = 1e-9;
/// Intersection points closer than this collapse into one graph node.
pub(crate) const EPS_NODE: f64 = 1e-7;
/// Adjacent segments may meet this close to their shared vertex without counting
/// as a self-intersection (tangential joints make roots imprecise there).
pub(crate) const EPS_ADJACENT: f64 = 1e-6;
/// Unit tangents whose cross product is below this meet smoothly (G1 joints).
pub(crate) const EPS_ANGLE: f64 = 1e-9;
/// Parameters closer than this to 0 or 1 snap onto the segment end.
pub(crate) const EPS_PARAM: f64 = 1e-9;
/// Relative tolerance under which a polynomial value counts as zero.
pub(crate) const EPS_ROOT: f64 = 1e-11;
/// Bound on recursive bisection (winding accumulation, subdivision intersection).
pub(crate) const MAX_SUBDIVISION: usize = 48;
/// Iteration cap for Newton refinement.
pub(crate) const NEWTON_ITERS: usize = 64;

/// Adaptive quadrature configuration for non-polynomial boundary segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadratureCfg {
    /// Stop refining once successive estimates agree within this (relative to max(1, |I|)).
    pub tolerance: f64,
    /// Maximum bisection depth; guarantees termination.
    pub max_depth: usize,
}

impl Default for QuadratureCfg {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_depth: 20,
        }
    }
}
