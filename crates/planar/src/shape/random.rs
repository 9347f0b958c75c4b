//! Random star-shaped polygons (radial jitter + replay tokens).
//!
//! Purpose
//! - Small, deterministic sampler of simple polygons for property tests and
//!   benchmarks of the boolean engine.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, and connect the points in angular order. Angular jitter is
//!   clamped so that the order never changes and consecutive angles stay less
//!   than π apart: the polygon is star-shaped around its center, hence simple.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use super::Shape;
use crate::error::GeometryError;
use crate::jordan::JordanCurve;
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49]
    /// (less for triangles).
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude). Radii = `base_radius * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    /// Star center.
    pub center: Vector2<f64>,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}
impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            center: Vector2::zeros(),
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Vertices of a random star-shaped polygon, counterclockwise.
pub fn draw_vertices_radial(cfg: RadialCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg
        .angle_jitter_frac
        .clamp(0.0, 0.49)
        .min(0.25 * (n as f64 - 2.0) - 0.01);
    let rj = cfg.radial_jitter.clamp(0.0, 0.99);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + (k as f64) * delta + jitter;
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            cfg.center + Vector2::new(th.cos(), th.sin()) * (1.0 + u) * r0
        })
        .collect()
}

/// Random star-shaped polygon as a bounded simple shape.
pub fn draw_polygon_radial(cfg: RadialCfg, tok: ReplayToken) -> Result<Shape, GeometryError> {
    Ok(JordanCurve::from_points(&draw_vertices_radial(cfg, tok))?.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draw() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Fixed(10),
            angle_jitter_frac: 0.2,
            radial_jitter: 0.1,
            ..RadialCfg::default()
        };
        let tok = ReplayToken { seed: 42, index: 7 };
        let p1 = draw_vertices_radial(cfg, tok);
        let p2 = draw_vertices_radial(cfg, tok);
        assert_eq!(p1.len(), 10);
        assert_eq!(p1, p2);
        let other = draw_vertices_radial(cfg, ReplayToken { seed: 42, index: 8 });
        assert_ne!(p1, other);
    }

    #[test]
    fn drawn_polygons_are_simple_and_bounded() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Uniform { min: 3, max: 16 },
            center: Vector2::new(2.0, -1.0),
            ..RadialCfg::default()
        };
        for index in 0..20 {
            let shape = draw_polygon_radial(cfg, ReplayToken { seed: 5, index }).unwrap();
            assert!(shape.is_bounded());
            assert!(shape.area() > 0.0);
            assert!(shape.contains_point(cfg.center));
        }
    }
}
