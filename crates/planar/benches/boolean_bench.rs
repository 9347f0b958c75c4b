//! Criterion benchmarks for boolean operations on random star polygons.
//! Focus sizes: vertices per polygon n in {4, 8, 16, 32, 64}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p planar

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use planar::shape::random::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
use planar::shape::Shape;

fn star_pair(n: usize, seed: u64) -> (Shape, Shape) {
    let cfg = |dx: f64| RadialCfg {
        vertex_count: VertexCount::Fixed(n),
        center: Vector2::new(dx, 0.1),
        ..RadialCfg::default()
    };
    let a = draw_polygon_radial(cfg(0.0), ReplayToken { seed, index: 0 }).unwrap();
    let b = draw_polygon_radial(cfg(0.7), ReplayToken { seed, index: 1 }).unwrap();
    (a, b)
}

fn bench_boolean(c: &mut Criterion) {
    let mut group = c.benchmark_group("boolean");
    for &n in &[4usize, 8, 16, 32, 64] {
        group.bench_with_input(BenchmarkId::new("union", n), &n, |b, &n| {
            b.iter_batched(
                || star_pair(n, 43),
                |(x, y)| {
                    let _u = x.union(&y);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("symmetric_difference", n), &n, |b, &n| {
            b.iter_batched(
                || star_pair(n, 44),
                |(x, y)| {
                    let _s = x.symmetric_difference(&y);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("is_subset_of", n), &n, |b, &n| {
            let (x, y) = star_pair(n, 45);
            let u = x.union(&y);
            b.iter(|| x.is_subset_of(&u))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_boolean);
criterion_main!(benches);
