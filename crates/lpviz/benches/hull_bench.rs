//! Criterion benchmarks for feasible-polygon enumeration.
//! Focus sizes: m in {4, 10, 20, 50, 100} half-planes.
//! Pairwise enumeration is O(m³); these sizes cover what the canvas draws.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use lpviz::geom2::{fit_to_viewport, hull_from_halfplanes, Hs2};
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_halfplanes(m: usize, seed: u64) -> Vec<Hs2> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..m)
        .map(|_| {
            // random angle and distance so that origin is inside
            let theta: f64 = rng.gen::<f64>() * std::f64::consts::TAU;
            let n = Vector2::new(theta.cos(), theta.sin());
            Hs2::new(n, rng.gen_range(0.5..1.5))
        })
        .collect()
}

fn bench_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("geom2");
    for &m in &[4usize, 10, 20, 50, 100] {
        group.bench_with_input(BenchmarkId::new("hull_from_halfplanes", m), &m, |b, &m| {
            b.iter_batched(
                || random_halfplanes(m, 43),
                |hs| {
                    let _verts = hull_from_halfplanes(&hs);
                },
                BatchSize::SmallInput,
            )
        });
    }
    let verts = hull_from_halfplanes(&random_halfplanes(50, 44));
    group.bench_function("fit_to_viewport", |b| {
        b.iter(|| fit_to_viewport(&verts, 600.0, 600.0, 40.0))
    });
    group.finish();
}

criterion_group!(benches, bench_hull);
criterion_main!(benches);
