//! Criterion benchmarks for the single-polyhedron redundancy eliminator.
//! Focus sizes: m in {4, 10, 20, 40} inequalities in a fixed dimension.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p uhull --bench reduce_bench

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use num_bigint::BigInt;
use uhull::config::HullConfig;
use uhull::linform::LinForm;
use uhull::polyhedron::Polyhedron;
use uhull::reduce::convex_hull_of_single;

/// A regular `m`-gon in 2D, inscribed so every edge is tight, plus a
/// handful of deliberately redundant wide bounding constraints.
fn many_sided_polygon(m: usize) -> Polyhedron {
    let mut p = Polyhedron::new(2);
    for k in 0..m {
        let a = k as i64;
        let b = m as i64;
        // Deterministic integer normal `(a, b-a)` pointed roughly outward,
        // offset far enough that the origin stays feasible.
        let nx = a - (b / 2);
        let ny = (b / 2) - a + 1;
        p.add_inequality(LinForm::new(vec![
            BigInt::from(b * b),
            BigInt::from(nx),
            BigInt::from(ny),
        ]));
    }
    // Redundant: a box far larger than the polygon above.
    for row in [
        vec![100_000, 1, 0],
        vec![100_000, -1, 0],
        vec![100_000, 0, 1],
        vec![100_000, 0, -1],
    ] {
        p.add_inequality(LinForm::new(row.into_iter().map(BigInt::from).collect()));
    }
    p
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");
    for &m in &[4usize, 10, 20, 40] {
        group.bench_with_input(BenchmarkId::new("convex_hull_of_single", m), &m, |b, &m| {
            b.iter_batched(
                || many_sided_polygon(m),
                |p| {
                    let _reduced = convex_hull_of_single(p, HullConfig::default()).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reduce);
criterion_main!(benches);
