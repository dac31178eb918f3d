use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use srz_benchmarks::standard_regimes;
use srz_kernel::budget::Budget;
use srz_kernel::region::region_query;
use srz_kernel::resolve::resolve;

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for regime in standard_regimes() {
        group.bench_with_input(BenchmarkId::from_parameter(regime.name), &regime, |b, regime| {
            b.iter_batched(
                || regime.domain.clone(),
                |mut domain| {
                    let mut budget = Budget::new(u32::MAX);
                    black_box(resolve(&mut domain, 1, 0, 0, &mut budget));
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_region_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_query");
    for regime in standard_regimes() {
        group.bench_with_input(BenchmarkId::from_parameter(regime.name), &regime, |b, regime| {
            b.iter(|| {
                let mut budget = Budget::new(u32::MAX);
                black_box(region_query(&regime.domain, 1, &mut budget));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_region_query);
criterion_main!(benches);
