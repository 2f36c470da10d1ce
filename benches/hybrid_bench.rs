//! Criterion benchmarks for the hybrid PSO-TLBO loop.
//!
//! Uses a trivial sum oracle so the numbers measure pure engine overhead
//! (codec repair, velocity updates, TLBO phases) rather than any domain
//! scoring cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pso_tlbo::hybrid::{HybridConfig, HybridRunner};

fn sum_oracle(v: &[usize]) -> f64 {
    v.iter().sum::<usize>() as f64
}

fn bench_hybrid_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("hybrid_sum");
    group.sample_size(10);

    for (n, pop, iters) in [(20usize, 30usize, 100usize), (50, 50, 50), (100, 60, 25)] {
        let config = HybridConfig::default()
            .with_population_size(pop)
            .with_max_iter(iters)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_i{}", n, pop, iters), n),
            &config,
            |b, config| {
                b.iter(|| {
                    let result =
                        HybridRunner::run(&sum_oracle, black_box(n), black_box(config)).unwrap();
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_tlbo_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("tlbo_heavy");
    group.sample_size(10);

    // Injection every iteration over half the population stresses the
    // teacher/learner phases rather than the PSO pass.
    for &n in &[20, 50] {
        let config = HybridConfig::default()
            .with_population_size(40)
            .with_max_iter(50)
            .with_tlbo_interval(1)
            .with_tlbo_fraction(0.5)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, config| {
            b.iter(|| {
                let result =
                    HybridRunner::run(&sum_oracle, black_box(n), black_box(config)).unwrap();
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hybrid_sum, bench_tlbo_heavy);
criterion_main!(benches);
