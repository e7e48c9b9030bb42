//! Benchmark for CapSim scenario computation.

use capsim::cap_table::CapTableEngine;
use capsim::core::types::{
    ConvertibleInstrument, Founder, OptionPool, PoolAdjustment, PoolSizing, PricedRound, Scenario,
};
use capsim::exit::exit_sweep;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Generate a scenario alternating convertibles and priced rounds.
fn generate_scenario(n_events: usize) -> Scenario {
    let mut scenario = Scenario::new(vec![
        Founder::new("a", "Ada", 45.0),
        Founder::new("b", "Bob", 45.0),
    ])
    .with_pool(OptionPool::new("esop", 10.0, PoolSizing::PreMoney));

    let mut capital = 500_000.0;
    for i in 0..n_events {
        let id = format!("event-{i}");
        scenario = if i % 3 == 0 {
            scenario.with_event(
                ConvertibleInstrument::capped(id, "Note", capital, capital * 8.0).with_discount(20.0),
            )
        } else {
            scenario.with_event(
                PricedRound::pre_money(id, "Round", capital, capital * 5.0)
                    .with_pool_adjustment(PoolAdjustment::post_money(12.0)),
            )
        };
        capital *= 1.5;
    }

    scenario
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");

    for size in [1, 10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::new("events", size), size, |b, &size| {
            let scenario = generate_scenario(size);
            let engine = CapTableEngine::default();

            b.iter(|| {
                let result = engine.calculate(black_box(&scenario));
                black_box(result)
            });
        });
    }

    group.finish();
}

fn bench_calculate_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_many");

    for count in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("scenarios", count), count, |b, &count| {
            let scenarios: Vec<Scenario> = (0..count).map(|_| generate_scenario(10)).collect();
            let engine = CapTableEngine::default();

            b.iter(|| {
                let result = engine.calculate_many(black_box(&scenarios));
                black_box(result)
            });
        });
    }

    group.finish();
}

fn bench_exit_sweep(c: &mut Criterion) {
    let engine = CapTableEngine::default();
    let states = engine.calculate(&generate_scenario(20)).unwrap();
    let last = states.last().unwrap().clone();
    let valuations: Vec<f64> = (1..=10_000).map(|i| i as f64 * 1_000_000.0).collect();

    c.bench_function("exit_sweep_10k", |b| {
        b.iter(|| {
            let result = exit_sweep(black_box(&last), black_box(&valuations));
            black_box(result)
        });
    });
}

criterion_group!(benches, bench_calculate, bench_calculate_many, bench_exit_sweep);
criterion_main!(benches);
