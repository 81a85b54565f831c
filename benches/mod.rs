use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use numerics_rs::prelude::*;
use numerics_rs::transient::resolve_current;
use std::hint::black_box;

fn bench_black_scholes_price(c: &mut Criterion) {
    let spec = OptionSpec::call(100.0, 100.0, 1.0, 0.05, 10.4506);

    c.bench_function("black_scholes_call", |b| {
        b.iter(|| black_box(BlackScholes::price(black_box(&spec), black_box(0.2))))
    });
}

fn bench_solve_iv(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_iv");

    for strike in [80.0, 100.0, 120.0] {
        let base = OptionSpec::call(100.0, strike, 0.5, 0.03, 0.0);
        let spec = base.with_market_price(BlackScholes::price(&base, 0.25));
        group.bench_with_input(BenchmarkId::from_parameter(strike), &spec, |b, spec| {
            b.iter(|| black_box(solve_iv(black_box(spec))))
        });
    }

    group.finish();
}

fn bench_diode_solve(c: &mut Criterion) {
    let diode = DiodeParams::default();

    c.bench_function("diode_resolve_current", |b| {
        b.iter(|| {
            black_box(resolve_current(
                black_box(2.5),
                black_box(5.0),
                black_box(1000.0),
                &diode,
            ))
        })
    });
}

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    group.sample_size(20);

    let rc = CircuitSpec::rc(1000.0, 1e-6, 5.0, DiodeParams::default(), 0.0);
    let rlc = CircuitSpec::rlc(10.0, 1e-6, 1e-3, 5.0, DiodeParams::default(), 0.0, 0.0)
        .with_time_span(0.0, 2e-3)
        .with_step_size(1e-7)
        .with_output_interval(1e-5);
    let config = SimulationConfig::default();

    group.bench_function("rc_diode_5tau", |b| {
        b.iter(|| black_box(simulate(black_box(&rc), &config)))
    });
    group.bench_function("rlc_diode_2ms", |b| {
        b.iter(|| black_box(simulate(black_box(&rlc), &config)))
    });

    group.finish();
}

fn bench_batch_parallel(c: &mut Criterion) {
    let specs: Vec<OptionSpec> = (0..64)
        .map(|i| {
            let base = OptionSpec::put(100.0, 70.0 + i as f64, 0.75, 0.02, 0.0);
            base.with_market_price(BlackScholes::price(&base, 0.3))
        })
        .collect();
    let mut group = c.benchmark_group("solve_all_parallel");

    for workers in [1_usize, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &w| {
            b.iter(|| black_box(solve_all_parallel(black_box(&specs), w)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_black_scholes_price,
    bench_solve_iv,
    bench_diode_solve,
    bench_simulate,
    bench_batch_parallel
);
criterion_main!(benches);
