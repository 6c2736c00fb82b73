//! Criterion benchmarks for the Heston semi-analytic pricer.
//!
//! Measures characteristic-function evaluation, single call prices across
//! moneyness and maturity, and finite-difference Greeks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use heston_models::analytical::HestonPricer;
use heston_models::models::HestonParams;
use heston_models::valuation::{price_quotes, FiniteDifference, NearExpiryPolicy, OptionQuote};
use num_complex::Complex64;

fn pricer() -> HestonPricer {
    HestonPricer::new(HestonParams::default())
}

/// Benchmark a single characteristic-function evaluation.
fn bench_characteristic_function(c: &mut Criterion) {
    let pricer = pricer();
    c.bench_function("characteristic_function", |b| {
        b.iter(|| {
            pricer
                .characteristic_function(black_box(Complex64::new(3.5, -1.0)), 100.0, 0.04, 1.0)
                .unwrap()
        });
    });
}

/// Benchmark call prices across strikes and maturities.
fn bench_call_price(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_price");
    let pricer = pricer();

    for strike in [80.0, 100.0, 120.0] {
        group.bench_with_input(BenchmarkId::new("strike", strike), &strike, |b, &k| {
            b.iter(|| pricer.call_price(100.0, 0.04, black_box(k), 1.0).unwrap());
        });
    }

    // Short maturities need more subintervals
    for tau in [0.01, 0.25, 5.0] {
        group.bench_with_input(BenchmarkId::new("maturity", tau), &tau, |b, &t| {
            b.iter(|| pricer.call_price(100.0, 0.04, 100.0, black_box(t)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark finite-difference Greeks (four revaluations each pair).
fn bench_greeks(c: &mut Criterion) {
    let pricer = pricer();
    let fd = FiniteDifference::default();

    c.bench_function("delta", |b| {
        b.iter(|| fd.delta(&pricer, black_box(100.0), 0.04, 100.0, 1.0).unwrap());
    });
    c.bench_function("variance_sensitivity", |b| {
        b.iter(|| {
            fd.variance_sensitivity(&pricer, 100.0, black_box(0.04), 100.0, 1.0)
                .unwrap()
        });
    });
}

/// Benchmark mapping a strip of quotes.
fn bench_price_quotes(c: &mut Criterion) {
    let pricer = pricer();
    let policy = NearExpiryPolicy::default();
    let quotes: Vec<OptionQuote> = (0..50)
        .map(|i| OptionQuote::new(100.0, 0.04, 75.0 + i as f64, 0.5))
        .collect();

    c.bench_function("price_quotes_50", |b| {
        b.iter(|| price_quotes(&pricer, black_box(&quotes), &policy));
    });
}

criterion_group!(
    benches,
    bench_characteristic_function,
    bench_call_price,
    bench_greeks,
    bench_price_quotes
);
criterion_main!(benches);
