use RustedTaylor::taylor::symbolic_function::SymbolicFunction;
use RustedTaylor::taylor::truncated_series::TruncatedSeries;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_series_arithmetic(c: &mut Criterion) {
    let coefficients = (0..20).map(|k| 1.0 / (k + 1) as f64).collect();
    let f = TruncatedSeries::from_coefficients(coefficients, 20).unwrap();
    let g = TruncatedSeries::from_coefficients(vec![1.0, 1.0, 0.5], 20).unwrap();
    c.bench_function("series product, 20 terms", |b| b.iter(|| black_box(&f) * black_box(&g)));
    c.bench_function("series division, 20 terms", |b| {
        b.iter(|| black_box(&f).try_div(black_box(&g)).unwrap())
    });
}

fn bench_symbolic_expansion(c: &mut Criterion) {
    let x = SymbolicFunction::identity();
    let f = SymbolicFunction::exponential().compose(-x.powi(4));
    // shifting centers so every iteration misses the memo
    let mut center = 0.0;
    c.bench_function("exp(-x^4), order 10, fresh center", |b| {
        b.iter(|| {
            center += 1e-6;
            f.get_expansion(black_box(center), 10).unwrap()
        })
    });
    let gamma = SymbolicFunction::exponential().compose(SymbolicFunction::log_gamma().compose(&x));
    c.bench_function("gamma, order 8, cached", |b| {
        b.iter(|| gamma.get_expansion(black_box(2.5), 8).unwrap())
    });
}

criterion_group!(benches, bench_series_arithmetic, bench_symbolic_expansion);
criterion_main!(benches);
