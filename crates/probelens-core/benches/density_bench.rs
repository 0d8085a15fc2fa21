use criterion::{criterion_group, criterion_main, Criterion};
use probelens_core::density;
use std::hint::black_box;

fn make_scores(n: usize) -> Vec<f32> {
    (0..n).map(|i| ((i * 37) % 100) as f32 / 100.0).collect()
}

fn bench_estimate(c: &mut Criterion) {
    let small = make_scores(10);
    let medium = make_scores(100);
    let large = make_scores(400);

    c.bench_function("kde_n10_r120", |b| {
        b.iter(|| density::estimate(black_box(&small), 120, 0.02))
    });
    c.bench_function("kde_n100_r120", |b| {
        b.iter(|| density::estimate(black_box(&medium), 120, 0.02))
    });
    c.bench_function("kde_n400_r120", |b| {
        b.iter(|| density::estimate(black_box(&large), 120, 0.02))
    });
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
