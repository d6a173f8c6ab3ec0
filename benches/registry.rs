use catlog::{Category, Level, Registry};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

struct Hot;
impl Category for Hot {}

struct Cold;
impl Category for Cold {}

fn bench_get_live(c: &mut Criterion) {
    let registry = Registry::new();
    let _held = registry.get::<Hot>().expect("construction failed");

    c.bench_function("Registry::get (live)", |b| {
        b.iter(|| black_box(registry.get::<Hot>().expect("lookup failed")));
    });
}

fn bench_get_reclaimed(c: &mut Criterion) {
    let registry = Registry::new();

    // Nothing holds the logger, so every lookup sweeps and rebuilds it.
    c.bench_function("Registry::get (rebuild)", |b| {
        b.iter(|| black_box(registry.get::<Cold>().expect("construction failed")));
    });
}

fn bench_filtered_log(c: &mut Criterion) {
    let registry = Registry::new();
    let logger = registry.get::<Hot>().expect("construction failed");

    c.bench_function("Logger::fine (below level)", |b| {
        b.iter(|| logger.fine(black_box("dropped before any output")));
    });
    assert!(!logger.is_enabled(Level::Fine));
}

criterion_group!(benches, bench_get_live, bench_get_reclaimed, bench_filtered_log);
criterion_main!(benches);
