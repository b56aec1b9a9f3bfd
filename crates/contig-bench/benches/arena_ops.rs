//! Criterion micro-benchmarks for placement, release and gap scanning.

use std::hint::black_box;

use contig_arena::Arena;
use contig_bench::{churn_profile, fill_profile};
use contig_test_utils::replay;
use criterion::{criterion_group, criterion_main, Criterion};

/// 64KB arena, the size of a typical network-buffer pool.
const ARENA_BYTES: usize = 64 * 1024;

/// Benchmark: fill a fresh arena with 1000 small chunks (trailing-gap path).
fn bench_fill_1k(c: &mut Criterion) {
    let ops = fill_profile(1000, 24);
    c.bench_function("arena_fill_1k", |b| {
        b.iter(|| {
            let mut arena = Arena::new(ARENA_BYTES).unwrap();
            black_box(replay(&mut arena, &ops));
        });
    });
}

/// Benchmark: seeded alloc/release churn, exercising interior gaps.
fn bench_churn_2k(c: &mut Criterion) {
    let ops = churn_profile(42, 2000, 128);
    c.bench_function("arena_churn_2k", |b| {
        b.iter(|| {
            let mut arena = Arena::new(ARENA_BYTES).unwrap();
            black_box(replay(&mut arena, &ops));
        });
    });
}

/// Benchmark: a failing placement scan over a fully fragmented arena.
fn bench_no_space_scan(c: &mut Criterion) {
    let mut arena = Arena::new(ARENA_BYTES).unwrap();
    let mut handles = Vec::new();
    while let Ok(h) = arena.allocate(8) {
        handles.push(h);
    }
    // Free every other chunk: many 40-byte gaps, none big enough for 64.
    for h in handles.iter().step_by(2) {
        arena.release(*h).unwrap();
    }
    c.bench_function("arena_no_space_scan", |b| {
        b.iter(|| {
            black_box(arena.allocate(black_box(64)).is_err());
        });
    });
}

criterion_group!(benches, bench_fill_1k, bench_churn_2k, bench_no_space_scan);
criterion_main!(benches);
