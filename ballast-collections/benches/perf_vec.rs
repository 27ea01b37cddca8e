//! Benchmarks for Vec growth and shifting.
//!
//! Run: cargo bench --bench perf_vec

use std::hint::black_box;

use ballast_alloc::Arena;
use ballast_collections::Vec;
use criterion::{criterion_group, criterion_main, Criterion};

const COUNT: u64 = 10_000;

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("vec_push");

    group.bench_function("growing", |b| {
        b.iter(|| {
            let mut v: Vec<u64> = Vec::new();
            for i in 0..COUNT {
                v.push(black_box(i));
            }
            v
        });
    });

    group.bench_function("reserved", |b| {
        b.iter(|| {
            let mut v: Vec<u64> = Vec::with_capacity(COUNT as usize);
            for i in 0..COUNT {
                v.push(black_box(i));
            }
            v
        });
    });

    group.bench_function("arena", |b| {
        let arena = Arena::with_capacity(4 * 1024 * 1024);
        b.iter(|| {
            {
                let mut v = Vec::new_in(&arena);
                for i in 0..COUNT {
                    v.push(black_box(i));
                }
                black_box(v.len());
            }
            // SAFETY: the vector above is gone.
            unsafe { arena.reset() };
        });
    });

    group.finish();
}

fn bench_insert_front(c: &mut Criterion) {
    c.bench_function("vec_insert_front_1k", |b| {
        b.iter(|| {
            let mut v: Vec<u64> = Vec::new();
            for i in 0..1_000 {
                v.insert(0, black_box(i));
            }
            v
        });
    });
}

criterion_group!(benches, bench_push, bench_insert_front);
criterion_main!(benches);
