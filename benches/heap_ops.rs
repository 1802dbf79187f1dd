//! Core operation benchmarks
//!
//! Measures the heap's operation set in isolation: bulk insert, drain,
//! decrease-key sweeps, delete sweeps, and merge. Inputs come from a seeded
//! PRNG so runs are reproducible without external data files.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fibonacci_heap::{FibonacciHeap, Heap, NodeHandle};
use std::hint::black_box;

const SIZES: [usize; 3] = [1 << 10, 1 << 12, 1 << 14];

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }
}

fn randomized(count: usize, seed: u64) -> Vec<i64> {
    let mut rng = Lcg::new(seed);
    (0..count).map(|_| (rng.next() >> 33) as i64).collect()
}

fn filled(values: &[i64]) -> (FibonacciHeap<i64>, Vec<NodeHandle<i64>>) {
    let mut heap = FibonacciHeap::new();
    let handles = values.iter().map(|&value| heap.push(value)).collect();
    (heap, handles)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for size in SIZES {
        let values = randomized(size, 0x5eed);
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new();
                for &value in values {
                    heap.push(value);
                }
                black_box(heap.len())
            });
        });
    }
    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");
    for size in SIZES {
        let values = randomized(size, 0x5eed);
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter_batched(
                || filled(values).0,
                |mut heap| {
                    while let Some(element) = heap.pop() {
                        black_box(element);
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    for size in SIZES {
        let values = randomized(size, 0x5eed);
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter_batched(
                || {
                    // One pop forces a consolidation so the sweep works
                    // against real trees rather than a flat root list.
                    let (mut heap, handles) = filled(values);
                    heap.push(-1);
                    heap.pop();
                    (heap, handles)
                },
                |(mut heap, handles)| {
                    for (handle, &value) in handles.iter().zip(values) {
                        heap.decrease_key(handle, value - 1).unwrap();
                    }
                    black_box(heap.len())
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    for size in SIZES {
        let values = randomized(size, 0x5eed);
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter_batched(
                || filled(values),
                |(mut heap, handles)| {
                    for handle in &handles {
                        heap.delete(handle).unwrap();
                    }
                    black_box(heap.len())
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for size in SIZES {
        let left_values = randomized(size, 0x5eed);
        let right_values = randomized(size, 0xcafe);
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(left_values, right_values),
            |b, (left_values, right_values)| {
                b.iter_batched(
                    || (filled(left_values).0, filled(right_values).0),
                    |(mut left, mut right)| {
                        left.merge(&mut right);
                        black_box(left.len())
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_drain,
    bench_decrease_key,
    bench_delete,
    bench_merge
);
criterion_main!(benches);
