//! Performance benchmarks for tenseg-kernels
//!
//! Run with: cargo bench -p tenseg-kernels
//!
//! Benchmarks cover the segmented reduction forward kernel for both
//! reduction modes over uniform and ragged segmentations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scirs2_core::ndarray_ext::Array;
use tenseg_kernels::{segment_reduce, SegmentReduction};

fn bench_uniform_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_reduce_uniform");

    for &n in [1_000usize, 10_000, 100_000].iter() {
        let data = Array::from_shape_fn(vec![n], |idx| (idx[0] % 97) as f64);
        let lengths = vec![8usize; n / 8];

        group.throughput(Throughput::Elements(n as u64));

        for (name, reduction) in [
            ("max", SegmentReduction::Max),
            ("mean", SegmentReduction::Mean),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &n, |bencher, _| {
                bencher.iter(|| {
                    black_box(
                        segment_reduce(&data.view(), reduction, &lengths, 0, false, 0.0)
                            .unwrap(),
                    );
                });
            });
        }
    }
    group.finish();
}

fn bench_ragged_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_reduce_ragged");

    for &n in [10_000usize, 100_000].iter() {
        let data = Array::from_shape_fn(vec![n], |idx| (idx[0] % 89) as f64);

        // Ragged mix of empty, short and long segments covering n exactly.
        let mut lengths = Vec::new();
        let mut remaining = n;
        let mut i = 0usize;
        while remaining > 0 {
            let len = [0, 1, 3, 12][i % 4].min(remaining);
            lengths.push(len);
            remaining -= len;
            i += 1;
        }

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("max", n), &n, |bencher, _| {
            bencher.iter(|| {
                black_box(
                    segment_reduce(
                        &data.view(),
                        SegmentReduction::Max,
                        &lengths,
                        0,
                        false,
                        0.0,
                    )
                    .unwrap(),
                );
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_uniform_segments, bench_ragged_segments);
criterion_main!(benches);
