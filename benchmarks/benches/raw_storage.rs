// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use holdfast_raw::RawStorage;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench raw_storage
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

fn bench_allocate_and_free(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_storage_allocate_and_free");
    configure_group(&mut group);

    for capacity in [16, 1_024, 65_536] {
        group.throughput(Throughput::Bytes((capacity * size_of::<u64>()) as u64));

        group.bench_with_input(
            BenchmarkId::new("RawStorage", capacity),
            &capacity,
            |b, &cap| {
                b.iter(|| black_box(RawStorage::<u64>::with_capacity(cap)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("Vec::with_capacity", capacity),
            &capacity,
            |b, &cap| {
                b.iter(|| black_box(Vec::<u64>::with_capacity(cap)));
            },
        );
    }

    group.finish();
}

fn bench_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_storage_swap");
    configure_group(&mut group);

    let mut a = RawStorage::<u64>::with_capacity(1_024);
    let mut b = RawStorage::<u64>::new();

    group.bench_function("swap", |bench| {
        bench.iter(|| {
            a.swap(&mut b);
            black_box((&a, &b));
        });
    });

    group.finish();
}

criterion_group!(raw_storage_benches, bench_allocate_and_free, bench_swap);
criterion_main!(raw_storage_benches);
