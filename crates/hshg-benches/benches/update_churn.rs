// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs)]
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use hshg_core::{Aabb, EntityHandle, Hshg};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::{hint::black_box, time::Duration};

fn build_movers(n: usize, extent: f64) -> (Hshg, Vec<(EntityHandle, [f64; 2])>) {
    let mut rng = StdRng::seed_from_u64(0x6368_7572_6e);
    let mut grid = Hshg::default();
    let mut movers = Vec::with_capacity(n);
    for _ in 0..n {
        let center = [rng.gen_range(0.0..extent), rng.gen_range(0.0..extent)];
        let aabb = Aabb::from_center_half_extents(center, 0.4, 0.4);
        let handle = grid.insert(aabb, true).expect("insert");
        movers.push((handle, center));
    }
    (grid, movers)
}

/// Measures one tick of update churn: every entity drifts a small step
/// and is re-bucketed; cost should track cells touched, not n².
fn bench_update_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_churn_drift");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(6));
    group.noise_threshold(0.02);
    for &n in &[100usize, 1_000, 10_000] {
        let extent = (n as f64).sqrt() * 10.0;
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || build_movers(n, extent),
                |(mut grid, mut movers)| {
                    let mut rng = StdRng::seed_from_u64(7);
                    for (handle, center) in &mut movers {
                        center[0] += rng.gen_range(-0.7..0.7);
                        center[1] += rng.gen_range(-0.7..0.7);
                        let aabb = Aabb::from_center_half_extents(*center, 0.4, 0.4);
                        grid.update(*handle, aabb, true).expect("update");
                    }
                    grid.step();
                    black_box(grid.stats());
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// Insert/remove cycling exercises the freelist and cell-map pruning.
fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_remove_cycle");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(6));
    for &n in &[1_000usize, 10_000] {
        let extent = (n as f64).sqrt() * 10.0;
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let (mut grid, movers) = build_movers(n, extent);
                for &(handle, _) in &movers {
                    grid.remove(handle).expect("remove");
                }
                black_box(grid.is_empty());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update_churn, bench_insert_remove);
criterion_main!(benches);
