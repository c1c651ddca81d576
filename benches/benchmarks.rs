use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::DVec3;
use relpress_rs::PressureConfig;
use relpress_rs::discretization::generator::create_uniform_grid;
use relpress_rs::flow::{Quantity, Scan, Sequence};
use relpress_rs::numerics::space::eval_space_derivs;
use relpress_rs::pressure::compute_pressure_gradients;
use relpress_rs::pressure::flood_fill::eval_relative_pressure;
use relpress_rs::pressure::smoother::perform_pressure_iterations;
use relpress_rs::processing::filter::{FilterMode, apply_neighbor_filter};
use std::sync::Arc;

fn grid_sizes() -> Vec<usize> {
    vec![16, 32]
}

fn swirl_scan(n: usize, t: f64) -> Scan {
    let grid = Arc::new(create_uniform_grid([n; 3], [0.0; 3], [1.0; 3]).unwrap());
    Scan::new(grid, t).with_flow(|p| {
        let v = DVec3::new(-(p.y - 0.5), p.x - 0.5, 0.1 * (1.0 + t));
        (v, 1.0)
    })
}

fn swirl_sequence(n: usize) -> Sequence {
    let mut sequence = Sequence::new(true);
    for s in 0..3 {
        sequence.add_scan(swirl_scan(n, 0.1 * s as f64)).unwrap();
    }
    sequence
}

fn with_gradient(n: usize) -> Scan {
    let mut scan = swirl_scan(n, 0.0);
    for cell in scan.cells_mut() {
        let p = cell.position;
        cell.pressure_gradient = DVec3::new(2.0 * p.x, -p.z, 1.0 - p.y);
    }
    scan
}

fn bench_space_derivs(c: &mut Criterion) {
    let mut group = c.benchmark_group("space_derivs");
    let config = PressureConfig::default();
    for &size in &grid_sizes() {
        let scan = swirl_scan(size, 0.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter(|| {
                for idx in 0..scan.total_cells() {
                    let d = eval_space_derivs(&scan, idx, &config.stencil_mask);
                    std::hint::black_box(d.ok());
                }
            });
        });
    }
    group.finish();
}

fn bench_pressure_gradients(c: &mut Criterion) {
    let mut group = c.benchmark_group("pressure_gradients");
    let config = PressureConfig::default();
    for &size in &grid_sizes() {
        let sequence = swirl_sequence(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter_batched(
                || sequence.clone(),
                |mut seq| {
                    let _ = compute_pressure_gradients(&mut seq, &config);
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for &size in &grid_sizes() {
        let scan = with_gradient(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter_batched(
                || scan.clone(),
                |mut s| {
                    let report = eval_relative_pressure(&mut s, None, 0.0, None);
                    std::hint::black_box(report.ok());
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_smoother(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoother");
    for &size in &grid_sizes() {
        let mut scan = with_gradient(size);
        let _ = eval_relative_pressure(&mut scan, None, 0.0, None);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter_batched(
                || scan.clone(),
                |mut s| {
                    std::hint::black_box(perform_pressure_iterations(&mut s));
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_median_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("median_filter");
    for &size in &grid_sizes() {
        let scan = with_gradient(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter_batched(
                || scan.clone(),
                |mut s| {
                    let _ = apply_neighbor_filter(
                        &mut s,
                        Quantity::PressureGradientX,
                        1,
                        FilterMode::Median,
                    );
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_space_derivs,
    bench_pressure_gradients,
    bench_flood_fill,
    bench_smoother,
    bench_median_filter
);
criterion_main!(benches);
