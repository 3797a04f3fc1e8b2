//! Benchmark comparing pairwise vs matrix-based correlation computation
//!
//! Run with: cargo bench --bench correlation_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use gradelens::pipeline::{correlate_matrix, correlate_pairwise, prepare, PrepareOptions};

/// Generate synthetic numeric data; every fourth column tracks an earlier one
fn generate_test_dataframe(n_rows: usize, n_features: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut raw: Vec<Vec<f64>> = Vec::with_capacity(n_features);

    for i in 0..n_features {
        let values: Vec<f64> = match i % 4 {
            0 => (0..n_rows).map(|_| rng.gen::<f64>() * 100.0).collect(),
            1 => (0..n_rows)
                .map(|_| {
                    let v = rng.gen::<f64>();
                    (v * v * v) * 100.0
                })
                .collect(),
            2 => (0..n_rows)
                .map(|_| {
                    if rng.gen::<bool>() {
                        rng.gen::<f64>() * 30.0
                    } else {
                        70.0 + rng.gen::<f64>() * 30.0
                    }
                })
                .collect(),
            _ => raw[i - 3]
                .iter()
                .map(|v| v + rng.gen::<f64>() * 10.0 - 5.0)
                .collect(),
        };
        raw.push(values);
    }

    let columns: Vec<Column> = raw
        .into_iter()
        .enumerate()
        .map(|(i, values)| Column::new(format!("feature_{}", i).into(), values))
        .collect();

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

/// Benchmark pairwise vs matrix correlation for varying column counts
fn benchmark_correlation_by_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_by_columns");
    group.sample_size(30);

    let n_rows = 10_000;
    let column_counts = [10, 25, 50, 100];

    for n_cols in column_counts {
        let df = generate_test_dataframe(n_rows, n_cols, 42);
        let (dataset, _) = prepare(&df, &PrepareOptions::default()).expect("prepare failed");
        let view = dataset.view();

        group.throughput(Throughput::Elements(((n_cols * (n_cols - 1)) / 2) as u64));

        group.bench_with_input(BenchmarkId::new("pairwise", n_cols), &view, |b, view| {
            b.iter(|| {
                let _ = correlate_pairwise(black_box(view));
            });
        });

        group.bench_with_input(BenchmarkId::new("matrix", n_cols), &view, |b, view| {
            b.iter(|| {
                let _ = correlate_matrix(black_box(view));
            });
        });
    }

    group.finish();
}

/// Benchmark pairwise vs matrix correlation for varying row counts
fn benchmark_correlation_by_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_by_rows");
    group.sample_size(20);

    let n_cols = 20;
    let row_counts = [1_000, 10_000, 50_000];

    for n_rows in row_counts {
        let df = generate_test_dataframe(n_rows, n_cols, 42);
        let (dataset, _) = prepare(&df, &PrepareOptions::default()).expect("prepare failed");
        let view = dataset.view();

        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("pairwise", n_rows), &view, |b, view| {
            b.iter(|| {
                let _ = correlate_pairwise(black_box(view));
            });
        });

        group.bench_with_input(BenchmarkId::new("matrix", n_rows), &view, |b, view| {
            b.iter(|| {
                let _ = correlate_matrix(black_box(view));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_correlation_by_columns,
    benchmark_correlation_by_rows
);
criterion_main!(benches);
