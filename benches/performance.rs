//! Performance benchmarks for the console-log extractors
//!
//! Server and bot logs of long runs reach hundreds of thousands of lines;
//! these benchmarks keep parsing them cheap.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use opencraft_metrics::{
    gather::{collect_latencies, parse_worker_output},
    stats::Summary,
};
use std::hint::black_box;

/// Server console preamble followed by a metrics table
fn create_worker_log(rows: usize) -> Vec<String> {
    let mut lines: Vec<String> = (0..200)
        .map(|i| format!("[12:00:{:02}] [Server thread/INFO]: Preparing spawn area: {}%", i % 60, i % 100))
        .collect();
    lines.push("idx timestamp key value".to_string());
    lines.extend((0..rows).map(|i| {
        let key = if i % 4 == 0 { "players" } else { "tick" };
        format!("{} {} {} {}", i, 1_600_000_000 + i, key, 45 + i % 10)
    }));
    lines
}

/// Bot output interleaving Dig, Place and chatter lines
fn create_endpoint_log(rows: usize) -> Vec<String> {
    (0..rows)
        .map(|i| match i % 3 {
            0 => format!("[Bot {}] Dig: {}", i % 16, 20 + i % 40),
            1 => format!("[Bot {}] Place: {}", i % 16, 30 + i % 50),
            _ => format!("[Bot {}] moved to chunk {}", i % 16, i),
        })
        .collect()
}

fn bench_worker_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_parsing");

    for rows in [1_000, 10_000, 100_000] {
        let log = create_worker_log(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &log, |b, log| {
            b.iter(|| parse_worker_output(0, black_box(log)))
        });
    }

    group.finish();
}

fn bench_endpoint_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("endpoint_parsing");

    for rows in [1_000, 10_000, 100_000] {
        let log = create_endpoint_log(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &log, |b, log| {
            b.iter(|| collect_latencies(black_box(log)).map(|samples| samples.summarize()))
        });
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let values: Vec<f64> = (0..100_000).map(|i| (i % 97) as f64).collect();
    c.bench_function("summary_100k", |b| b.iter(|| Summary::from_values(black_box(&values))));
}

criterion_group!(benches, bench_worker_parsing, bench_endpoint_parsing, bench_summary);
criterion_main!(benches);
