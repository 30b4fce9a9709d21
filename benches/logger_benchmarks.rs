//! Criterion benchmarks for cni_log

use cni_log::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io;
use std::sync::Arc;

/// Logger whose console and file output both go to `io::sink()`
fn sink_logger() -> Logger {
    let logger = Logger::with_console(io::sink());
    logger.set_output(io::sink());
    logger
}

// ============================================================================
// Plain Logging Benchmarks
// ============================================================================

fn bench_plain_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("plain_logging");
    group.throughput(Throughput::Elements(1));

    let logger = sink_logger();
    logger.set_log_level(Level::Verbose);

    group.bench_function("infof_default_prefix", |b| {
        b.iter(|| logger.infof(format_args!("ADD for container {}", black_box("abc123"))));
    });

    logger.set_prefixer(PrefixerFn(|level: Level| format!("[{}] ", level)));
    group.bench_function("infof_static_prefix", |b| {
        b.iter(|| logger.infof(format_args!("ADD for container {}", black_box("abc123"))));
    });

    group.bench_function("errorf", |b| {
        b.iter(|| black_box(logger.errorf(format_args!("no such device {}", black_box("eth7")))));
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");

    let logger = sink_logger();
    logger.set_log_level(Level::Error);

    group.bench_function("filtered_debugf", |b| {
        b.iter(|| logger.debugf(format_args!("dropped {}", black_box(42))));
    });

    group.bench_function("filtered_debug_structured", |b| {
        b.iter(|| {
            logger
                .debug_structured(black_box("dropped"), &["n".into(), 42.into()])
                .ok()
        });
    });

    for name in ["info", "VERBOSE", "bogus"] {
        group.bench_with_input(BenchmarkId::new("parse", name), name, |b, name| {
            b.iter(|| Level::parse(black_box(name)));
        });
    }

    group.finish();
}

// ============================================================================
// Structured Logging Benchmarks
// ============================================================================

fn bench_structured_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("structured_logging");

    let logger = sink_logger();
    for pairs in [1usize, 4, 16] {
        let fields: Vec<FieldValue> = (0..pairs)
            .flat_map(|i| [FieldValue::from(format!("key{}", i)), FieldValue::from(i)])
            .collect();
        group.throughput(Throughput::Elements(pairs as u64));
        group.bench_with_input(BenchmarkId::new("info_structured", pairs), &fields, |b, fields| {
            b.iter(|| logger.info_structured("ADD", black_box(fields)).ok());
        });
    }

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = Arc::new(sink_logger());
    logger.set_prefixer(PrefixerFn(|level: Level| format!("[{}] ", level)));

    group.bench_function("multi_thread_4", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        for i in 0..100 {
                            logger.infof(format_args!("concurrent message {}", i));
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_plain_logging,
    bench_level_filtering,
    bench_structured_logging,
    bench_concurrent_logging
);

criterion_main!(benches);
