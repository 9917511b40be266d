//! Criterion benchmarks for fanlog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fanlog::prelude::*;

/// Sink that accepts and discards every write.
struct NullTransporter;

impl Transporter for NullTransporter {
    fn do_write(&mut self, _payload: LogMessage, _level: LogLevel) {}

    fn name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Caller-path benchmarks: the synchronous cost of a log call
// ============================================================================

fn bench_filtered_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_call");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .threshold(LogLevel::Error)
        .transporter(NullTransporter)
        .build();

    // Below threshold: must return before any allocation
    group.bench_function("debug_below_threshold", |b| {
        b.iter(|| {
            logger.debug(black_box("Debug message"));
        });
    });

    group.finish();
}

fn bench_accepted_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("accepted_call");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .threshold(LogLevel::Log)
        .transporter(NullTransporter)
        .build();

    group.bench_function("info_no_payload", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"));
        });
    });

    group.bench_function("info_with_payload", |b| {
        b.iter(|| {
            logger.info_with(
                black_box("Info message"),
                fanlog::payload![black_box(42), "context"],
            );
        });
    });

    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    group.throughput(Throughput::Elements(1));

    let mut builder = Logger::builder().threshold(LogLevel::Log);
    for _ in 0..4 {
        builder = builder.transporter(NullTransporter);
    }
    let logger = builder.build();

    // Deferred dispatch: sink count must not show up on the caller path
    group.bench_function("info_four_sinks", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_filtered_call, bench_accepted_call, bench_fan_out);
criterion_main!(benches);
