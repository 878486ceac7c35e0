//! Criterion benchmarks for rust_logger_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_logger_facade::prelude::*;
use rust_logger_facade::kv;

fn memory_logger(level: LogLevel, format: Format) -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::from_engine(
        Engine::builder()
            .min_level(level)
            .format(format)
            .sink(sink.clone())
            .build(),
    );
    (logger, sink)
}

// ============================================================================
// Disabled Path Benchmarks
// ============================================================================

fn bench_disabled(c: &mut Criterion) {
    let mut group = c.benchmark_group("disabled");
    group.throughput(Throughput::Elements(1));

    let (logger, _sink) = memory_logger(LogLevel::Info, Format::Json);

    group.bench_function("v_below_threshold", |b| {
        b.iter(|| {
            let v = logger.v(black_box(-1));
            v.info("hidden", &[]);
        });
    });

    group.bench_function("debugw", |b| {
        b.iter(|| logger.debugw("hidden", &kv!["key", "value", "n", black_box(42)]));
    });

    group.bench_function("debugf", |b| {
        b.iter(|| logger.debugf(format_args!("hidden {}", black_box(42))));
    });

    group.finish();
}

// ============================================================================
// Enabled Path Benchmarks
// ============================================================================

fn bench_enabled(c: &mut Criterion) {
    let mut group = c.benchmark_group("enabled");
    group.throughput(Throughput::Elements(1));

    for format in [Format::Console, Format::Json] {
        let (logger, sink) = memory_logger(LogLevel::Info, format);

        group.bench_function(format!("info_fields_{}", format), |b| {
            b.iter(|| {
                logger.info(
                    black_box("request served"),
                    &[Field::new("status", 200), Field::new("path", "/health")],
                );
                sink.clear();
            });
        });

        group.bench_function(format!("infow_{}", format), |b| {
            b.iter(|| {
                logger.infow(
                    black_box("request served"),
                    &kv!["status", 200, "path", "/health"],
                );
                sink.clear();
            });
        });
    }

    group.finish();
}

// ============================================================================
// Derivation Benchmarks
// ============================================================================

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation");
    group.throughput(Throughput::Elements(1));

    let (logger, _sink) = memory_logger(LogLevel::Info, Format::Json);
    let ctx = Context::new()
        .with_value(KEY_REQUEST_ID, "req-1")
        .with_value(KEY_USERNAME, "alice");

    group.bench_function("with_values", |b| {
        b.iter(|| black_box(logger.with_values(&kv!["request", 1])));
    });

    group.bench_function("with_context", |b| {
        b.iter(|| black_box(logger.with_context(&ctx)));
    });

    group.finish();
}

criterion_group!(benches, bench_disabled, bench_enabled, bench_derivation);
criterion_main!(benches);
