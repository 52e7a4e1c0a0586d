// ABOUTME: Criterion benchmarks for the analysis engine algorithms
// ABOUTME: Measures normalized power, zone binning, and interval detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Criterion benchmarks for the analysis engine.
//!
//! Series lengths model a one-hour activity at 1 Hz sampling.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use brevet_core::models::{StreamBundle, StreamType, ZoneBand};
use brevet_intelligence::config::AnalysisConfig;
use brevet_intelligence::math::normalized_power;
use brevet_intelligence::segmentation::detect_intervals;
use brevet_intelligence::zones::time_in_zones;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const ONE_HOUR_SAMPLES: usize = 3600;

fn synthetic_power() -> Vec<f64> {
    (0..ONE_HOUR_SAMPLES)
        .map(|i| 180.0 + 80.0 * f64::from(u32::try_from(i % 60).unwrap_or(0)) / 60.0)
        .collect()
}

fn synthetic_heart_rate() -> Vec<f64> {
    (0..ONE_HOUR_SAMPLES)
        .map(|i| 120.0 + 40.0 * f64::from(u32::try_from(i % 600).unwrap_or(0)) / 600.0)
        .collect()
}

fn uniform_time() -> Vec<f64> {
    (0..ONE_HOUR_SAMPLES).map(|i| i as f64).collect()
}

fn bench_normalized_power(c: &mut Criterion) {
    let power = synthetic_power();
    let mut group = c.benchmark_group("normalized_power");
    group.throughput(Throughput::Elements(ONE_HOUR_SAMPLES as u64));
    group.bench_function("one_hour", |b| {
        b.iter(|| normalized_power(black_box(&power)));
    });
    group.finish();
}

fn bench_zone_binning(c: &mut Criterion) {
    let heart_rate = synthetic_heart_rate();
    let time = uniform_time();
    let bands = vec![
        ZoneBand::new(0.0, Some(130.0)),
        ZoneBand::new(130.0, Some(145.0)),
        ZoneBand::new(145.0, Some(155.0)),
        ZoneBand::new(155.0, Some(165.0)),
        ZoneBand::new(165.0, None),
    ];
    let names = ["Z1", "Z2", "Z3", "Z4", "Z5"];
    let config = AnalysisConfig::default();

    let mut group = c.benchmark_group("zone_binning");
    group.throughput(Throughput::Elements(ONE_HOUR_SAMPLES as u64));
    group.bench_function("one_hour", |b| {
        b.iter(|| {
            time_in_zones(
                black_box(&heart_rate),
                black_box(&time),
                &bands,
                &names,
                &config,
            )
        });
    });
    group.finish();
}

fn bench_interval_detection(c: &mut Criterion) {
    let velocity: Vec<f64> = (0..ONE_HOUR_SAMPLES)
        .map(|i| if (i / 300) % 2 == 0 { 4.0 } else { 1.2 })
        .collect();
    let bundle = StreamBundle::new()
        .with_channel(StreamType::Time, uniform_time())
        .with_channel(StreamType::Velocity, velocity);
    let config = AnalysisConfig::default();

    c.bench_function("interval_detection/one_hour", |b| {
        b.iter(|| detect_intervals(black_box(&bundle), &config));
    });
}

criterion_group!(
    benches,
    bench_normalized_power,
    bench_zone_binning,
    bench_interval_detection
);
criterion_main!(benches);
