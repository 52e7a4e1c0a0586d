// ABOUTME: Unit tests for climb detection and terrain distribution
// ABOUTME: Validates grade runs, the minimum-gain threshold, and distance bucketing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

use brevet_core::models::{StreamBundle, StreamType};
use brevet_intelligence::config::AnalysisConfig;
use brevet_intelligence::terrain::{analyze_terrain, detect_climbs, terrain_distribution};

/// 5 % grade for the first 500 m, flat for the next 500 m, 100 m sampling
fn climb_then_flat() -> StreamBundle {
    let distance: Vec<f64> = (0..=10).map(|i| f64::from(i) * 100.0).collect();
    let altitude: Vec<f64> = (0..=10)
        .map(|i| if i <= 5 { f64::from(i) * 5.0 } else { 25.0 })
        .collect();
    StreamBundle::new()
        .with_channel(StreamType::Distance, distance)
        .with_channel(StreamType::Altitude, altitude)
}

#[test]
fn detects_a_single_climb_with_gain_and_grade() {
    let climbs = detect_climbs(&climb_then_flat(), &AnalysisConfig::default()).unwrap();

    assert_eq!(climbs.len(), 1);
    let climb = &climbs[0];
    assert!((climb.start_distance_m - 0.0).abs() < f64::EPSILON);
    assert!((climb.end_distance_m - 500.0).abs() < f64::EPSILON);
    assert!((climb.gain_m - 25.0).abs() < f64::EPSILON);
    assert!((climb.avg_grade_percent - 5.0).abs() < 0.05);
}

#[test]
fn climbs_below_the_gain_threshold_are_discarded() {
    // 3 % grade over 300 m gains only 9 m
    let distance: Vec<f64> = (0..=10).map(|i| f64::from(i) * 100.0).collect();
    let altitude: Vec<f64> = (0..=10)
        .map(|i| if i <= 3 { f64::from(i) * 3.0 } else { 9.0 })
        .collect();
    let bundle = StreamBundle::new()
        .with_channel(StreamType::Distance, distance)
        .with_channel(StreamType::Altitude, altitude);

    let climbs = detect_climbs(&bundle, &AnalysisConfig::default()).unwrap();
    assert!(climbs.is_empty());
}

#[test]
fn zero_distance_steps_are_skipped() {
    // a stopped recording repeats the same distance marker
    let distance = vec![0.0, 100.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0];
    let altitude = vec![0.0, 5.0, 5.0, 10.0, 15.0, 20.0, 25.0, 25.0, 25.0, 25.0];
    let bundle = StreamBundle::new()
        .with_channel(StreamType::Distance, distance)
        .with_channel(StreamType::Altitude, altitude);

    let climbs = detect_climbs(&bundle, &AnalysisConfig::default()).unwrap();
    assert_eq!(climbs.len(), 1);
    assert!((climbs[0].gain_m - 25.0).abs() < f64::EPSILON);
}

#[test]
fn distribution_splits_distance_between_buckets() {
    let distribution =
        terrain_distribution(&climb_then_flat(), &AnalysisConfig::default()).unwrap();

    assert!((distribution.climbing.distance_percent - 50.0).abs() < f64::EPSILON);
    assert!((distribution.climbing.avg_grade_percent - 5.0).abs() < 0.05);
    assert!((distribution.flat.distance_percent - 50.0).abs() < f64::EPSILON);
    assert!((distribution.descending.distance_percent - 0.0).abs() < f64::EPSILON);

    let total = distribution.climbing.distance_percent
        + distribution.flat.distance_percent
        + distribution.descending.distance_percent;
    assert!((total - 100.0).abs() < 0.2);
}

#[test]
fn requires_enough_aligned_elevation_samples() {
    let config = AnalysisConfig::default();

    // below the 10-sample minimum
    let short = StreamBundle::new()
        .with_channel(StreamType::Distance, vec![0.0, 100.0, 200.0])
        .with_channel(StreamType::Altitude, vec![0.0, 5.0, 10.0]);
    assert!(analyze_terrain(&short, &config).is_none());

    // mismatched lengths degrade to absence
    let mismatched = StreamBundle::new()
        .with_channel(StreamType::Distance, (0..=10).map(|i| f64::from(i) * 100.0).collect())
        .with_channel(StreamType::Altitude, vec![0.0; 8]);
    assert!(analyze_terrain(&mismatched, &config).is_none());

    // missing altitude entirely
    let no_altitude = StreamBundle::new()
        .with_channel(StreamType::Distance, (0..=10).map(|i| f64::from(i) * 100.0).collect());
    assert!(analyze_terrain(&no_altitude, &config).is_none());
}

#[test]
fn attaches_effort_means_over_the_climb() {
    let bundle = climb_then_flat()
        .with_channel(
            StreamType::HeartRate,
            vec![160.0, 160.0, 160.0, 160.0, 160.0, 160.0, 120.0, 120.0, 120.0, 120.0, 120.0],
        );

    let climbs = detect_climbs(&bundle, &AnalysisConfig::default()).unwrap();
    assert!((climbs[0].avg_heartrate.unwrap() - 160.0).abs() < f64::EPSILON);
    assert!(climbs[0].avg_power.is_none());
}
