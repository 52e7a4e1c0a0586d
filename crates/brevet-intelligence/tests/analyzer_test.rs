// ABOUTME: Integration tests for the analysis orchestrator
// ABOUTME: Validates section composition, rollup granularity, and serialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

use brevet_core::models::{AthleteZones, Lap, SportType, StreamBundle, StreamType};
use brevet_intelligence::analyzer::{ActivityAnalyzer, AnalysisRequest};
use serde_json::json;

/// A 20-minute interval session: three hard efforts with recoveries, a
/// climb in the first effort, heart rate and power throughout.
fn interval_session() -> StreamBundle {
    let len = 1200_usize;
    let time: Vec<f64> = (0..len).map(|i| i as f64).collect();

    // 240 s blocks: hard, easy, hard, easy, hard
    let block = |i: usize| (i / 240) % 2 == 0;
    let velocity: Vec<f64> = (0..len).map(|i| if block(i) { 4.0 } else { 1.0 }).collect();
    let heart_rate: Vec<f64> = (0..len).map(|i| if block(i) { 172.0 } else { 128.0 }).collect();
    let power: Vec<f64> = (0..len).map(|i| if block(i) { 280.0 } else { 120.0 }).collect();

    let mut distance = Vec::with_capacity(len);
    let mut total = 0.0;
    for &v in &velocity {
        total += v;
        distance.push(total);
    }
    // a steady 4 % grade over the opening effort, flat after
    let altitude: Vec<f64> = distance
        .iter()
        .map(|&d| if d <= 960.0 { d * 0.04 } else { 38.4 })
        .collect();

    StreamBundle::new()
        .with_channel(StreamType::Time, time)
        .with_channel(StreamType::Velocity, velocity)
        .with_channel(StreamType::HeartRate, heart_rate)
        .with_channel(StreamType::Watts, power)
        .with_channel(StreamType::Distance, distance)
        .with_channel(StreamType::Altitude, altitude)
}

fn athlete_zones() -> AthleteZones {
    AthleteZones::from_json(json!({
        "heart_rate": {
            "custom_zones": true,
            "zones": [
                {"min": 0, "max": 130},
                {"min": 130, "max": 150},
                {"min": 150, "max": 165},
                {"min": 165, "max": 178},
                {"min": 178, "max": -1},
            ],
        },
    }))
    .unwrap()
}

#[test]
fn composes_every_applicable_section() {
    let request = AnalysisRequest::new(interval_session(), SportType::Ride)
        .with_zones(athlete_zones());
    let analysis = ActivityAnalyzer::new().analyze(&request);

    assert!((analysis.summary.total_duration - 1199.0).abs() < f64::EPSILON);
    assert!(analysis.summary.avg_heartrate.is_some());
    assert!(analysis.summary.normalized_power.is_some());
    // no cadence sensor: absent, not zero
    assert!(analysis.summary.avg_cadence.is_none());

    let zones = analysis.zone_distribution.as_ref().unwrap();
    let hr = zones.heart_rate.as_ref().unwrap();
    let percent_total: u32 = hr.iter().map(|z| z.percent).sum();
    assert!((99..=101).contains(&percent_total));

    let intervals = analysis.intervals.as_ref().unwrap();
    assert_eq!(intervals.work_count, 3);
    assert!(analysis.segment_totals.is_some());

    // three work intervals make this an interval session
    let classification = analysis.classification.as_ref().unwrap();
    assert_eq!(format!("{:?}", classification.workout_type), "Intervals");

    let terrain = analysis.terrain.as_ref().unwrap();
    assert_eq!(terrain.climbs.len(), 1);
    assert!(terrain.climbs[0].gain_m > 20.0);

    assert!(analysis.drift.is_some());
    // no laps supplied: rollups come from work segments
    assert!(analysis.work_rollup.is_some());
    assert!(analysis.laps.is_none());
}

#[test]
fn manual_laps_switch_the_rollup_granularity() {
    let lap = |name: &str, start: usize, end: usize| Lap {
        name: name.to_owned(),
        start_index: Some(start),
        end_index: Some(end),
        moving_time: 240.0,
        distance: 960.0,
        average_speed: 4.0,
        average_heartrate: None,
        max_heartrate: None,
        average_cadence: None,
        start_date: None,
    };

    let request = AnalysisRequest::new(interval_session(), SportType::Ride)
        .with_laps(vec![
            lap("Effort 1", 0, 239),
            lap("Lap 2", 240, 479),
            lap("Effort 2", 480, 719),
        ]);
    let analysis = ActivityAnalyzer::new().analyze(&request);

    // only the two manual laps are rolled up; "Lap 2" is auto-generated
    let laps = analysis.laps.as_ref().unwrap();
    assert_eq!(laps.len(), 2);
    assert_eq!(laps[0].name, "Effort 1");
    assert!((laps[0].avg_heartrate.unwrap() - 172.0).abs() < f64::EPSILON);
    assert_eq!(analysis.summary.manual_laps_count, 2);
    assert!(analysis.work_rollup.is_none());
}

#[test]
fn sparse_input_yields_a_sparse_report() {
    let bundle = StreamBundle::new()
        .with_channel(StreamType::Time, (0..100).map(f64::from).collect())
        .with_channel(StreamType::HeartRate, vec![140.0; 100]);
    let request = AnalysisRequest::new(bundle, SportType::Run);
    let analysis = ActivityAnalyzer::new().analyze(&request);

    assert!(analysis.zone_distribution.is_none());
    assert!(analysis.intervals.is_none());
    assert!(analysis.terrain.is_none());
    assert!(analysis.work_rollup.is_none());
    assert!(analysis.classification.is_none());
    // drift still works from heart rate alone
    assert!(analysis.drift.is_some());
    assert_eq!(analysis.summary.avg_pace, "-");
}

#[test]
fn serialized_report_omits_absent_sections() {
    let bundle = StreamBundle::new()
        .with_channel(StreamType::Time, (0..100).map(f64::from).collect())
        .with_channel(StreamType::HeartRate, vec![140.0; 100]);
    let request = AnalysisRequest::new(bundle, SportType::Run);
    let analysis = ActivityAnalyzer::new().analyze(&request);

    let value = analysis.to_json().unwrap();
    let report = value.as_object().unwrap();

    assert!(report.contains_key("summary"));
    assert!(report.contains_key("drift"));
    assert!(!report.contains_key("zone_distribution"));
    assert!(!report.contains_key("intervals"));
    assert!(!report.contains_key("terrain"));
    assert!(!report.contains_key("classification"));

    let summary = report["summary"].as_object().unwrap();
    assert!(!summary.contains_key("avg_power"));
    assert!(summary.contains_key("avg_heartrate"));
}

#[test]
fn stream_bundle_wire_payload_feeds_the_analyzer() {
    let payload = json!([
        {"type": "time", "data": [0, 60, 120, 180, 240]},
        {"type": "heartrate", "data": [130, 135, null, 140, 145]},
        {"type": "latlng", "data": [[45.5, -73.5], [45.5, -73.5], [45.5, -73.5], [45.5, -73.5], [45.5, -73.5]]},
    ]);
    let bundle = StreamBundle::from_json(payload).unwrap();
    let request = AnalysisRequest::new(bundle, SportType::Run);
    let analysis = ActivityAnalyzer::new().analyze(&request);

    assert!(analysis.summary.avg_heartrate.is_some());
    assert!((analysis.summary.total_duration - 240.0).abs() < f64::EPSILON);
}
