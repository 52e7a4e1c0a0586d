// ABOUTME: Unit tests for work/rest interval segmentation
// ABOUTME: Validates run-length encoding, merging, noise filtering, and relabeling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

use brevet_core::models::{StreamBundle, StreamType};
use brevet_intelligence::config::AnalysisConfig;
use brevet_intelligence::segmentation::{detect_intervals, segment_tallies, SegmentType};

fn bundle_with_velocity(velocity: Vec<f64>) -> StreamBundle {
    let time: Vec<f64> = (0..velocity.len()).map(|i| i as f64).collect();
    StreamBundle::new()
        .with_channel(StreamType::Time, time)
        .with_channel(StreamType::Velocity, velocity)
}

#[test]
fn detects_work_rest_work_pattern() {
    let mut velocity = vec![3.0; 400];
    velocity.extend(vec![1.0; 400]);
    velocity.extend(vec![3.0; 400]);
    let bundle = bundle_with_velocity(velocity);

    let analysis = detect_intervals(&bundle, &AnalysisConfig::default()).unwrap();

    // threshold = min(3.0 * 0.5, 2.5) = 1.5 m/s
    assert!((analysis.threshold_mps - 1.5).abs() < f64::EPSILON);
    assert_eq!(analysis.intervals.len(), 3);
    assert_eq!(analysis.intervals[0].segment_type, SegmentType::Work);
    assert_eq!(analysis.intervals[1].segment_type, SegmentType::Rest);
    assert_eq!(analysis.intervals[2].segment_type, SegmentType::Work);
    assert_eq!(analysis.work_count, 2);
    for interval in &analysis.intervals {
        assert!((interval.duration - 399.0).abs() < f64::EPSILON);
    }
}

#[test]
fn short_rest_blips_are_absorbed_into_work() {
    let mut velocity = vec![3.0; 300];
    velocity.extend(vec![1.0; 10]); // 10 s blip, below the 30 s merge floor
    velocity.extend(vec![3.0; 300]);
    let bundle = bundle_with_velocity(velocity);

    let analysis = detect_intervals(&bundle, &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.intervals.len(), 1);
    assert_eq!(analysis.intervals[0].segment_type, SegmentType::Work);
    assert_eq!(analysis.intervals[0].start_index, 0);
    assert_eq!(analysis.intervals[0].end_index, 609);
}

#[test]
fn segments_below_the_minimum_duration_are_dropped() {
    let mut velocity = vec![3.0; 200];
    velocity.extend(vec![1.0; 45]); // survives merging, fails the 60 s floor
    velocity.extend(vec![3.0; 200]);
    let bundle = bundle_with_velocity(velocity);

    let analysis = detect_intervals(&bundle, &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.intervals.len(), 2);
    assert!(analysis
        .intervals
        .iter()
        .all(|interval| interval.segment_type == SegmentType::Work));
}

#[test]
fn merge_then_filter_is_idempotent() {
    let mut velocity = vec![3.0; 400];
    velocity.extend(vec![1.0; 10]);
    velocity.extend(vec![3.0; 150]);
    velocity.extend(vec![1.0; 400]);
    velocity.extend(vec![3.0; 45]);
    velocity.extend(vec![1.0; 200]);
    let bundle = bundle_with_velocity(velocity);

    let analysis = detect_intervals(&bundle, &AnalysisConfig::default()).unwrap();

    for interval in &analysis.intervals {
        assert!(
            interval.duration >= 60.0,
            "noise segment survived: {} s",
            interval.duration
        );
    }
    for pair in analysis.intervals.windows(2) {
        // contiguous neighbors must alternate; a dropped noise segment may
        // leave a gap between same-typed entries, which is not a merge miss
        if pair[0].end_index + 1 == pair[1].start_index {
            assert_ne!(
                pair[0].segment_type, pair[1].segment_type,
                "contiguous segments share a type that should have merged"
            );
        }
    }
}

#[test]
fn slow_opening_work_segment_becomes_warmup() {
    // opening effort at 40 % of max velocity, still above the work threshold
    let mut velocity = vec![2.0; 300];
    velocity.extend(vec![5.0; 300]);
    velocity.extend(vec![1.0; 300]);
    let bundle = bundle_with_velocity(velocity);

    let analysis = detect_intervals(&bundle, &AnalysisConfig::default()).unwrap();

    // threshold = min(5.0 * 0.5, 2.5) = 2.5; 2.0 m/s is rest, 5.0 is work
    assert_eq!(analysis.intervals[0].segment_type, SegmentType::Rest);

    // opening speed above the threshold but below 70 % of max, separated
    // from the main effort by a rest period
    let mut velocity = vec![3.0; 300];
    velocity.extend(vec![1.0; 120]);
    velocity.extend(vec![5.0; 300]);
    let bundle = bundle_with_velocity(velocity);
    let analysis = detect_intervals(&bundle, &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.intervals[0].segment_type, SegmentType::Warmup);
    assert_eq!(analysis.intervals[1].segment_type, SegmentType::Rest);
    assert_eq!(analysis.intervals[2].segment_type, SegmentType::Work);
    assert_eq!(analysis.work_count, 1);
}

#[test]
fn slow_closing_work_segment_becomes_cooldown() {
    let mut velocity = vec![5.0; 300];
    velocity.extend(vec![1.0; 120]);
    velocity.extend(vec![3.0; 300]);
    let bundle = bundle_with_velocity(velocity);

    let analysis = detect_intervals(&bundle, &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.intervals[0].segment_type, SegmentType::Work);
    assert_eq!(analysis.intervals[1].segment_type, SegmentType::Rest);
    assert_eq!(analysis.intervals[2].segment_type, SegmentType::Cooldown);
}

#[test]
fn attaches_channel_means_when_streams_align() {
    let mut velocity = vec![3.0; 200];
    velocity.extend(vec![1.0; 200]);
    let len = velocity.len();
    let mut heart_rate = vec![160.0; 200];
    heart_rate.extend(vec![120.0; 200]);
    let bundle = bundle_with_velocity(velocity)
        .with_channel(StreamType::HeartRate, heart_rate)
        .with_channel(StreamType::Distance, (0..len).map(|i| i as f64 * 3.0).collect());

    let analysis = detect_intervals(&bundle, &AnalysisConfig::default()).unwrap();

    let work = &analysis.intervals[0];
    assert!((work.avg_heartrate.unwrap() - 160.0).abs() < f64::EPSILON);
    assert!(work.distance.unwrap() > 0.0);
    // power sensor absent: the field is omitted, not zero
    assert!(work.avg_power.is_none());
}

#[test]
fn requires_velocity_and_time() {
    let config = AnalysisConfig::default();
    assert!(detect_intervals(&StreamBundle::new(), &config).is_none());

    let only_velocity = StreamBundle::new().with_channel(StreamType::Velocity, vec![3.0; 100]);
    assert!(detect_intervals(&only_velocity, &config).is_none());

    // mismatched lengths degrade to absence
    let mismatched = StreamBundle::new()
        .with_channel(StreamType::Velocity, vec![3.0; 100])
        .with_channel(StreamType::Time, (0..90).map(|i| i as f64).collect());
    assert!(detect_intervals(&mismatched, &config).is_none());
}

#[test]
fn tallies_count_and_total_by_type() {
    let mut velocity = vec![3.0; 400];
    velocity.extend(vec![1.0; 400]);
    velocity.extend(vec![3.0; 400]);
    let bundle = bundle_with_velocity(velocity);

    let analysis = detect_intervals(&bundle, &AnalysisConfig::default()).unwrap();
    let tallies = segment_tallies(&analysis.intervals);

    let work = tallies
        .iter()
        .find(|tally| tally.segment_type == SegmentType::Work)
        .unwrap();
    assert_eq!(work.count, 2);
    assert!((work.total_duration - 798.0).abs() < f64::EPSILON);
}
