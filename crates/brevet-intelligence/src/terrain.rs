// ABOUTME: Grade-based climb detection and terrain distribution
// ABOUTME: Sustained-grade run detection with a minimum-gain emission threshold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Terrain analysis.
//!
//! Instantaneous grade is the altitude delta over the horizontal distance
//! delta per step; steps that cover no forward distance are skipped. A climb
//! is a run of steps at or above the minimum grade; only runs accumulating
//! the minimum elevation gain are emitted. Separately, every step is bucketed
//! climbing/flat/descending to profile the activity's terrain mix.

use brevet_core::models::{StreamBundle, StreamType};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AnalysisConfig;
use crate::math::{positive_mean, round_to_tenth};
use crate::physiological_constants::climbs::MIN_ELEVATION_SAMPLES;

/// One detected climb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Climb {
    /// Distance marker where the climb starts, in meters from activity start
    pub start_distance_m: f64,
    /// Distance marker where the climb ends
    pub end_distance_m: f64,
    /// Total elevation gained over the climb, in meters
    pub gain_m: f64,
    /// Average grade over the climb, in percent
    pub avg_grade_percent: f64,
    /// Mean heart rate over the climb, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_heartrate: Option<f64>,
    /// Mean power over the climb, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_power: Option<f64>,
    /// Mean cadence over the climb, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_cadence: Option<f64>,
}

/// Share of one terrain bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainShare {
    /// Percent of total horizontal distance spent in this bucket
    pub distance_percent: f64,
    /// Distance-weighted average grade within the bucket, in percent
    pub avg_grade_percent: f64,
}

/// Distance-weighted terrain mix of the activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerrainDistribution {
    /// Steps at or above the climbing grade
    pub climbing: TerrainShare,
    /// Steps within the flat band
    pub flat: TerrainShare,
    /// Steps at or below the descending grade
    pub descending: TerrainShare,
}

/// Climbs and terrain mix for one activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainAnalysis {
    /// Detected climbs in activity order
    pub climbs: Vec<Climb>,
    /// Terrain mix over the whole activity
    pub distribution: TerrainDistribution,
}

/// An in-progress climb run during the scan
struct ClimbRun {
    start: usize,
    end: usize,
    gain: f64,
}

/// Detect climbs: contiguous runs at or above the minimum grade that
/// accumulate at least the minimum elevation gain.
#[must_use]
pub fn detect_climbs(streams: &StreamBundle, config: &AnalysisConfig) -> Option<Vec<Climb>> {
    let (distance, altitude) = aligned_elevation_streams(streams)?;

    let mut climbs: Vec<Climb> = Vec::new();
    let mut run: Option<ClimbRun> = None;

    for i in 1..distance.len() {
        let horizontal = distance[i] - distance[i - 1];
        if horizontal <= 0.0 {
            continue;
        }
        let rise = altitude[i] - altitude[i - 1];
        let grade = rise / horizontal * 100.0;

        if grade >= config.min_climb_grade_percent {
            let current = run.get_or_insert(ClimbRun {
                start: i - 1,
                end: i,
                gain: 0.0,
            });
            current.end = i;
            current.gain += rise;
        } else if let Some(finished) = run.take() {
            if let Some(climb) = emit_climb(&finished, streams, distance, config) {
                climbs.push(climb);
            }
        }
    }
    if let Some(finished) = run.take() {
        if let Some(climb) = emit_climb(&finished, streams, distance, config) {
            climbs.push(climb);
        }
    }

    Some(climbs)
}

/// Bucket every step climbing/flat/descending and report each bucket's share
/// of horizontal distance and its distance-weighted average grade.
#[must_use]
pub fn terrain_distribution(
    streams: &StreamBundle,
    config: &AnalysisConfig,
) -> Option<TerrainDistribution> {
    let (distance, altitude) = aligned_elevation_streams(streams)?;

    // (distance, grade * distance) accumulators per bucket
    let mut climbing = (0.0, 0.0);
    let mut flat = (0.0, 0.0);
    let mut descending = (0.0, 0.0);

    for i in 1..distance.len() {
        let horizontal = distance[i] - distance[i - 1];
        if horizontal <= 0.0 {
            continue;
        }
        let grade = (altitude[i] - altitude[i - 1]) / horizontal * 100.0;
        let bucket = if grade >= config.flat_grade_band_percent {
            &mut climbing
        } else if grade <= -config.flat_grade_band_percent {
            &mut descending
        } else {
            &mut flat
        };
        bucket.0 += horizontal;
        bucket.1 += grade * horizontal;
    }

    let total = climbing.0 + flat.0 + descending.0;
    if total <= 0.0 {
        return None;
    }

    let share = |(bucket_distance, weighted_grade): (f64, f64)| TerrainShare {
        distance_percent: round_to_tenth(bucket_distance / total * 100.0),
        avg_grade_percent: if bucket_distance > 0.0 {
            round_to_tenth(weighted_grade / bucket_distance)
        } else {
            0.0
        },
    };

    Some(TerrainDistribution {
        climbing: share(climbing),
        flat: share(flat),
        descending: share(descending),
    })
}

/// Compose climb detection and terrain distribution; absent when the bundle
/// lacks usable elevation data.
#[must_use]
pub fn analyze_terrain(streams: &StreamBundle, config: &AnalysisConfig) -> Option<TerrainAnalysis> {
    let distribution = terrain_distribution(streams, config)?;
    let climbs = detect_climbs(streams, config)?;
    Some(TerrainAnalysis {
        climbs,
        distribution,
    })
}

/// Co-indexed distance and altitude, or `None` when either is missing, the
/// lengths differ, or the series is too short to profile.
fn aligned_elevation_streams(streams: &StreamBundle) -> Option<(&[f64], &[f64])> {
    let distance = streams.get(StreamType::Distance)?;
    let altitude = streams.get(StreamType::Altitude)?;
    if distance.len() != altitude.len() {
        warn!(
            distance_len = distance.len(),
            altitude_len = altitude.len(),
            "distance and altitude stream lengths differ, skipping terrain analysis"
        );
        return None;
    }
    if distance.len() < MIN_ELEVATION_SAMPLES {
        return None;
    }
    Some((distance, altitude))
}

fn emit_climb(
    run: &ClimbRun,
    streams: &StreamBundle,
    distance: &[f64],
    config: &AnalysisConfig,
) -> Option<Climb> {
    if run.gain < config.min_climb_gain_meters {
        return None;
    }
    let horizontal = distance[run.end] - distance[run.start];
    if horizontal <= 0.0 {
        return None;
    }

    let channel_mean = |stream_type: StreamType| {
        streams
            .get(stream_type)
            .filter(|samples| samples.len() == distance.len())
            .and_then(|samples| positive_mean(&samples[run.start..=run.end]))
            .map(f64::round)
    };

    Some(Climb {
        start_distance_m: distance[run.start].round(),
        end_distance_m: distance[run.end].round(),
        gain_m: round_to_tenth(run.gain),
        avg_grade_percent: round_to_tenth(run.gain / horizontal * 100.0),
        avg_heartrate: channel_mean(StreamType::HeartRate),
        avg_power: channel_mean(StreamType::Watts),
        avg_cadence: channel_mean(StreamType::Cadence),
    })
}
