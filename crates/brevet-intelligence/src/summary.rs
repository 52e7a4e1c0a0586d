// ABOUTME: Activity summary, overall per-channel statistics, and metric rollups
// ABOUTME: Totals come from raw streams, never from segment sums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Summary aggregation.
//!
//! Totals are read from the raw streams directly: summing segments would
//! double-drop the time excluded by gap handling and merging. Rollups exist
//! at two granularities: per manual lap when the caller supplied lap
//! boundaries, and duration-weighted across detected work segments otherwise.

use brevet_core::models::{Lap, StreamBundle, StreamType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::math::{
    elevation_delta, mean, mps_to_kph, normalized_power, positive_mean, range_stats,
    round_to_tenth, velocity_to_pace, RangeStats,
};
use crate::segmentation::{Interval, SegmentType};

/// Activity-scoped aggregate summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Total elapsed duration in seconds
    pub total_duration: f64,
    /// Total distance in meters
    pub total_distance: f64,
    /// Total elevation gain in meters
    pub total_elevation_gain: f64,
    /// Number of manual laps supplied by the caller
    pub manual_laps_count: usize,
    /// Average pace per kilometer
    pub avg_pace: String,
    /// Average heart rate, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_heartrate: Option<f64>,
    /// Maximum heart rate, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heartrate: Option<f64>,
    /// Average power, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_power: Option<f64>,
    /// Normalized power; `0` marks an effort too short for the rolling window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_power: Option<f64>,
    /// Average cadence, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_cadence: Option<f64>,
}

/// Velocity statistics in km/h; zeros when no velocity stream was recorded
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VelocityStats {
    /// Slowest moving sample
    pub min_kph: f64,
    /// Fastest sample
    pub max_kph: f64,
    /// Mean over moving samples
    pub avg_kph: f64,
}

/// Power statistics with normalized power attached
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerStats {
    /// Smallest valid sample
    pub min: f64,
    /// Largest valid sample
    pub max: f64,
    /// Mean of valid samples
    pub avg: f64,
    /// Normalized power; `0` for efforts shorter than the rolling window
    pub normalized: f64,
}

/// Altitude extremes and accumulated gain/loss
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AltitudeStats {
    /// Lowest altitude sample
    pub min: f64,
    /// Highest altitude sample
    pub max: f64,
    /// Accumulated gain in meters
    pub gain: f64,
    /// Accumulated loss in meters
    pub loss: f64,
}

/// Min/max/average statistics per available channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallStats {
    /// Velocity statistics (zeros when unrecorded)
    pub velocity: VelocityStats,
    /// Heart-rate statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heartrate: Option<RangeStats>,
    /// Power statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<PowerStats>,
    /// Cadence statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<RangeStats>,
    /// Altitude statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<AltitudeStats>,
}

/// Per-lap metric rollup over a caller-supplied manual lap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapRollup {
    /// 1-based position among the manual laps
    pub lap_number: usize,
    /// Lap name as recorded on the platform
    pub name: String,
    /// Moving time in seconds
    pub duration: f64,
    /// Distance in meters
    pub distance: f64,
    /// Average pace per kilometer
    pub avg_pace: String,
    /// Mean heart rate over the lap's samples, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_heartrate: Option<f64>,
    /// Maximum heart rate over the lap's samples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heartrate: Option<f64>,
    /// Mean power over the lap's samples, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_power: Option<f64>,
    /// Mean cadence over the lap's samples, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_cadence: Option<f64>,
    /// Elevation gain over the lap's samples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    /// When the lap started (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
}

/// Duration-weighted averages across detected work segments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkRollup {
    /// Number of work segments rolled up
    pub work_segment_count: usize,
    /// Combined work duration in seconds
    pub total_work_duration: f64,
    /// Weighted average heart rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_heartrate: Option<f64>,
    /// Weighted average power
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_power: Option<f64>,
    /// Weighted average cadence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_cadence: Option<f64>,
    /// Weighted average speed in km/h
    pub avg_speed_kph: f64,
}

/// Assemble the activity summary from the raw streams.
#[must_use]
pub fn workout_summary(streams: &StreamBundle, manual_laps_count: usize) -> WorkoutSummary {
    let time = streams.get(StreamType::Time).unwrap_or(&[]);
    let distance = streams.get(StreamType::Distance).unwrap_or(&[]);
    let velocity = streams.get(StreamType::Velocity).unwrap_or(&[]);
    let altitude = streams.get(StreamType::Altitude).unwrap_or(&[]);

    let total_duration = if time.len() > 1 {
        (time[time.len() - 1] - time[0]).round()
    } else {
        0.0
    };
    let total_distance = if distance.len() > 1 {
        distance[distance.len() - 1].round()
    } else {
        0.0
    };

    let avg_pace = positive_mean(velocity)
        .map_or_else(|| "-".to_owned(), |avg| velocity_to_pace(mps_to_kph(avg)));

    let heart_rate = streams.get(StreamType::HeartRate).and_then(range_stats);
    let power_valid: Option<Vec<f64>> = streams.get(StreamType::Watts).map(|watts| {
        watts.iter().copied().filter(|&w| w > 0.0).collect::<Vec<f64>>()
    });
    let power_valid = power_valid.filter(|valid| !valid.is_empty());

    WorkoutSummary {
        total_duration,
        total_distance,
        total_elevation_gain: elevation_delta(altitude).gain,
        manual_laps_count,
        avg_pace,
        avg_heartrate: heart_rate.as_ref().map(|stats| stats.avg),
        max_heartrate: heart_rate.as_ref().map(|stats| stats.max),
        avg_power: power_valid.as_ref().map(|valid| mean(valid).round()),
        normalized_power: power_valid.as_ref().map(|valid| normalized_power(valid)),
        avg_cadence: streams
            .get(StreamType::Cadence)
            .and_then(positive_mean)
            .map(f64::round),
    }
}

/// Per-channel min/max/average statistics over the whole activity.
#[must_use]
pub fn overall_stats(streams: &StreamBundle) -> OverallStats {
    let velocity = streams
        .get(StreamType::Velocity)
        .and_then(range_stats)
        .map_or_else(VelocityStats::default, |stats| VelocityStats {
            min_kph: round_to_tenth(mps_to_kph(stats.min)),
            max_kph: round_to_tenth(mps_to_kph(stats.max)),
            // range_stats rounds to whole units; recompute the mean in km/h
            avg_kph: round_to_tenth(mps_to_kph(
                streams
                    .get(StreamType::Velocity)
                    .and_then(positive_mean)
                    .unwrap_or(0.0),
            )),
        });

    let power = streams.get(StreamType::Watts).and_then(|watts| {
        range_stats(watts).map(|stats| {
            let valid: Vec<f64> = watts.iter().copied().filter(|&w| w > 0.0).collect();
            PowerStats {
                min: stats.min,
                max: stats.max,
                avg: stats.avg,
                normalized: normalized_power(&valid),
            }
        })
    });

    let altitude = streams
        .get(StreamType::Altitude)
        .filter(|samples| !samples.is_empty())
        .map(|samples| {
            let delta = elevation_delta(samples);
            AltitudeStats {
                min: samples.iter().copied().fold(f64::INFINITY, f64::min).round(),
                max: samples
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max)
                    .round(),
                gain: delta.gain,
                loss: delta.loss,
            }
        });

    OverallStats {
        velocity,
        heartrate: streams.get(StreamType::HeartRate).and_then(range_stats),
        power,
        cadence: streams.get(StreamType::Cadence).and_then(range_stats),
        altitude,
    }
}

/// Roll up the caller's manual laps against the sample streams.
///
/// Laps without sample indices (or with indices outside the recorded
/// streams) degrade to the platform-reported lap averages.
#[must_use]
pub fn lap_rollups(laps: &[Lap], streams: &StreamBundle) -> Vec<LapRollup> {
    laps.iter()
        .filter(|lap| lap.is_manual())
        .enumerate()
        .map(|(index, lap)| build_lap_rollup(index + 1, lap, streams))
        .collect()
}

/// Duration-weighted metric averages across work segments.
///
/// A metric missing on the first work segment is unavailable for the whole
/// rollup; later segments missing it are excluded from that metric's weights.
#[must_use]
pub fn work_rollup(intervals: &[Interval]) -> Option<WorkRollup> {
    let work: Vec<&Interval> = intervals
        .iter()
        .filter(|interval| interval.segment_type == SegmentType::Work)
        .collect();
    let first = work.first()?;

    let weighted = |metric: fn(&Interval) -> Option<f64>| -> Option<f64> {
        metric(first)?;
        let mut value_sum = 0.0;
        let mut weight_sum = 0.0;
        for interval in &work {
            if let Some(value) = metric(interval) {
                value_sum += value * interval.duration;
                weight_sum += interval.duration;
            }
        }
        if weight_sum > 0.0 {
            Some((value_sum / weight_sum).round())
        } else {
            None
        }
    };

    let total_work_duration: f64 = work.iter().map(|interval| interval.duration).sum();
    let speed_weighted = if total_work_duration > 0.0 {
        round_to_tenth(
            work.iter()
                .map(|interval| interval.avg_speed_kph * interval.duration)
                .sum::<f64>()
                / total_work_duration,
        )
    } else {
        0.0
    };

    Some(WorkRollup {
        work_segment_count: work.len(),
        total_work_duration,
        avg_heartrate: weighted(|interval| interval.avg_heartrate),
        avg_power: weighted(|interval| interval.avg_power),
        avg_cadence: weighted(|interval| interval.avg_cadence),
        avg_speed_kph: speed_weighted,
    })
}

fn build_lap_rollup(lap_number: usize, lap: &Lap, streams: &StreamBundle) -> LapRollup {
    let slice_of = |stream_type: StreamType| -> Option<Vec<f64>> {
        let samples = streams.get(stream_type)?;
        let start = lap.start_index?;
        let end = lap.end_index?.min(samples.len().saturating_sub(1));
        if start > end || samples.is_empty() {
            return None;
        }
        Some(samples[start..=end].to_vec())
    };

    let hr_slice = slice_of(StreamType::HeartRate)
        .map(|samples| samples.into_iter().filter(|&v| v > 0.0).collect::<Vec<f64>>())
        .filter(|valid| !valid.is_empty());
    let (avg_heartrate, max_heartrate) = hr_slice.as_ref().map_or_else(
        || {
            (
                lap.average_heartrate.map(f64::round),
                lap.max_heartrate,
            )
        },
        |valid| {
            (
                Some(mean(valid).round()),
                Some(valid.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            )
        },
    );

    let avg_power = slice_of(StreamType::Watts)
        .and_then(|samples| positive_mean(&samples))
        .map(f64::round);

    let avg_cadence = slice_of(StreamType::Cadence)
        .and_then(|samples| positive_mean(&samples))
        .map(f64::round)
        .or_else(|| lap.average_cadence.map(f64::round));

    let elevation_gain = slice_of(StreamType::Altitude)
        .map(|samples| elevation_delta(&samples).gain);

    LapRollup {
        lap_number,
        name: lap.name.clone(),
        duration: lap.moving_time,
        distance: lap.distance.round(),
        avg_pace: velocity_to_pace(mps_to_kph(lap.average_speed)),
        avg_heartrate,
        max_heartrate,
        avg_power,
        avg_cadence,
        elevation_gain,
        start_date: lap.start_date,
    }
}
