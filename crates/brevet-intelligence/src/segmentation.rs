// ABOUTME: Velocity-based work/rest interval segmentation
// ABOUTME: Run-length encode, absorb short runs, drop noise, relabel boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Interval segmentation.
//!
//! Samples are classified work/rest against a velocity threshold derived from
//! the activity's own maximum, run-length encoded into raw segments, then
//! cleaned in two passes: raw segments shorter than the merge floor are
//! absorbed into their predecessor (extending its boundary, so no time is
//! silently dropped by merging), and merged segments still shorter than the
//! minimum interval are discarded as noise. A slow opening or closing work
//! segment is relabeled warmup/cooldown.

use brevet_core::models::{StreamBundle, StreamType};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::math::{elevation_delta, mean, mps_to_kph, positive_mean, round_to_tenth, velocity_to_pace};

/// Classified segment kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentType {
    /// Effort above the work threshold
    Work,
    /// Recovery below the work threshold
    Rest,
    /// Opening work segment ridden well below peak effort
    Warmup,
    /// Closing work segment ridden well below peak effort
    Cooldown,
}

/// One detected interval: a contiguous index range with derived attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interval {
    /// Segment classification
    pub segment_type: SegmentType,
    /// First sample index
    pub start_index: usize,
    /// Last sample index (inclusive)
    pub end_index: usize,
    /// Seconds since activity start at the first sample
    pub start_time: f64,
    /// Seconds since activity start at the last sample
    pub end_time: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Distance covered in meters, when a distance stream is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Average speed in km/h, one decimal
    pub avg_speed_kph: f64,
    /// Average pace per kilometer
    pub avg_pace: String,
    /// Mean heart rate over the segment, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_heartrate: Option<f64>,
    /// Mean power over the segment, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_power: Option<f64>,
    /// Mean cadence over the segment, dropout-filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_cadence: Option<f64>,
    /// Elevation gain over the segment, when altitude is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
}

/// The interval analysis for one activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalAnalysis {
    /// The rest/work velocity threshold used, in m/s
    pub threshold_mps: f64,
    /// Number of segments classified as work after relabeling
    pub work_count: usize,
    /// Detected intervals in activity order
    pub intervals: Vec<Interval>,
}

/// Count and accumulated duration for one segment type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentTally {
    /// Segment classification
    pub segment_type: SegmentType,
    /// How many segments of this type were detected
    pub count: usize,
    /// Their combined duration in seconds
    pub total_duration: f64,
}

/// An index run sharing one work/rest classification
#[derive(Debug, Clone, Copy)]
struct Run {
    is_work: bool,
    start: usize,
    end: usize,
}

/// Detect work/rest intervals from the velocity stream.
///
/// Requires co-indexed velocity and time; absent or misaligned streams yield
/// `None` (the analysis section is omitted, not zero-filled).
#[must_use]
pub fn detect_intervals(streams: &StreamBundle, config: &AnalysisConfig) -> Option<IntervalAnalysis> {
    let velocity = streams.get(StreamType::Velocity)?;
    let time = streams.get(StreamType::Time)?;
    if velocity.len() < 2 {
        return None;
    }
    if velocity.len() != time.len() {
        warn!(
            velocity_len = velocity.len(),
            time_len = time.len(),
            "velocity and time stream lengths differ, skipping interval detection"
        );
        return None;
    }

    let max_velocity = velocity.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max_velocity <= 0.0 {
        return None;
    }
    let threshold = (max_velocity * config.rest_fraction_of_max).min(config.rest_speed_ceiling_mps);

    let runs = run_length_encode(velocity, threshold);
    let merged = merge_short_runs(&runs, time, config.merge_floor_secs);

    let duration_of = |run: &Run| time[run.end] - time[run.start];
    let emitted: Vec<Run> = merged
        .into_iter()
        .filter(|run| duration_of(run) >= config.min_interval_secs)
        .collect();
    if emitted.is_empty() {
        debug!(threshold_mps = threshold, "no interval exceeded the minimum duration");
        return None;
    }

    let mut intervals: Vec<Interval> = emitted
        .iter()
        .map(|run| build_interval(run, streams, velocity, time))
        .collect();
    relabel_boundaries(&mut intervals, velocity, max_velocity, config);

    let work_count = intervals
        .iter()
        .filter(|interval| interval.segment_type == SegmentType::Work)
        .count();

    Some(IntervalAnalysis {
        threshold_mps: threshold,
        work_count,
        intervals,
    })
}

/// Count and total the emitted segments per type, in fixed display order
#[must_use]
pub fn segment_tallies(intervals: &[Interval]) -> Vec<SegmentTally> {
    [
        SegmentType::Work,
        SegmentType::Rest,
        SegmentType::Warmup,
        SegmentType::Cooldown,
    ]
    .into_iter()
    .filter_map(|segment_type| {
        let matching: Vec<&Interval> = intervals
            .iter()
            .filter(|interval| interval.segment_type == segment_type)
            .collect();
        if matching.is_empty() {
            return None;
        }
        Some(SegmentTally {
            segment_type,
            count: matching.len(),
            total_duration: matching.iter().map(|interval| interval.duration).sum(),
        })
    })
    .collect()
}

fn run_length_encode(velocity: &[f64], threshold: f64) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (index, &sample) in velocity.iter().enumerate() {
        let is_work = sample >= threshold;
        match runs.last_mut() {
            Some(run) if run.is_work == is_work => run.end = index,
            _ => runs.push(Run {
                is_work,
                start: index,
                end: index,
            }),
        }
    }
    runs
}

/// Absorb raw runs shorter than the merge floor into their predecessor.
///
/// The first run always opens a new merged entry. A later run is absorbed
/// when it is short, and coalesced when it matches the predecessor's type
/// (which happens after an absorption flipped the alternation).
fn merge_short_runs(runs: &[Run], time: &[f64], merge_floor_secs: f64) -> Vec<Run> {
    let mut merged: Vec<Run> = Vec::new();
    for run in runs {
        let duration = time[run.end] - time[run.start];
        match merged.last_mut() {
            None => merged.push(*run),
            Some(last) if last.is_work == run.is_work || duration < merge_floor_secs => {
                last.end = run.end;
            }
            _ => merged.push(*run),
        }
    }
    merged
}

fn build_interval(run: &Run, streams: &StreamBundle, velocity: &[f64], time: &[f64]) -> Interval {
    let range = run.start..=run.end;
    let avg_speed_mps = mean(&velocity[range.clone()]);

    let channel_mean = |stream_type: StreamType| {
        streams
            .get(stream_type)
            .filter(|samples| samples.len() == velocity.len())
            .and_then(|samples| positive_mean(&samples[range.clone()]))
            .map(f64::round)
    };

    let distance = streams
        .get(StreamType::Distance)
        .filter(|samples| samples.len() == velocity.len())
        .map(|samples| (samples[run.end] - samples[run.start]).round());

    let elevation_gain = streams
        .get(StreamType::Altitude)
        .filter(|samples| samples.len() == velocity.len())
        .map(|samples| elevation_delta(&samples[range.clone()]).gain);

    Interval {
        segment_type: if run.is_work {
            SegmentType::Work
        } else {
            SegmentType::Rest
        },
        start_index: run.start,
        end_index: run.end,
        start_time: time[run.start],
        end_time: time[run.end],
        duration: time[run.end] - time[run.start],
        distance,
        avg_speed_kph: round_to_tenth(mps_to_kph(avg_speed_mps)),
        avg_pace: velocity_to_pace(mps_to_kph(avg_speed_mps)),
        avg_heartrate: channel_mean(StreamType::HeartRate),
        avg_power: channel_mean(StreamType::Watts),
        avg_cadence: channel_mean(StreamType::Cadence),
        elevation_gain,
    }
}

/// A slow opening or closing work segment is preparation or winding down,
/// not a counted effort.
fn relabel_boundaries(
    intervals: &mut [Interval],
    velocity: &[f64],
    max_velocity: f64,
    config: &AnalysisConfig,
) {
    let effort_floor = max_velocity * config.boundary_effort_fraction;
    let below_floor = |interval: &Interval| {
        mean(&velocity[interval.start_index..=interval.end_index]) < effort_floor
    };

    if let Some(first) = intervals.first_mut() {
        if first.segment_type == SegmentType::Work && below_floor(first) {
            first.segment_type = SegmentType::Warmup;
        }
    }
    if let Some(last) = intervals.last_mut() {
        if last.segment_type == SegmentType::Work && below_floor(last) {
            last.segment_type = SegmentType::Cooldown;
        }
    }
}
