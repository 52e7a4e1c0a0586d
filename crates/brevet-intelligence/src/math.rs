// ABOUTME: Numeric primitives over sample arrays
// ABOUTME: Means, filtered range stats, elevation deltas, pace, normalized power
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Numeric primitives.
//!
//! All functions are pure and total over their inputs: empty or too-short
//! series produce documented neutral values rather than errors, because
//! partial sensor data is the normal case in this domain. Sensor dropouts
//! appear as non-positive samples; the filtered statistics exclude them.

use crate::physiological_constants::power::NP_ROLLING_WINDOW_SAMPLES;
use serde::{Deserialize, Serialize};

/// Arithmetic mean; `0.0` for an empty slice.
///
/// Callers are responsible for checking non-emptiness where zero would be
/// misleading.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean over positive samples only, `None` when no sample is positive
#[must_use]
pub fn positive_mean(values: &[f64]) -> Option<f64> {
    let positive: Vec<f64> = values.iter().copied().filter(|&v| v > 0.0).collect();
    if positive.is_empty() {
        None
    } else {
        Some(mean(&positive))
    }
}

/// Min/max/average over the valid samples of one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeStats {
    /// Smallest valid sample
    pub min: f64,
    /// Largest valid sample
    pub max: f64,
    /// Mean of valid samples, rounded to the nearest integer
    pub avg: f64,
}

/// Filtered min/max/average: non-positive samples are sensor dropouts and are
/// excluded. Returns `None` when no valid sample remains: explicitly
/// distinct from a zero-valued result.
#[must_use]
pub fn range_stats(values: &[f64]) -> Option<RangeStats> {
    let valid: Vec<f64> = values.iter().copied().filter(|&v| v > 0.0).collect();
    if valid.is_empty() {
        return None;
    }
    let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
    let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(RangeStats {
        min,
        max,
        avg: mean(&valid).round(),
    })
}

/// Accumulated elevation gain and loss in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationDelta {
    /// Sum of positive successive differences
    pub gain: f64,
    /// Sum of negative successive differences, as a positive number
    pub loss: f64,
}

/// Accumulate gain and loss over an altitude series.
///
/// Rounding happens once at the end, not per step, so centimeter-level noise
/// does not compound into phantom meters.
#[must_use]
pub fn elevation_delta(altitude: &[f64]) -> ElevationDelta {
    let mut gain = 0.0;
    let mut loss = 0.0;
    for pair in altitude.windows(2) {
        let diff = pair[1] - pair[0];
        if diff > 0.0 {
            gain += diff;
        } else {
            loss -= diff;
        }
    }
    ElevationDelta {
        gain: gain.round(),
        loss: loss.round(),
    }
}

/// Convert a velocity in km/h to a `MM:SS` per-kilometer pace string.
///
/// Non-positive velocity is not representable as a pace and yields `"-"`.
#[must_use]
pub fn velocity_to_pace(velocity_kph: f64) -> String {
    if velocity_kph <= 0.0 {
        return "-".to_owned();
    }
    let pace_min_per_km = 60.0 / velocity_kph;
    let mut minutes = pace_min_per_km.floor() as u64;
    let mut seconds = ((pace_min_per_km - pace_min_per_km.floor()) * 60.0).round() as u64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    format!("{minutes}:{seconds:02}")
}

/// Meters per second to kilometers per hour
#[must_use]
pub fn mps_to_kph(mps: f64) -> f64 {
    mps * 3.6
}

/// Round to one decimal place, for displayed km/h and percent values
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Normalized power: 30-sample rolling window over 4th-power samples, the
/// window means averaged and 4th-rooted, rounded to the nearest watt.
///
/// The 4th-power weighting is the metric's defining property: surges cost
/// disproportionately more than they raise the simple mean. Fewer than 30
/// samples have no defined normalized power under this algorithm and yield
/// `0.0`: a documented neutral value, not an error. The rolling window is
/// genuine (a running windowed sum), not a single global average.
#[must_use]
pub fn normalized_power(power: &[f64]) -> f64 {
    let window = NP_ROLLING_WINDOW_SAMPLES;
    if power.len() < window {
        return 0.0;
    }

    let mut window_sum: f64 = power[..window].iter().map(|p| p.powi(4)).sum();
    let mut rolling_mean_sum = window_sum / window as f64;
    let mut window_count = 1_usize;

    for i in window..power.len() {
        window_sum += power[i].powi(4) - power[i - window].powi(4);
        rolling_mean_sum += window_sum / window as f64;
        window_count += 1;
    }

    (rolling_mean_sum / window_count as f64).powf(0.25).round()
}
