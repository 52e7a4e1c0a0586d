// ABOUTME: Variability index and first/second-half drift metrics
// ABOUTME: Detects pacing decay and effort variability from raw sample series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Derived effort metrics.
//!
//! Drift splits a series at its midpoint index and reports the percentage
//! change between half averages: a rising heart rate at constant output
//! indicates fatigue or heat stress. The variability index is normalized
//! power over average power; a value near 1.0 marks a steady effort.

use brevet_core::models::{StreamBundle, StreamType};
use serde::{Deserialize, Serialize};

use crate::math::{mean, normalized_power, round_to_tenth};

/// First-half to second-half drift per channel, in percent
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DriftAnalysis {
    /// Heart-rate drift
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Power drift
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
}

/// Normalized power divided by dropout-filtered average power.
///
/// `None` when power is absent in practice: no positive samples, or a series
/// too short for normalized power to be defined.
#[must_use]
pub fn variability_index(power: &[f64]) -> Option<f64> {
    let valid: Vec<f64> = power.iter().copied().filter(|&p| p > 0.0).collect();
    if valid.is_empty() {
        return None;
    }
    let average = mean(&valid);
    let np = normalized_power(&valid);
    if average <= 0.0 || np <= 0.0 {
        return None;
    }
    Some((np / average * 100.0).round() / 100.0)
}

/// Percentage change between the dropout-filtered averages of the first and
/// second half of a series, split at the midpoint index.
///
/// `None` when either half has no valid sample.
#[must_use]
pub fn drift(values: &[f64]) -> Option<f64> {
    let midpoint = values.len() / 2;
    let half_average = |half: &[f64]| {
        let valid: Vec<f64> = half.iter().copied().filter(|&v| v > 0.0).collect();
        if valid.is_empty() {
            None
        } else {
            Some(mean(&valid))
        }
    };

    let first = half_average(&values[..midpoint])?;
    let second = half_average(&values[midpoint..])?;
    Some(round_to_tenth((second - first) / first * 100.0))
}

/// Drift for every channel that supports it; absent when neither heart rate
/// nor power produced a value.
#[must_use]
pub fn drift_analysis(streams: &StreamBundle) -> Option<DriftAnalysis> {
    let heart_rate = streams.get(StreamType::HeartRate).and_then(drift);
    let power = streams.get(StreamType::Watts).and_then(drift);
    if heart_rate.is_none() && power.is_none() {
        return None;
    }
    Some(DriftAnalysis { heart_rate, power })
}
