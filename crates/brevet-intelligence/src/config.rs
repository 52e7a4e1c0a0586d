// ABOUTME: Analysis engine configuration with environment variable overrides
// ABOUTME: Carries tunable thresholds and the policies for ambiguous behaviors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Engine configuration.
//!
//! Two behaviors were observed to differ across deployments and are policies
//! rather than constants: what to do with samples that match no zone band,
//! and which label the classifier falls back to when no rule fires.

use std::env;

use serde::{Deserialize, Serialize};

use crate::physiological_constants::{climbs, intervals, sampling};

/// What to do with a sample value that falls outside every configured band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedSamplePolicy {
    /// Drop the step from the classified total (percentages still sum to ~100)
    #[default]
    ExcludeFromTotal,
    /// Count the step toward the total without attributing it to a band
    /// (percentages then sum below 100)
    CountInTotal,
}

/// Label used when no classification rule matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierFallback {
    /// Classify unmatched endurance sessions as tempo work
    #[default]
    Tempo,
    /// Classify unmatched endurance sessions as mixed work
    Mixed,
}

/// Tunable thresholds and policies for one analyzer instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Steps longer than this many seconds are recording gaps
    pub max_sample_gap_secs: f64,
    /// Absolute ceiling on the rest/work velocity threshold (m/s)
    pub rest_speed_ceiling_mps: f64,
    /// Rest/work threshold as a fraction of maximum velocity
    pub rest_fraction_of_max: f64,
    /// Raw segments shorter than this are absorbed into their predecessor
    pub merge_floor_secs: f64,
    /// Merged segments shorter than this are not emitted
    pub min_interval_secs: f64,
    /// Boundary work segments below this fraction of max velocity are
    /// warmup/cooldown
    pub boundary_effort_fraction: f64,
    /// Minimum sustained grade for a climb run, in percent
    pub min_climb_grade_percent: f64,
    /// Minimum accumulated gain for an emitted climb, in meters
    pub min_climb_gain_meters: f64,
    /// Grade band treated as flat, in percent either side of zero
    pub flat_grade_band_percent: f64,
    /// Policy for samples matching no zone band
    pub unmatched_sample_policy: UnmatchedSamplePolicy,
    /// Label when no classification rule matches
    pub classifier_fallback: ClassifierFallback,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_sample_gap_secs: sampling::MAX_VALID_SAMPLE_GAP_SECS,
            rest_speed_ceiling_mps: intervals::REST_SPEED_CEILING_MPS,
            rest_fraction_of_max: intervals::REST_FRACTION_OF_MAX,
            merge_floor_secs: intervals::MERGE_FLOOR_SECS,
            min_interval_secs: intervals::MIN_SEGMENT_SECS,
            boundary_effort_fraction: intervals::BOUNDARY_EFFORT_FRACTION,
            min_climb_grade_percent: climbs::MIN_CLIMB_GRADE_PERCENT,
            min_climb_gain_meters: climbs::MIN_CLIMB_GAIN_METERS,
            flat_grade_band_percent: climbs::FLAT_GRADE_BAND_PERCENT,
            unmatched_sample_policy: UnmatchedSamplePolicy::default(),
            classifier_fallback: ClassifierFallback::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from `BREVET_*` environment variables, falling back
    /// to the documented defaults for anything unset or unparseable
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_sample_gap_secs: env_f64("BREVET_MAX_SAMPLE_GAP_SECS", defaults.max_sample_gap_secs),
            rest_speed_ceiling_mps: env_f64(
                "BREVET_REST_SPEED_CEILING_MPS",
                defaults.rest_speed_ceiling_mps,
            ),
            rest_fraction_of_max: env_f64(
                "BREVET_REST_FRACTION_OF_MAX",
                defaults.rest_fraction_of_max,
            ),
            merge_floor_secs: env_f64("BREVET_MERGE_FLOOR_SECS", defaults.merge_floor_secs),
            min_interval_secs: env_f64("BREVET_MIN_INTERVAL_SECS", defaults.min_interval_secs),
            boundary_effort_fraction: env_f64(
                "BREVET_BOUNDARY_EFFORT_FRACTION",
                defaults.boundary_effort_fraction,
            ),
            min_climb_grade_percent: env_f64(
                "BREVET_MIN_CLIMB_GRADE_PERCENT",
                defaults.min_climb_grade_percent,
            ),
            min_climb_gain_meters: env_f64(
                "BREVET_MIN_CLIMB_GAIN_METERS",
                defaults.min_climb_gain_meters,
            ),
            flat_grade_band_percent: env_f64(
                "BREVET_FLAT_GRADE_BAND_PERCENT",
                defaults.flat_grade_band_percent,
            ),
            unmatched_sample_policy: match env::var("BREVET_UNMATCHED_SAMPLE_POLICY").as_deref() {
                Ok("count_in_total") => UnmatchedSamplePolicy::CountInTotal,
                _ => defaults.unmatched_sample_policy,
            },
            classifier_fallback: match env::var("BREVET_CLASSIFIER_FALLBACK").as_deref() {
                Ok("mixed") => ClassifierFallback::Mixed,
                _ => defaults.classifier_fallback,
            },
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
