// ABOUTME: Physiological and algorithmic threshold constants for activity analysis
// ABOUTME: Grouped in nested modules so no magic numbers appear at use sites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Threshold constants used by the analysis algorithms.
//!
//! The values mirror established training-analysis conventions (30-sample
//! normalized-power window, 2 % climb grade, zone-time classification
//! thresholds). [`crate::config::AnalysisConfig`] exposes the tunable subset.

/// Sample-cadence and gap handling
pub mod sampling {
    /// Steps longer than this are recording gaps (paused device, dropout)
    /// and are excluded from time-weighted accumulation
    pub const MAX_VALID_SAMPLE_GAP_SECS: f64 = 60.0;
}

/// Power metric constants
pub mod power {
    /// Rolling-window width for normalized power, in samples
    pub const NP_ROLLING_WINDOW_SAMPLES: usize = 30;
}

/// Work/rest interval segmentation
pub mod intervals {
    /// Absolute ceiling on the rest/work velocity threshold (m/s)
    pub const REST_SPEED_CEILING_MPS: f64 = 2.5;

    /// Rest/work threshold as a fraction of the activity's maximum velocity
    pub const REST_FRACTION_OF_MAX: f64 = 0.5;

    /// Raw segments shorter than this are absorbed into their predecessor
    pub const MERGE_FLOOR_SECS: f64 = 30.0;

    /// Merged segments shorter than this are noise and are not emitted
    pub const MIN_SEGMENT_SECS: f64 = 60.0;

    /// A boundary work segment slower than this fraction of max velocity
    /// is a warmup (first) or cooldown (last), not a real effort
    pub const BOUNDARY_EFFORT_FRACTION: f64 = 0.7;
}

/// Climb detection and terrain bucketing
pub mod climbs {
    /// Minimum sustained grade for a climb run, in percent
    pub const MIN_CLIMB_GRADE_PERCENT: f64 = 2.0;

    /// Minimum accumulated elevation gain for an emitted climb, in meters
    pub const MIN_CLIMB_GAIN_METERS: f64 = 20.0;

    /// Grade band treated as flat terrain, in percent either side of zero
    pub const FLAT_GRADE_BAND_PERCENT: f64 = 2.0;

    /// Minimum co-indexed distance/altitude samples for terrain analysis
    pub const MIN_ELEVATION_SAMPLES: usize = 10;
}

/// Workout-type classification thresholds over zone time and share
pub mod classification {
    /// Zone-5 seconds (with >= 3 manual laps) marking anaerobic interval work
    pub const ANAEROBIC_Z5_SECS: f64 = 5.0 * 60.0;

    /// Zone-5 seconds marking a VO2max session
    pub const VO2MAX_Z5_SECS: f64 = 8.0 * 60.0;

    /// Zone-4 seconds marking a threshold session
    pub const THRESHOLD_Z4_SECS: f64 = 15.0 * 60.0;

    /// Combined zone-4 + zone-5 seconds marking a threshold session
    pub const THRESHOLD_Z4Z5_SECS: f64 = 20.0 * 60.0;

    /// Zone-3 share (percent) marking a tempo session outright
    pub const TEMPO_Z3_PERCENT: u32 = 35;

    /// Zone-3 share (percent) marking tempo when sustained long enough
    pub const TEMPO_Z3_SUSTAINED_PERCENT: u32 = 25;

    /// Zone-3 seconds qualifying the sustained tempo rule
    pub const TEMPO_Z3_SUSTAINED_SECS: f64 = 20.0 * 60.0;

    /// Zone-2 share marking a base session outright
    pub const BASE_Z2_PERCENT: u32 = 50;

    /// Zone-2 share qualifying base when combined low-intensity time is high
    pub const BASE_Z2_COMBINED_PERCENT: u32 = 40;

    /// Combined zone-1 + zone-2 share qualifying the combined base rule
    pub const BASE_Z1Z2_PERCENT: u32 = 70;

    /// Zone-1 share marking a recovery session outright
    pub const RECOVERY_Z1_PERCENT: u32 = 40;

    /// Combined zone-1 + zone-2 share qualifying the combined recovery rule
    pub const RECOVERY_Z1Z2_PERCENT: u32 = 80;

    /// Zone-1 share qualifying the combined recovery rule
    pub const RECOVERY_Z1_COMBINED_PERCENT: u32 = 25;

    /// Combined zone-1 + zone-2 share for the low-intensity fallback
    pub const FALLBACK_Z1Z2_PERCENT: u32 = 60;

    /// Auto-detected work intervals marking a structured interval session
    pub const MIN_WORK_INTERVALS: usize = 3;

    /// Manual laps qualifying the anaerobic rule
    pub const MIN_ANAEROBIC_LAPS: usize = 3;
}

/// Zone display names in the platform vocabulary
pub mod zone_names {
    /// Heart-rate zone names, zone 1 first
    pub const HR_ZONE_NAMES: [&str; 5] =
        ["Recovery", "Endurance", "Tempo", "Threshold", "VO2max"];

    /// Power zone names, zone 1 first
    pub const POWER_ZONE_NAMES: [&str; 7] = [
        "Active Recovery",
        "Endurance",
        "Tempo",
        "Threshold",
        "VO2max",
        "Anaerobic",
        "Neuromuscular",
    ];
}
