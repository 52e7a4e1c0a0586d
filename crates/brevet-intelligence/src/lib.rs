// ABOUTME: Activity-stream analysis engine for the Brevet platform
// ABOUTME: Zone distributions, interval/climb segmentation, drift, and classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

#![deny(unsafe_code)]

//! # Brevet Intelligence
//!
//! Pure, synchronous analysis over a single activity's sensor sample streams.
//! Every analysis is an independently callable function returning an optional
//! result: a missing sensor or a too-short series yields an absent report
//! section, never an error. [`analyzer::ActivityAnalyzer`] is the thin
//! orchestrator composing them into one [`analyzer::ActivityAnalysis`].
//!
//! ## Modules
//!
//! - **math**: numeric primitives (means, range stats, elevation, pace,
//!   normalized power)
//! - **zones**: time-weighted zone distribution over athlete-configured bands
//! - **segmentation**: velocity-based work/rest interval detection
//! - **terrain**: grade-based climb detection and terrain distribution
//! - **metrics**: variability index and first/second-half drift
//! - **classifier**: rule-based workout-type classification
//! - **summary**: activity summary, overall stats, lap and work rollups
//! - **analyzer**: the orchestrator and the composed report
//! - **config**: tunables and policies for ambiguous behaviors

/// Thin orchestrator composing the independent analyses into one report
pub mod analyzer;
/// Rule-based workout-type classification
pub mod classifier;
/// Engine tunables and ambiguous-behavior policies
pub mod config;
/// Numeric primitives over sample arrays
pub mod math;
/// Variability index and drift metrics
pub mod metrics;
/// Physiological and algorithmic threshold constants
pub mod physiological_constants;
/// Velocity-based work/rest interval segmentation
pub mod segmentation;
/// Activity summary, overall statistics, and rollups
pub mod summary;
/// Grade-based climb detection and terrain distribution
pub mod terrain;
/// Time-weighted zone distribution
pub mod zones;

pub use analyzer::{ActivityAnalysis, ActivityAnalyzer, AnalysisRequest};
pub use classifier::{classify_workout, WorkoutClassification, WorkoutType};
pub use config::{AnalysisConfig, ClassifierFallback, UnmatchedSamplePolicy};
pub use math::{
    elevation_delta, mean, normalized_power, range_stats, velocity_to_pace, ElevationDelta,
    RangeStats,
};
pub use metrics::{drift, drift_analysis, variability_index, DriftAnalysis};
pub use segmentation::{
    detect_intervals, segment_tallies, Interval, IntervalAnalysis, SegmentTally, SegmentType,
};
pub use summary::{
    lap_rollups, overall_stats, work_rollup, workout_summary, LapRollup, OverallStats,
    WorkRollup, WorkoutSummary,
};
pub use terrain::{
    analyze_terrain, detect_climbs, terrain_distribution, Climb, TerrainAnalysis,
    TerrainDistribution, TerrainShare,
};
pub use zones::{time_in_zones, zone_distribution, ZoneAnalysis, ZoneDistribution, ZonesSource};
