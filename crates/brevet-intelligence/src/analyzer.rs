// ABOUTME: Thin orchestrator composing the independent analyses into one report
// ABOUTME: Every section is optional; absent inputs yield absent sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! The analysis orchestrator.
//!
//! Each analysis (zones, intervals, terrain, drift, classification, summary)
//! is an independently callable function; [`ActivityAnalyzer::analyze`] only
//! wires outputs together (zone analyses and interval counts feed the
//! classifier, intervals feed the work rollup) and assembles the report.
//! Rollup granularity follows the caller: manual laps when supplied,
//! otherwise the engine's own work segments.

use brevet_core::errors::AppResult;
use brevet_core::models::{AthleteZones, Lap, SportType, StreamBundle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{classify_workout, WorkoutClassification};
use crate::config::AnalysisConfig;
use crate::metrics::{drift_analysis, DriftAnalysis};
use crate::segmentation::{detect_intervals, segment_tallies, IntervalAnalysis, SegmentTally};
use crate::summary::{
    lap_rollups, overall_stats, work_rollup, workout_summary, LapRollup, OverallStats, WorkRollup,
    WorkoutSummary,
};
use crate::terrain::{analyze_terrain, TerrainAnalysis};
use crate::zones::{zone_distribution, ZoneDistribution};

/// Everything the engine needs for one analysis call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Sample streams from the stream-fetch collaborator
    pub streams: StreamBundle,
    /// Sport type of the activity
    pub sport: SportType,
    /// Athlete zone configuration, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<AthleteZones>,
    /// Lap boundaries from the lap-metadata collaborator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laps: Option<Vec<Lap>>,
}

impl AnalysisRequest {
    /// A request carrying only streams and a sport
    #[must_use]
    pub const fn new(streams: StreamBundle, sport: SportType) -> Self {
        Self {
            streams,
            sport,
            zones: None,
            laps: None,
        }
    }

    /// Attach athlete zone configuration
    #[must_use]
    pub fn with_zones(mut self, zones: AthleteZones) -> Self {
        self.zones = Some(zones);
        self
    }

    /// Attach lap boundaries
    #[must_use]
    pub fn with_laps(mut self, laps: Vec<Lap>) -> Self {
        self.laps = Some(laps);
        self
    }
}

/// The composed analysis report.
///
/// Sections for which the input lacked a sensor, a configuration, or enough
/// samples are omitted from the serialized form entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityAnalysis {
    /// Activity-scoped aggregate summary
    pub summary: WorkoutSummary,
    /// Per-channel min/max/average statistics
    pub stats: OverallStats,
    /// Time-in-zone distribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_distribution: Option<ZoneDistribution>,
    /// Detected work/rest intervals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervals: Option<IntervalAnalysis>,
    /// Count and duration tallies per segment type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_totals: Option<Vec<SegmentTally>>,
    /// Per-lap rollups (present when the caller supplied manual laps)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laps: Option<Vec<LapRollup>>,
    /// Work-segment rollup (present when no manual laps were supplied)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_rollup: Option<WorkRollup>,
    /// Climbs and terrain distribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrain: Option<TerrainAnalysis>,
    /// First/second-half drift
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift: Option<DriftAnalysis>,
    /// Rule-based workout classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<WorkoutClassification>,
}

impl ActivityAnalysis {
    /// Serialize the report for the presentation layer.
    ///
    /// # Errors
    /// Returns [`brevet_core::errors::AppError::Serialization`] if the report
    /// cannot be represented as JSON.
    pub fn to_json(&self) -> AppResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// The analysis engine: stateless, one configuration per instance
#[derive(Debug, Clone, Default)]
pub struct ActivityAnalyzer {
    config: AnalysisConfig,
}

impl ActivityAnalyzer {
    /// An analyzer with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An analyzer with an explicit configuration
    #[must_use]
    pub const fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The configuration in effect
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every applicable analysis over one activity.
    #[must_use]
    pub fn analyze(&self, request: &AnalysisRequest) -> ActivityAnalysis {
        let streams = &request.streams;
        let manual_laps: Vec<&Lap> = request
            .laps
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|lap| lap.is_manual())
            .collect();

        let zone_dist = zone_distribution(streams, request.zones.as_ref(), &self.config);
        let intervals = detect_intervals(streams, &self.config);
        let segment_totals = intervals
            .as_ref()
            .map(|analysis| segment_tallies(&analysis.intervals));

        // Rollup granularity: the caller's manual laps win over auto-detected
        // work segments.
        let (laps, rolled_work) = if manual_laps.is_empty() {
            let rollup = intervals
                .as_ref()
                .and_then(|analysis| work_rollup(&analysis.intervals));
            (None, rollup)
        } else {
            let rollups = request
                .laps
                .as_deref()
                .map(|all| lap_rollups(all, streams));
            (rollups, None)
        };

        let work_interval_count = intervals.as_ref().map_or(0, |analysis| analysis.work_count);
        let hr_zones = zone_dist
            .as_ref()
            .and_then(|dist| dist.heart_rate.as_deref())
            .unwrap_or_default();
        let classification = classify_workout(
            &request.sport,
            hr_zones,
            work_interval_count,
            manual_laps.len(),
            self.config.classifier_fallback,
        );
        debug!(
            work_intervals = work_interval_count,
            manual_laps = manual_laps.len(),
            classified = classification.is_some(),
            "activity analysis assembled"
        );

        ActivityAnalysis {
            summary: workout_summary(streams, manual_laps.len()),
            stats: overall_stats(streams),
            zone_distribution: zone_dist,
            intervals,
            segment_totals,
            laps,
            work_rollup: rolled_work,
            terrain: analyze_terrain(streams, &self.config),
            drift: drift_analysis(streams),
            classification,
        }
    }
}
