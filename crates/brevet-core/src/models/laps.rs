// ABOUTME: Lap boundary metadata from the upstream activity detail
// ABOUTME: Distinguishes athlete-pressed manual laps from auto-generated ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Lap boundaries.
//!
//! Laps are an alternative segmentation source: when the caller supplies
//! them, per-lap rollups replace the engine's own velocity-based interval
//! detection as the summary granularity. Only manual laps (the athlete
//! pressed the lap button and named the effort) are rolled up; the platform's
//! auto-generated `Lap <n>` entries are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One lap boundary with the platform's own per-lap aggregates.
///
/// `start_index`/`end_index` are positions into the activity's sample
/// streams. They may be absent (old uploads), in which case rollups fall back
/// to the platform-reported averages carried here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lap {
    /// Lap name as recorded on the platform
    pub name: String,
    /// First sample index covered by this lap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    /// Last sample index covered by this lap (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<usize>,
    /// Moving time in seconds
    pub moving_time: f64,
    /// Distance in meters
    pub distance: f64,
    /// Average speed in meters per second
    pub average_speed: f64,
    /// Platform-reported average heart rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heartrate: Option<f64>,
    /// Platform-reported maximum heart rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heartrate: Option<f64>,
    /// Platform-reported average cadence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cadence: Option<f64>,
    /// When the lap started (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
}

impl Lap {
    /// Whether this lap was manually created by the athlete.
    ///
    /// The platform names auto-generated laps `Lap 1`, `Lap 2`, ...; anything
    /// else is treated as a deliberate marker.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.name
            .strip_prefix("Lap ")
            .map_or(true, |rest| rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()))
    }
}
