// ABOUTME: Time-weighted zone distribution over athlete-configured bands
// ABOUTME: Gap-aware accumulation with a rayon fold/reduce binning pass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Zone distribution.
//!
//! Each step between adjacent samples contributes its elapsed time to the
//! first band containing the step's sample value. Steps with non-monotonic
//! timestamps or gaps longer than the configured maximum are recording
//! artifacts and contribute to no band and no total.

use brevet_core::models::{AthleteZones, StreamBundle, StreamType, ZoneBand};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{AnalysisConfig, UnmatchedSamplePolicy};
use crate::physiological_constants::zone_names::{HR_ZONE_NAMES, POWER_ZONE_NAMES};

/// Where the zone bands came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZonesSource {
    /// Bands configured on the athlete's profile
    AthleteConfigured,
}

/// Accumulated time and share for one configured band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAnalysis {
    /// 1-based zone number
    pub zone: usize,
    /// Display name
    pub name: String,
    /// Inclusive lower bound
    pub min: f64,
    /// Exclusive upper bound; `None` for the open-ended top band
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Seconds attributed to this band, rounded to whole seconds
    pub time_seconds: f64,
    /// Share of total classified time, rounded to whole percent
    pub percent: u32,
}

/// Zone distributions for the channels that had both data and configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneDistribution {
    /// Heart-rate band distribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<Vec<ZoneAnalysis>>,
    /// Power band distribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<Vec<ZoneAnalysis>>,
    /// Provenance of the bands used
    pub zones_source: ZonesSource,
}

/// Bin one channel into bands, weighted by elapsed time between samples.
///
/// Returns one entry per configured band. Steps where `dt <= 0` (duplicate or
/// non-monotonic timestamps) or `dt > max_gap` (paused recording) are skipped
/// entirely. A sample matching no band follows the configured policy. All
/// percentages are zero when no time could be classified.
#[must_use]
pub fn time_in_zones(
    data: &[f64],
    time: &[f64],
    bands: &[ZoneBand],
    names: &[&str],
    config: &AnalysisConfig,
) -> Vec<ZoneAnalysis> {
    if data.is_empty() || bands.is_empty() {
        return Vec::new();
    }
    if data.len() != time.len() {
        warn!(
            data_len = data.len(),
            time_len = time.len(),
            "co-indexed channel and time stream lengths differ, skipping zone binning"
        );
        return Vec::new();
    }

    // Per-band seconds plus the classified total, accumulated in parallel.
    // The final slot of the accumulator vector holds the total.
    let accumulate = |mut acc: Vec<f64>, i: usize| {
        let dt = time[i] - time[i - 1];
        if dt <= 0.0 || dt > config.max_sample_gap_secs {
            return acc;
        }
        let value = data[i];
        let band_index = bands.iter().position(|band| band.contains(value));
        match (band_index, config.unmatched_sample_policy) {
            (Some(index), _) => {
                acc[index] += dt;
                acc[bands.len()] += dt;
            }
            (None, UnmatchedSamplePolicy::CountInTotal) => {
                acc[bands.len()] += dt;
            }
            (None, UnmatchedSamplePolicy::ExcludeFromTotal) => {}
        }
        acc
    };

    let accumulated = (1..data.len())
        .into_par_iter()
        .fold(|| vec![0.0; bands.len() + 1], accumulate)
        .reduce(
            || vec![0.0; bands.len() + 1],
            |a, b| a.iter().zip(&b).map(|(x, y)| x + y).collect(),
        );

    let total = accumulated[bands.len()];
    bands
        .iter()
        .enumerate()
        .map(|(index, band)| {
            let seconds = accumulated[index];
            let percent = if total > 0.0 {
                (seconds / total * 100.0).round() as u32
            } else {
                0
            };
            ZoneAnalysis {
                zone: index + 1,
                name: names
                    .get(index)
                    .map_or_else(|| format!("Zone {}", index + 1), |&name| name.to_owned()),
                min: band.min,
                max: band.upper,
                time_seconds: seconds.round(),
                percent,
            }
        })
        .collect()
}

/// Compute the zone distribution for every channel with both samples and
/// athlete-configured bands.
///
/// Absent when the athlete has no zone configuration, the bundle has no time
/// stream, or no channel ends up classifiable.
#[must_use]
pub fn zone_distribution(
    streams: &StreamBundle,
    athlete_zones: Option<&AthleteZones>,
    config: &AnalysisConfig,
) -> Option<ZoneDistribution> {
    let zones = athlete_zones?;
    let time = streams.get(StreamType::Time)?;

    let heart_rate = streams.get(StreamType::HeartRate).and_then(|hr| {
        zones.heart_rate.as_ref().and_then(|group| {
            let analyses = time_in_zones(hr, time, &group.zones, &HR_ZONE_NAMES, config);
            if analyses.is_empty() {
                None
            } else {
                Some(analyses)
            }
        })
    });

    let power = streams.get(StreamType::Watts).and_then(|watts| {
        zones.power.as_ref().and_then(|group| {
            let analyses = time_in_zones(watts, time, &group.zones, &POWER_ZONE_NAMES, config);
            if analyses.is_empty() {
                None
            } else {
                Some(analyses)
            }
        })
    });

    if heart_rate.is_none() && power.is_none() {
        return None;
    }

    Some(ZoneDistribution {
        heart_rate,
        power,
        zones_source: ZonesSource::AthleteConfigured,
    })
}
