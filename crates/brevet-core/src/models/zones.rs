// ABOUTME: Athlete zone configuration types with explicit open-ended upper bounds
// ABOUTME: Translates the platform's -1 upper-bound sentinel at the boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Athlete-configured intensity zones.
//!
//! Bands are ordered, ascending, and assumed contiguous/non-overlapping -
//! an upstream invariant this engine does not enforce (binning is "best
//! effort first match" against whatever configuration arrives).

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// The upstream sentinel marking an open-ended top zone
const OPEN_UPPER_BOUND_SENTINEL: f64 = -1.0;

/// One zone band: `min` inclusive, `upper` exclusive when bounded.
///
/// The top band of a configuration is usually open-ended; that is expressed
/// as `upper: None` rather than the wire sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBand {
    /// Inclusive lower bound
    pub min: f64,
    /// Exclusive upper bound; `None` means unbounded above
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

impl ZoneBand {
    /// Create a band with an explicit upper bound
    #[must_use]
    pub const fn new(min: f64, upper: Option<f64>) -> Self {
        Self { min, upper }
    }

    /// Translate a platform band, mapping the `-1` sentinel (and any other
    /// upper bound at or below `min`) to an open-ended band
    #[must_use]
    pub fn from_platform(min: f64, max: f64) -> Self {
        let upper = if (max - OPEN_UPPER_BOUND_SENTINEL).abs() < f64::EPSILON || max <= min {
            None
        } else {
            Some(max)
        };
        Self { min, upper }
    }

    /// Whether a sample value falls inside `[min, upper)`
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.upper.map_or(true, |upper| value < upper)
    }
}

/// Wire shape of one zone band as the platform sends it
#[derive(Debug, Deserialize)]
struct WireBand {
    min: f64,
    max: f64,
}

/// Wire shape of a zone group
#[derive(Debug, Deserialize)]
struct WireZoneGroup {
    #[serde(default)]
    custom_zones: bool,
    #[serde(default)]
    zones: Vec<WireBand>,
}

/// Wire shape of the athlete zones payload
#[derive(Debug, Deserialize)]
struct WireAthleteZones {
    heart_rate: Option<WireZoneGroup>,
    power: Option<WireZoneGroup>,
}

/// Athlete heart-rate zone configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRateZones {
    /// Whether the athlete customized the default bands
    pub custom_zones: bool,
    /// Ordered ascending bands
    pub zones: Vec<ZoneBand>,
}

/// Athlete power zone configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerZones {
    /// Ordered ascending bands
    pub zones: Vec<ZoneBand>,
}

/// Athlete zone configuration; each side is independently optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AthleteZones {
    /// Heart-rate bands, if the athlete has any configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<HeartRateZones>,
    /// Power bands, if the athlete has any configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<PowerZones>,
}

impl AthleteZones {
    /// Parse the platform's athlete-zones payload, translating the `-1`
    /// upper-bound sentinel into explicit open-ended bands.
    ///
    /// # Errors
    /// Returns [`AppError::InvalidInput`] when the payload does not match the
    /// platform shape.
    pub fn from_json(value: serde_json::Value) -> AppResult<Self> {
        let wire: WireAthleteZones = serde_json::from_value(value)
            .map_err(|e| AppError::invalid_input(format!("malformed zones payload: {e}")))?;

        let translate = |group: WireZoneGroup| -> Vec<ZoneBand> {
            group
                .zones
                .iter()
                .map(|band| ZoneBand::from_platform(band.min, band.max))
                .collect()
        };

        Ok(Self {
            heart_rate: wire.heart_rate.map(|group| HeartRateZones {
                custom_zones: group.custom_zones,
                zones: translate(group),
            }),
            power: wire.power.map(|group| PowerZones {
                zones: translate(group),
            }),
        })
    }
}
