// ABOUTME: Sample stream channel vocabulary and the per-activity stream bundle
// ABOUTME: Maps named channels to numeric sample arrays with explicit absence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Sample streams.
//!
//! An activity's sensor data arrives as a bundle of named channels, each an
//! ordered numeric array index-aligned with the others. A channel may be
//! absent entirely (many sensors are optional), and absence is always
//! distinguishable from an empty or zero-filled array.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// The channel vocabulary of the upstream platform's stream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamType {
    /// Seconds since activity start
    #[serde(rename = "time")]
    Time,
    /// Cumulative distance in meters
    #[serde(rename = "distance")]
    Distance,
    /// Altitude in meters
    #[serde(rename = "altitude")]
    Altitude,
    /// Heart rate in beats per minute
    #[serde(rename = "heartrate")]
    HeartRate,
    /// Cadence in revolutions or steps per minute
    #[serde(rename = "cadence")]
    Cadence,
    /// Power in watts
    #[serde(rename = "watts")]
    Watts,
    /// Smoothed velocity in meters per second
    #[serde(rename = "velocity_smooth")]
    Velocity,
    /// Smoothed grade in percent
    #[serde(rename = "grade_smooth")]
    Grade,
    /// Temperature in degrees Celsius
    #[serde(rename = "temp")]
    Temperature,
}

impl StreamType {
    /// The wire spelling used by the upstream platform
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Distance => "distance",
            Self::Altitude => "altitude",
            Self::HeartRate => "heartrate",
            Self::Cadence => "cadence",
            Self::Watts => "watts",
            Self::Velocity => "velocity_smooth",
            Self::Grade => "grade_smooth",
            Self::Temperature => "temp",
        }
    }

    /// Parse a wire spelling, returning `None` for channels the engine
    /// does not analyze (e.g. `latlng`, `moving`)
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "time" => Some(Self::Time),
            "distance" => Some(Self::Distance),
            "altitude" => Some(Self::Altitude),
            "heartrate" => Some(Self::HeartRate),
            "cadence" => Some(Self::Cadence),
            "watts" => Some(Self::Watts),
            "velocity_smooth" => Some(Self::Velocity),
            "grade_smooth" => Some(Self::Grade),
            "temp" => Some(Self::Temperature),
            _ => None,
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upstream stream object on the wire: a channel name plus its samples.
/// `data` stays opaque until the channel is known: non-scalar channels
/// (`latlng`) carry shapes this engine never parses.
#[derive(Debug, Deserialize)]
struct WireStream {
    #[serde(rename = "type")]
    stream_type: String,
    /// Samples; the platform encodes dropped sensor readings as `null`
    data: serde_json::Value,
}

/// A bundle of index-aligned sample channels for one activity.
///
/// The accessor [`StreamBundle::get`] returns `None` for an absent channel;
/// downstream analyses treat absence as "skip this metric", never as
/// zero-filled data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamBundle {
    channels: HashMap<StreamType, Vec<f64>>,
}

impl StreamBundle {
    /// Create an empty bundle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style channel insertion
    #[must_use]
    pub fn with_channel(mut self, stream_type: StreamType, samples: Vec<f64>) -> Self {
        self.channels.insert(stream_type, samples);
        self
    }

    /// Insert or replace a channel
    pub fn insert(&mut self, stream_type: StreamType, samples: Vec<f64>) {
        self.channels.insert(stream_type, samples);
    }

    /// The samples for a channel, or `None` if the sensor was absent
    #[must_use]
    pub fn get(&self, stream_type: StreamType) -> Option<&[f64]> {
        self.channels.get(&stream_type).map(Vec::as_slice)
    }

    /// Whether the bundle carries no channels at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of channels present
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Parse the upstream wire shape: an array of `{"type": ..., "data": [...]}`
    /// objects. Channels outside the engine's vocabulary are skipped; `null`
    /// samples become `0.0`, the domain's missing-reading sentinel.
    ///
    /// # Errors
    /// Returns [`AppError::InvalidInput`] when the payload is not an array of
    /// stream objects.
    pub fn from_json(value: serde_json::Value) -> AppResult<Self> {
        let wire: Vec<WireStream> = serde_json::from_value(value)
            .map_err(|e| AppError::invalid_input(format!("malformed stream payload: {e}")))?;

        let mut bundle = Self::new();
        for stream in wire {
            let Some(stream_type) = StreamType::from_wire(&stream.stream_type) else {
                debug!(channel = %stream.stream_type, "skipping unrecognized stream channel");
                continue;
            };
            let raw: Vec<Option<f64>> = serde_json::from_value(stream.data).map_err(|e| {
                AppError::invalid_input(format!("malformed samples for channel {stream_type}: {e}"))
            })?;
            let samples = raw.into_iter().map(|sample| sample.unwrap_or(0.0)).collect();
            bundle.insert(stream_type, samples);
        }
        Ok(bundle)
    }
}
