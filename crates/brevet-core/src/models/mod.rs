// ABOUTME: Boundary data models exchanged with the upstream fitness platform
// ABOUTME: Re-exports stream, zone, lap, and sport types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Boundary data models.
//!
//! These types describe what the out-of-scope collaborators hand the engine:
//! the stream-fetch collaborator supplies a [`StreamBundle`], the athlete-zone
//! collaborator an optional [`AthleteZones`], and the lap-metadata
//! collaborator a list of [`Lap`] boundaries.

/// Lap boundary metadata
pub mod laps;
/// Sport type vocabulary
pub mod sport;
/// Sample stream bundle and channel vocabulary
pub mod streams;
/// Athlete zone configuration
pub mod zones;

pub use laps::Lap;
pub use sport::SportType;
pub use streams::{StreamBundle, StreamType};
pub use zones::{AthleteZones, HeartRateZones, PowerZones, ZoneBand};
