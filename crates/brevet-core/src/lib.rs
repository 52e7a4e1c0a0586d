// ABOUTME: Core types for the Brevet activity analysis engine
// ABOUTME: Foundation crate with stream/zone/lap models and error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

#![deny(unsafe_code)]

//! # Brevet Core
//!
//! Foundation crate for the Brevet activity intelligence engine. Holds the
//! boundary types exchanged with the upstream fitness platform (sample
//! streams, athlete zone configuration, lap metadata, sport types) and the
//! unified error system. This crate is designed to change infrequently so the
//! analysis crate can iterate on top of it.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the `AppResult` alias
//! - **models**: stream bundles, zone bands, laps, and sport types

/// Unified error handling with standard error codes
pub mod errors;

/// Boundary data models (streams, zones, laps, sport types)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
pub use models::{
    AthleteZones, HeartRateZones, Lap, PowerZones, SportType, StreamBundle, StreamType, ZoneBand,
};
