// ABOUTME: Sport type vocabulary with endurance-sport gating
// ABOUTME: Parses provider sport strings and flags the types zone classification applies to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

use serde::{Deserialize, Serialize};

/// Sport/activity types the engine recognizes.
///
/// The `Other` variant carries provider-specific types that don't map to the
/// standard categories; those are never classified by the zone-based rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    /// Running activity
    Run,
    /// Trail running activity
    TrailRun,
    /// Treadmill running activity
    VirtualRun,
    /// Cycling activity
    Ride,
    /// Indoor/trainer cycling activity
    VirtualRide,
    /// Mountain biking activity
    MountainBikeRide,
    /// Gravel cycling activity
    GravelRide,
    /// Electric bike ride
    EBikeRide,
    /// Swimming activity
    Swim,
    /// Walking activity
    Walk,
    /// Hiking activity
    Hike,
    /// Rowing activity
    Rowing,
    /// Kayaking activity
    Kayaking,
    /// Cross-country skiing
    NordicSki,
    /// Backcountry skiing
    BackcountrySki,
    /// Roller skiing
    RollerSki,
    /// Any other provider-specific type
    Other(String),
}

impl SportType {
    /// Parse a provider sport string (e.g. `"TrailRun"`)
    #[must_use]
    pub fn from_provider(value: &str) -> Self {
        match value {
            "Run" => Self::Run,
            "TrailRun" => Self::TrailRun,
            "VirtualRun" => Self::VirtualRun,
            "Ride" => Self::Ride,
            "VirtualRide" => Self::VirtualRide,
            "MountainBikeRide" => Self::MountainBikeRide,
            "GravelRide" => Self::GravelRide,
            "EBikeRide" => Self::EBikeRide,
            "Swim" => Self::Swim,
            "Walk" => Self::Walk,
            "Hike" => Self::Hike,
            "Rowing" => Self::Rowing,
            "Kayaking" => Self::Kayaking,
            "NordicSki" => Self::NordicSki,
            "BackcountrySki" => Self::BackcountrySki,
            "RollerSki" => Self::RollerSki,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Whether zone-based workout classification applies to this sport.
    ///
    /// Strength work, yoga, and other non-endurance types have intensity
    /// profiles the zone cascade was never designed for.
    #[must_use]
    pub const fn is_endurance(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}
