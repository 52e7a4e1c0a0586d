// ABOUTME: Rule-based workout-type classification over zone time and intervals
// ABOUTME: Fixed-priority threshold cascade with a configurable fallback label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! Workout classification.
//!
//! A deterministic cascade over heart-rate zone time, auto-detected work
//! intervals, and manual lap count; the first matching rule wins. Interval
//! counts come from the velocity segmentation, lap counts from the caller's
//! lap metadata: two different collaborators, which is why both an
//! `intervals` and an `anaerobic` rule can exist.

use brevet_core::models::SportType;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierFallback;
use crate::physiological_constants::classification::{
    ANAEROBIC_Z5_SECS, BASE_Z1Z2_PERCENT, BASE_Z2_COMBINED_PERCENT, BASE_Z2_PERCENT,
    FALLBACK_Z1Z2_PERCENT, MIN_ANAEROBIC_LAPS, MIN_WORK_INTERVALS, RECOVERY_Z1Z2_PERCENT,
    RECOVERY_Z1_COMBINED_PERCENT, RECOVERY_Z1_PERCENT, TEMPO_Z3_PERCENT,
    TEMPO_Z3_SUSTAINED_PERCENT, TEMPO_Z3_SUSTAINED_SECS, THRESHOLD_Z4Z5_SECS, THRESHOLD_Z4_SECS,
    VO2MAX_Z5_SECS,
};
use crate::zones::ZoneAnalysis;

/// Categorical workout labels produced by the cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Structured repeats detected from the velocity segmentation
    Intervals,
    /// Short maximal repeats with substantial zone-5 time
    Anaerobic,
    /// Sustained zone-5 work
    Vo2max,
    /// Sustained zone-4 work
    Threshold,
    /// Sustained zone-3 work
    Tempo,
    /// Aerobic zone-2 riding
    Base,
    /// Easy zone-1 session
    Recovery,
    /// No dominant intensity pattern
    Mixed,
}

impl WorkoutType {
    /// Fixed human-readable description for this label
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Intervals => "Structured interval session with repeated work efforts",
            Self::Anaerobic => "Anaerobic/sprint work, maximal effort",
            Self::Vo2max => "VO2max work, primarily in Zone 5",
            Self::Threshold => "Threshold training, primarily in Zone 4",
            Self::Tempo => "Tempo effort, primarily in Zone 3",
            Self::Base => "Aerobic base building, primarily in Zone 2",
            Self::Recovery => "Easy recovery session, primarily in Zone 1",
            Self::Mixed => "Mixed session without a dominant intensity",
        }
    }
}

/// A classification label with its description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutClassification {
    /// The categorical label
    pub workout_type: WorkoutType,
    /// Human-readable description of the label
    pub description: String,
}

/// Classify a workout from its heart-rate zone distribution and detected
/// structure.
///
/// Returns `None` for non-endurance sports and for activities without a
/// heart-rate zone analysis: the cascade is meaningless without zone time.
#[must_use]
pub fn classify_workout(
    sport: &SportType,
    hr_zones: &[ZoneAnalysis],
    work_interval_count: usize,
    manual_lap_count: usize,
    fallback: ClassifierFallback,
) -> Option<WorkoutClassification> {
    if !sport.is_endurance() || hr_zones.is_empty() {
        return None;
    }

    let zone_time = |zone: usize| {
        hr_zones
            .iter()
            .find(|analysis| analysis.zone == zone)
            .map_or(0.0, |analysis| analysis.time_seconds)
    };
    let zone_percent = |zone: usize| {
        hr_zones
            .iter()
            .find(|analysis| analysis.zone == zone)
            .map_or(0, |analysis| analysis.percent)
    };

    let z3_time = zone_time(3);
    let z4_time = zone_time(4);
    let z5_time = zone_time(5);
    let z1 = zone_percent(1);
    let z2 = zone_percent(2);
    let z3 = zone_percent(3);

    let workout_type = if work_interval_count >= MIN_WORK_INTERVALS {
        WorkoutType::Intervals
    } else if manual_lap_count >= MIN_ANAEROBIC_LAPS && z5_time >= ANAEROBIC_Z5_SECS {
        WorkoutType::Anaerobic
    } else if z5_time >= VO2MAX_Z5_SECS {
        WorkoutType::Vo2max
    } else if z4_time >= THRESHOLD_Z4_SECS || z4_time + z5_time >= THRESHOLD_Z4Z5_SECS {
        WorkoutType::Threshold
    } else if z3 >= TEMPO_Z3_PERCENT
        || (z3 >= TEMPO_Z3_SUSTAINED_PERCENT && z3_time >= TEMPO_Z3_SUSTAINED_SECS)
    {
        WorkoutType::Tempo
    } else if z2 >= BASE_Z2_PERCENT || (z2 >= BASE_Z2_COMBINED_PERCENT && z1 + z2 >= BASE_Z1Z2_PERCENT)
    {
        WorkoutType::Base
    } else if z1 >= RECOVERY_Z1_PERCENT
        || (z1 + z2 >= RECOVERY_Z1Z2_PERCENT && z1 >= RECOVERY_Z1_COMBINED_PERCENT)
    {
        WorkoutType::Recovery
    } else if z1 + z2 >= FALLBACK_Z1Z2_PERCENT {
        WorkoutType::Base
    } else {
        match fallback {
            ClassifierFallback::Tempo => WorkoutType::Tempo,
            ClassifierFallback::Mixed => WorkoutType::Mixed,
        }
    };

    Some(WorkoutClassification {
        workout_type,
        description: workout_type.description().to_owned(),
    })
}
