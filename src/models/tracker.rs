// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Daily home-screen trackers: water, sleep and weight lost.

use serde::{Deserialize, Serialize};

pub const WATER_GOAL_GLASSES: u32 = 8;
pub const WEIGHT_LOSS_GOAL_KG: f64 = 6.0;
const WEIGHT_LOSS_STEP_KG: f64 = 0.5;

/// Per-day tracker counters shown on the home screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTracker {
    pub water_glasses: u32,
    pub sleep_hours: Option<f64>,
    pub weight_lost_kg: f64,
}

impl DailyTracker {
    /// One more glass, saturating at the daily goal.
    pub fn add_water(&mut self) {
        if self.water_glasses < WATER_GOAL_GLASSES {
            self.water_glasses += 1;
        }
    }

    pub fn reset_water(&mut self) {
        self.water_glasses = 0;
    }

    pub fn track_sleep(&mut self, hours: f64) {
        self.sleep_hours = Some(hours);
    }

    /// Record another half-kilogram lost, saturating at the goal.
    pub fn add_weight_loss(&mut self) {
        let next = self.weight_lost_kg + WEIGHT_LOSS_STEP_KG;
        self.weight_lost_kg = next.min(WEIGHT_LOSS_GOAL_KG);
    }

    /// Fraction of the weight-loss goal reached, in `0.0..=1.0`.
    pub fn weight_progress(&self) -> f64 {
        (self.weight_lost_kg / WEIGHT_LOSS_GOAL_KG).clamp(0.0, 1.0)
    }
}
