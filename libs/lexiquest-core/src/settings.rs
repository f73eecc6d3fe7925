//! Scoring configuration shared by every component.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};
use crate::level::LevelCurve;
use crate::mastery::ReviewIntervals;
use crate::xp::XpRules;

/// All tunable scoring parameters. Every field falls back to its default, so
/// partial JSON documents override only what they name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub level_curve: LevelCurve,
    pub xp: XpRules,
    pub review: ReviewIntervals,
}

impl ScoringSettings {
    /// Check that the settings describe a monotonic curve, non-negative
    /// multipliers and a complete review table.
    pub fn validate(&self) -> Result<()> {
        if self.level_curve.base_requirement == 0 {
            return Err(SettingsError::ZeroBaseRequirement);
        }
        let growth = self.level_curve.growth_factor;
        if !growth.is_finite() || growth <= 1.0 {
            return Err(SettingsError::NonIncreasingGrowth(growth));
        }

        if self.xp.speed_window_ms == 0 {
            return Err(SettingsError::ZeroSpeedWindow);
        }
        let multipliers = [
            ("correct_multiplier", self.xp.correct_multiplier),
            ("speed_floor", self.xp.speed_floor),
            ("streak_step", self.xp.streak_step),
            ("streak_cap", self.xp.streak_cap),
        ];
        for (name, value) in multipliers {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidMultiplier { name, value });
            }
        }

        self.review.validate()
    }
}
