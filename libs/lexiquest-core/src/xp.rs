//! XP awarded for a single answer attempt.

use serde::{Deserialize, Serialize};

/// Inputs for scoring one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerContext {
    pub base_xp_reward: u32,
    pub is_correct: bool,
    pub time_taken_ms: u64,
    pub current_streak: u32,
}

/// Multipliers applied to a question's base reward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpRules {
    /// Reward used when a question carries none.
    pub default_reward: u32,
    pub correct_multiplier: f64,
    /// Answers taking this long or longer get `speed_floor`.
    pub speed_window_ms: u64,
    pub speed_floor: f64,
    /// Bonus per streak day.
    pub streak_step: f64,
    pub streak_cap: f64,
}

impl Default for XpRules {
    fn default() -> Self {
        Self {
            default_reward: 10,
            correct_multiplier: 1.5,
            speed_window_ms: 30_000,
            speed_floor: 0.5,
            streak_step: 0.1,
            streak_cap: 0.5,
        }
    }
}

impl XpRules {
    /// Base reward for a question, falling back to `default_reward` when the
    /// question has no reward or a zero reward.
    pub fn base_reward(&self, xp_reward: Option<u32>) -> u32 {
        match xp_reward {
            Some(reward) if reward > 0 => reward,
            _ => self.default_reward,
        }
    }

    pub fn correctness_multiplier(&self, is_correct: bool) -> f64 {
        if is_correct {
            self.correct_multiplier
        } else {
            1.0
        }
    }

    pub fn speed_multiplier(&self, time_taken_ms: u64) -> f64 {
        let window = self.speed_window_ms.max(1) as f64;
        (1.0 - time_taken_ms as f64 / window).max(self.speed_floor)
    }

    pub fn streak_multiplier(&self, current_streak: u32) -> f64 {
        1.0 + (current_streak as f64 * self.streak_step).min(self.streak_cap)
    }

    /// XP for one attempt, rounded to the nearest integer.
    pub fn award(&self, ctx: &AnswerContext) -> u64 {
        let xp = ctx.base_xp_reward as f64
            * self.correctness_multiplier(ctx.is_correct)
            * self.speed_multiplier(ctx.time_taken_ms)
            * self.streak_multiplier(ctx.current_streak);

        // Negative or NaN from a misconfigured rule set collapses to 0.
        xp.max(0.0).round() as u64
    }
}

/// XP for one attempt using the default rules.
pub fn award_xp(ctx: &AnswerContext) -> u64 {
    XpRules::default().award(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(is_correct: bool, time_taken_ms: u64, current_streak: u32) -> AnswerContext {
        AnswerContext {
            base_xp_reward: 10,
            is_correct,
            time_taken_ms,
            current_streak,
        }
    }

    #[test]
    fn instant_correct_answer() {
        assert_eq!(award_xp(&ctx(true, 0, 0)), 15);
    }

    #[test]
    fn slow_answer_hits_speed_floor() {
        assert_eq!(award_xp(&ctx(true, 30_000, 0)), 8);
        assert_eq!(award_xp(&ctx(true, 120_000, 0)), 8);
    }

    #[test]
    fn streak_bonus_is_capped() {
        assert_eq!(award_xp(&ctx(true, 0, 5)), 23);
        assert_eq!(award_xp(&ctx(true, 0, 10)), 23);
        assert_eq!(award_xp(&ctx(true, 0, 2)), 18);
    }

    #[test]
    fn incorrect_answer_has_no_correctness_bonus() {
        assert_eq!(award_xp(&ctx(false, 0, 0)), 10);
        assert_eq!(award_xp(&ctx(false, 15_000, 0)), 5);
    }

    #[test]
    fn speed_multiplier_scales_linearly() {
        let rules = XpRules::default();
        assert_eq!(rules.speed_multiplier(0), 1.0);
        assert_eq!(rules.speed_multiplier(6_000), 0.8);
        assert_eq!(rules.speed_multiplier(15_000), 0.5);
        assert_eq!(rules.speed_multiplier(29_999), 0.5);
    }

    #[test]
    fn zero_base_reward_awards_nothing() {
        let ctx = AnswerContext {
            base_xp_reward: 0,
            is_correct: true,
            time_taken_ms: 0,
            current_streak: 5,
        };
        assert_eq!(award_xp(&ctx), 0);
    }

    #[test]
    fn base_reward_falls_back_to_default() {
        let rules = XpRules::default();
        assert_eq!(rules.base_reward(None), 10);
        assert_eq!(rules.base_reward(Some(0)), 10);
        assert_eq!(rules.base_reward(Some(25)), 25);
    }

    #[test]
    fn correct_never_scores_below_incorrect() {
        for time in [0, 1, 10_000, 30_000, u64::MAX] {
            for streak in [0, 1, 5, u32::MAX] {
                let right = award_xp(&ctx(true, time, streak));
                let wrong = award_xp(&ctx(false, time, streak));
                assert!(right >= wrong, "time={time} streak={streak}");
            }
        }
    }
}
