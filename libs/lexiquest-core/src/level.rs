//! Level curve: maps cumulative XP to a level and the progress within it.
//!
//! Level 1 needs `base_requirement` XP, and every later level needs the
//! previous requirement multiplied by `growth_factor`, floored. The level is
//! always derived from total XP alone, so replaying a learner's history
//! reproduces the same level.

use serde::{Deserialize, Serialize};

/// Where a cumulative XP total sits on the level curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// Current level, starting at 1.
    pub level: u32,
    /// XP earned since reaching the current level.
    pub xp_in_level: u64,
    /// XP the current level requires before the next one.
    pub xp_for_next_level: u64,
    /// `xp_in_level / xp_for_next_level`, in `[0, 1)`.
    pub progress: f64,
}

/// Level curve parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelCurve {
    pub base_requirement: u64,
    pub growth_factor: f64,
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base_requirement: 100,
            growth_factor: 1.5,
        }
    }
}

impl LevelCurve {
    /// Compute the level reached with `total_xp` cumulative XP.
    pub fn level_for(&self, total_xp: u64) -> LevelInfo {
        let mut level: u32 = 1;
        let mut cumulative: u64 = 0;
        let mut requirement = self.base_requirement.max(1);

        // Stops on overflow as well, so u64::MAX cannot spin forever.
        while let Some(threshold) = cumulative.checked_add(requirement) {
            if total_xp < threshold {
                break;
            }
            cumulative = threshold;
            level = level.saturating_add(1);
            requirement = self.grow(requirement);
        }

        let xp_in_level = total_xp - cumulative;
        LevelInfo {
            level,
            xp_in_level,
            xp_for_next_level: requirement,
            progress: xp_in_level as f64 / requirement as f64,
        }
    }

    /// Cumulative XP at which `level` begins. Levels 0 and 1 both start at 0.
    pub fn total_xp_for_level(&self, level: u32) -> u64 {
        let mut cumulative: u64 = 0;
        let mut requirement = self.base_requirement.max(1);

        for _ in 1..level {
            cumulative = cumulative.saturating_add(requirement);
            requirement = self.grow(requirement);
        }

        cumulative
    }

    /// Next requirement, floored. Always strictly larger than the current one.
    fn grow(&self, requirement: u64) -> u64 {
        let grown = (requirement as f64 * self.growth_factor).floor() as u64;
        grown.max(requirement.saturating_add(1))
    }
}

/// Compute the level for `total_xp` using the default curve.
pub fn level_for(total_xp: u64) -> LevelInfo {
    LevelCurve::default().level_for(total_xp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_xp_is_level_one() {
        assert_eq!(
            level_for(0),
            LevelInfo {
                level: 1,
                xp_in_level: 0,
                xp_for_next_level: 100,
                progress: 0.0,
            }
        );
    }

    #[test]
    fn first_threshold_boundary() {
        assert_eq!(level_for(99).level, 1);
        assert_eq!(level_for(100).level, 2);
        assert_eq!(level_for(100).xp_in_level, 0);
        assert_eq!(level_for(100).xp_for_next_level, 150);
    }

    #[test]
    fn second_level_requirement_is_floored_growth() {
        assert_eq!(level_for(249).level, 2);
        assert_eq!(level_for(250).level, 3);
        assert_eq!(level_for(250).xp_for_next_level, 225);
        // 225 * 1.5 = 337.5 floors to 337
        assert_eq!(level_for(475).xp_for_next_level, 337);
    }

    #[test]
    fn progress_within_level() {
        let info = level_for(175);
        assert_eq!(info.level, 2);
        assert_eq!(info.xp_in_level, 75);
        assert_eq!(info.progress, 0.5);
    }

    #[test]
    fn level_is_non_decreasing() {
        let mut previous = 1;
        for xp in 0..20_000 {
            let info = level_for(xp);
            assert!(info.level >= previous);
            assert!(info.progress >= 0.0 && info.progress < 1.0);
            previous = info.level;
        }
    }

    #[test]
    fn total_xp_for_level_matches_level_for() {
        let curve = LevelCurve::default();
        assert_eq!(curve.total_xp_for_level(1), 0);
        assert_eq!(curve.total_xp_for_level(2), 100);
        assert_eq!(curve.total_xp_for_level(3), 250);

        for level in 2..30 {
            let start = curve.total_xp_for_level(level);
            assert_eq!(curve.level_for(start).level, level);
            assert_eq!(curve.level_for(start - 1).level, level - 1);
        }
    }

    #[test]
    fn huge_xp_terminates() {
        let info = level_for(u64::MAX);
        assert!(info.level > 1);
    }

    #[test]
    fn custom_curve() {
        let curve = LevelCurve {
            base_requirement: 50,
            growth_factor: 2.0,
        };
        assert_eq!(curve.level_for(49).level, 1);
        assert_eq!(curve.level_for(50).level, 2);
        assert_eq!(curve.level_for(150).level, 3);
        assert_eq!(curve.level_for(150).xp_for_next_level, 200);
    }

    #[test]
    fn flat_growth_still_increases_requirement() {
        let curve = LevelCurve {
            base_requirement: 1,
            growth_factor: 1.0,
        };
        assert_eq!(curve.level_for(0).level, 1);
        assert_eq!(curve.level_for(1).level, 2);
        // requirements 1, 2, 3
        assert_eq!(curve.level_for(6).level, 4);
    }
}
