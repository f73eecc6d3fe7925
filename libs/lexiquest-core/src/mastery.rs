//! Per-question mastery and review scheduling.
//!
//! Mastery is a counter in `[0, 5]` that moves one step up on a correct
//! answer and one step down on an incorrect one. The next review is a fixed
//! day offset looked up by mastery level. This is a simplification of SM-2:
//! there is no ease factor and intervals never grow past the last bucket.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Mastery of a single question, always within `[0, MAX]`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct MasteryLevel(u8);

impl MasteryLevel {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(5);

    /// Create a mastery level, clamping out-of-range values to 5.
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX.0))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether the question no longer needs review.
    pub fn is_mastered(self) -> bool {
        self == Self::MAX
    }

    /// Step one level toward 5 on a correct answer, toward 0 otherwise.
    pub fn update(self, is_correct: bool) -> Self {
        if is_correct {
            Self::new(self.0.saturating_add(1))
        } else {
            Self(self.0.saturating_sub(1))
        }
    }
}

impl From<u8> for MasteryLevel {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<MasteryLevel> for u8 {
    fn from(level: MasteryLevel) -> Self {
        level.0
    }
}

/// Updated mastery and when the question is due again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSchedule {
    pub mastery: MasteryLevel,
    pub next_review_at: DateTime<Utc>,
}

/// Days until the next review, indexed by mastery level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewIntervals(Vec<u32>);

impl Default for ReviewIntervals {
    fn default() -> Self {
        Self(vec![1, 3, 7, 14, 30, 30])
    }
}

impl ReviewIntervals {
    /// One entry per mastery level 0..=5.
    pub const LEN: usize = MasteryLevel::MAX.0 as usize + 1;

    pub fn new(days: Vec<u32>) -> Result<Self, SettingsError> {
        let intervals = Self(days);
        intervals.validate()?;
        Ok(intervals)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.0.len() != Self::LEN {
            return Err(SettingsError::IntervalCount {
                expected: Self::LEN,
                actual: self.0.len(),
            });
        }
        if let Some(mastery) = self.0.iter().position(|&days| days == 0) {
            return Err(SettingsError::ZeroInterval { mastery });
        }
        Ok(())
    }

    pub fn days(&self) -> &[u32] {
        &self.0
    }

    /// Day offset for a mastery level. Falls back to the last bucket (or one
    /// day for an empty table) so lookups never panic.
    pub fn days_for(&self, mastery: MasteryLevel) -> u32 {
        self.0
            .get(mastery.value() as usize)
            .or_else(|| self.0.last())
            .copied()
            .unwrap_or(1)
    }

    pub fn next_review_date(&self, mastery: MasteryLevel, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(i64::from(self.days_for(mastery)))
    }

    /// Apply one attempt and compute when the question is due again.
    pub fn schedule(
        &self,
        current: MasteryLevel,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> ReviewSchedule {
        let mastery = current.update(is_correct);
        ReviewSchedule {
            mastery,
            next_review_at: self.next_review_date(mastery, now),
        }
    }
}

/// Next mastery level after an attempt.
pub fn update_mastery(current: MasteryLevel, is_correct: bool) -> MasteryLevel {
    current.update(is_correct)
}

/// Due date for a question at `mastery`, using the default intervals.
pub fn next_review_date(mastery: MasteryLevel, now: DateTime<Utc>) -> DateTime<Utc> {
    ReviewIntervals::default().next_review_date(mastery, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn correct_moves_up_one_step() {
        for m in 0..=5u8 {
            let next = update_mastery(MasteryLevel::new(m), true);
            assert_eq!(next.value(), (m + 1).min(5));
        }
    }

    #[test]
    fn incorrect_moves_down_one_step() {
        for m in 0..=5u8 {
            let next = update_mastery(MasteryLevel::new(m), false);
            assert_eq!(next.value(), m.saturating_sub(1));
        }
    }

    #[test]
    fn bounds_are_sticky() {
        assert_eq!(update_mastery(MasteryLevel::MAX, true), MasteryLevel::MAX);
        assert_eq!(update_mastery(MasteryLevel::MIN, false), MasteryLevel::MIN);
        assert_eq!(update_mastery(MasteryLevel::MAX, false).value(), 4);
    }

    #[test]
    fn construction_clamps() {
        assert_eq!(MasteryLevel::new(9), MasteryLevel::MAX);
        assert_eq!(MasteryLevel::from(255), MasteryLevel::MAX);
    }

    #[test]
    fn deserialization_clamps() {
        let level: MasteryLevel = serde_json::from_str("42").unwrap();
        assert_eq!(level, MasteryLevel::MAX);
        assert_eq!(serde_json::to_string(&MasteryLevel::new(3)).unwrap(), "3");
    }

    #[test]
    fn review_offsets_follow_table() {
        let cases = [(0, 1), (1, 3), (2, 7), (3, 14), (4, 30), (5, 30)];
        for (mastery, days) in cases {
            assert_eq!(
                next_review_date(MasteryLevel::new(mastery), now()),
                now() + Duration::days(days)
            );
        }
    }

    #[test]
    fn schedule_uses_updated_mastery() {
        let intervals = ReviewIntervals::default();
        let result = intervals.schedule(MasteryLevel::new(1), true, now());
        assert_eq!(result.mastery.value(), 2);
        assert_eq!(result.next_review_at, now() + Duration::days(7));

        let result = intervals.schedule(MasteryLevel::new(1), false, now());
        assert_eq!(result.mastery.value(), 0);
        assert_eq!(result.next_review_at, now() + Duration::days(1));
    }

    #[test]
    fn mastery_cycles_without_terminal_state() {
        let mut level = MasteryLevel::MIN;
        for _ in 0..10 {
            level = level.update(true);
        }
        assert!(level.is_mastered());
        level = level.update(false);
        assert!(!level.is_mastered());
        assert_eq!(level.value(), 4);
    }

    #[test]
    fn interval_validation() {
        assert!(ReviewIntervals::new(vec![1, 2, 4, 8, 16, 32]).is_ok());
        assert_eq!(
            ReviewIntervals::new(vec![1, 2, 3]),
            Err(SettingsError::IntervalCount {
                expected: 6,
                actual: 3
            })
        );
        assert_eq!(
            ReviewIntervals::new(vec![1, 0, 3, 4, 5, 6]),
            Err(SettingsError::ZeroInterval { mastery: 1 })
        );
    }
}
