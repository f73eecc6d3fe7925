//! Consecutive active-day streaks.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A learner's streak of consecutive active days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active_on: Option<NaiveDate>,
}

impl Streak {
    /// Record activity on `today`.
    ///
    /// Same day leaves the streak unchanged, the following day extends it,
    /// and any gap restarts it at 1. Activity dated before the last active
    /// day is ignored.
    pub fn record_activity(self, today: NaiveDate) -> Self {
        let current = match self.last_active_on {
            None => 1,
            Some(last) if today <= last => return self,
            Some(last) if today - last == Duration::days(1) => self.current.saturating_add(1),
            Some(_) => 1,
        };

        Self {
            current,
            longest: self.longest.max(current),
            last_active_on: Some(today),
        }
    }

    /// Streak still counting toward XP bonuses on `today`: zero once a full
    /// day has been missed.
    pub fn effective(&self, today: NaiveDate) -> u32 {
        match self.last_active_on {
            Some(last) if today - last <= Duration::days(1) => self.current,
            _ => 0,
        }
    }
}
