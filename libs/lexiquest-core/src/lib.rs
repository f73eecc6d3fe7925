//! Progress-scoring core for the LexiQuest English-learning app.
//!
//! Provides:
//! - Level curve (cumulative XP to level and progress)
//! - XP award calculation (correctness, speed and streak multipliers)
//! - Mastery updates and fixed-interval review scheduling
//! - Answer resolution and matching (scalar and list answers)
//! - Day streak tracking and scoring settings
//!
//! Everything here is pure and synchronous; persistence belongs to callers.

pub mod error;
pub mod level;
pub mod mastery;
pub mod matching;
pub mod settings;
pub mod streak;
pub mod types;
pub mod xp;

pub use error::{AnswerError, Result, SettingsError};
pub use level::{level_for, LevelCurve, LevelInfo};
pub use mastery::{next_review_date, update_mastery, MasteryLevel, ReviewIntervals, ReviewSchedule};
pub use matching::{compare_answers, Answer, MatchResult};
pub use settings::ScoringSettings;
pub use streak::Streak;
pub use types::CefrLevel;
pub use xp::{award_xp, AnswerContext, XpRules};
