//! Error types for lexiquest-core.
//!
//! The scoring functions themselves are infallible; errors only arise at the
//! edges where settings are loaded or stored answers are resolved.

use thiserror::Error;

/// Result type alias using SettingsError.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Invalid scoring configuration.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("base level requirement must be positive")]
    ZeroBaseRequirement,

    #[error("level growth factor must be greater than 1.0, got {0}")]
    NonIncreasingGrowth(f64),

    #[error("speed window must be positive")]
    ZeroSpeedWindow,

    #[error("{name} must be a finite non-negative number, got {value}")]
    InvalidMultiplier { name: &'static str, value: f64 },

    #[error("review intervals need exactly {expected} entries, got {actual}")]
    IntervalCount { expected: usize, actual: usize },

    #[error("review interval for mastery {mastery} must be at least one day")]
    ZeroInterval { mastery: usize },
}

/// A stored answer that cannot be turned into an [`Answer`](crate::Answer).
#[derive(Debug, Error, PartialEq)]
pub enum AnswerError {
    #[error("stored answer is null")]
    Missing,

    #[error("unsupported answer shape: {0}")]
    UnsupportedShape(String),
}
