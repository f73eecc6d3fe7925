//! Service configuration
//!
//! Defaults cover everything; the environment (optionally seeded from a
//! `.env` file) overrides individual values:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `LEXIQUEST_SCORING_FILE` | Path to a JSON `ScoringSettings` document |
//! | `LEXIQUEST_REVIEW_QUEUE_LIMIT` | Max questions returned by the review queue |
//! | `LEXIQUEST_WEAK_AREA_THRESHOLD` | Accuracy percentage below which an area is weak |
//! | `LEXIQUEST_LEADERBOARD_LIMIT` | Max leaderboard rows |
//! | `LEXIQUEST_DAILY_REWARD_GEMS` | Gems granted per daily reward |

use std::str::FromStr;

use anyhow::{ensure, Context};
use lexiquest_core::ScoringSettings;
use serde::{Deserialize, Serialize};

pub const SCORING_FILE_VAR: &str = "LEXIQUEST_SCORING_FILE";
pub const REVIEW_QUEUE_LIMIT_VAR: &str = "LEXIQUEST_REVIEW_QUEUE_LIMIT";
pub const WEAK_AREA_THRESHOLD_VAR: &str = "LEXIQUEST_WEAK_AREA_THRESHOLD";
pub const LEADERBOARD_LIMIT_VAR: &str = "LEXIQUEST_LEADERBOARD_LIMIT";
pub const DAILY_REWARD_GEMS_VAR: &str = "LEXIQUEST_DAILY_REWARD_GEMS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub scoring: ScoringSettings,
    pub review_queue_limit: usize,
    pub weak_area_threshold: f64,
    pub leaderboard_limit: usize,
    pub daily_reward_gems: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringSettings::default(),
            review_queue_limit: 20,
            weak_area_threshold: 70.0,
            leaderboard_limit: 100,
            daily_reward_gems: 10,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment and `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to resolve variables.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(SCORING_FILE_VAR) {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read scoring settings from {}", path))?;
            config.scoring = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid scoring settings in {}", path))?;
        }

        if let Some(limit) = parse_var(&lookup, REVIEW_QUEUE_LIMIT_VAR)? {
            config.review_queue_limit = limit;
        }
        if let Some(threshold) = parse_var(&lookup, WEAK_AREA_THRESHOLD_VAR)? {
            config.weak_area_threshold = threshold;
        }
        if let Some(limit) = parse_var(&lookup, LEADERBOARD_LIMIT_VAR)? {
            config.leaderboard_limit = limit;
        }
        if let Some(gems) = parse_var(&lookup, DAILY_REWARD_GEMS_VAR)? {
            config.daily_reward_gems = gems;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.scoring.validate()?;
        ensure!(
            (0.0..=100.0).contains(&self.weak_area_threshold),
            "weak area threshold must be a percentage, got {}",
            self.weak_area_threshold
        );
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .with_context(|| format!("Invalid value for {}: {:?}", key, raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_vars() {
        let config = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_numeric_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (REVIEW_QUEUE_LIMIT_VAR, "5"),
            (WEAK_AREA_THRESHOLD_VAR, " 55.5 "),
            (LEADERBOARD_LIMIT_VAR, "10"),
            (DAILY_REWARD_GEMS_VAR, "25"),
        ]))
        .unwrap();
        assert_eq!(config.review_queue_limit, 5);
        assert_eq!(config.weak_area_threshold, 55.5);
        assert_eq!(config.leaderboard_limit, 10);
        assert_eq!(config.daily_reward_gems, 25);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup_from(&[(REVIEW_QUEUE_LIMIT_VAR, "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains(REVIEW_QUEUE_LIMIT_VAR));
    }

    #[test]
    fn test_threshold_must_be_percentage() {
        let result = ServiceConfig::from_lookup(lookup_from(&[(WEAK_AREA_THRESHOLD_VAR, "150")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_scoring_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"level_curve": {{"base_requirement": 200}}, "review": [1, 2, 4, 8, 16, 32]}}"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config =
            ServiceConfig::from_lookup(lookup_from(&[(SCORING_FILE_VAR, path.as_str())])).unwrap();
        assert_eq!(config.scoring.level_curve.base_requirement, 200);
        assert_eq!(config.scoring.level_curve.growth_factor, 1.5);
        assert_eq!(config.scoring.review.days(), &[1, 2, 4, 8, 16, 32]);
    }

    #[test]
    fn test_invalid_scoring_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"level_curve": {{"growth_factor": 0.5}}}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let result = ServiceConfig::from_lookup(lookup_from(&[(SCORING_FILE_VAR, path.as_str())]));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_scoring_file() {
        let err = ServiceConfig::from_lookup(lookup_from(&[(
            SCORING_FILE_VAR,
            "/nonexistent/scoring.json",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read scoring settings"));
    }
}
