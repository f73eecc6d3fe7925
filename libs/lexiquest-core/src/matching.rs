//! Answer resolution and correctness checks.
//!
//! Stored answers arrive as loosely-shaped JSON: a plain string, a string
//! holding JSON, or an array. They are resolved once into an [`Answer`] so
//! the rest of the pipeline only deals with two shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnswerError;

/// A resolved answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Scalar(String),
    /// Compared as a multiset, so element order does not matter.
    OrderedList(Vec<String>),
}

/// Result of comparing a submitted answer to the correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub is_correct: bool,
    /// Normalized submitted answer (for display).
    pub submitted_normalized: String,
    /// Normalized correct answer (for display).
    pub correct_normalized: String,
}

impl Answer {
    /// Resolve a correct answer as persisted by the question store.
    ///
    /// Strings wrapped in quotes are JSON-decoded (or unquoted when that
    /// fails), and strings that start like a JSON array or object are parsed
    /// when they are valid JSON.
    pub fn from_stored(value: &Value) -> Result<Self, AnswerError> {
        match value {
            Value::String(raw) => Self::from_stored_string(raw),
            other => Self::from_json(other),
        }
    }

    /// Resolve an answer as submitted by a learner. No JSON-in-string
    /// decoding is applied.
    pub fn from_submitted(value: &Value) -> Self {
        match value {
            Value::Null => Self::Scalar(String::new()),
            other => Self::from_json(other).unwrap_or_else(|_| Self::Scalar(other.to_string())),
        }
    }

    fn from_stored_string(raw: &str) -> Result<Self, AnswerError> {
        if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            return Ok(match serde_json::from_str::<String>(raw) {
                Ok(decoded) => Self::Scalar(decoded),
                Err(_) => Self::Scalar(raw.trim_matches('"').to_string()),
            });
        }

        if raw.starts_with('[') || raw.starts_with('{') {
            if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
                return Self::from_json(&parsed);
            }
        }

        Ok(Self::Scalar(raw.to_string()))
    }

    fn from_json(value: &Value) -> Result<Self, AnswerError> {
        match value {
            Value::Null => Err(AnswerError::Missing),
            Value::String(s) => Ok(Self::Scalar(s.clone())),
            Value::Bool(_) | Value::Number(_) => Ok(Self::Scalar(value.to_string())),
            Value::Array(items) => Ok(Self::OrderedList(
                items.iter().map(element_to_string).collect(),
            )),
            Value::Object(_) => Err(AnswerError::UnsupportedShape(value.to_string())),
        }
    }

    /// Whether `self`, as submitted, matches `correct`.
    pub fn matches(&self, correct: &Answer) -> bool {
        match (self, correct) {
            (Self::Scalar(submitted), Self::Scalar(expected)) => {
                normalize_scalar(submitted) == normalize_scalar(expected)
            }
            (Self::OrderedList(submitted), Self::OrderedList(expected)) => {
                sorted(submitted) == sorted(expected)
            }
            // A list compared against a scalar is coerced to "a,b,c" first.
            (Self::OrderedList(submitted), Self::Scalar(expected)) => {
                normalize_scalar(&submitted.join(",")) == normalize_scalar(expected)
            }
            (Self::Scalar(_), Self::OrderedList(_)) => false,
        }
    }

    fn display_normalized(&self) -> String {
        match self {
            Self::Scalar(s) => normalize_scalar(s),
            Self::OrderedList(items) => sorted(items).join(", "),
        }
    }
}

/// Compare a submitted answer to the correct answer.
pub fn compare_answers(submitted: &Answer, correct: &Answer) -> MatchResult {
    MatchResult {
        is_correct: submitted.matches(correct),
        submitted_normalized: submitted.display_normalized(),
        correct_normalized: correct.display_normalized(),
    }
}

fn element_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lowercase, trim and collapse internal whitespace.
fn normalize_scalar(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn sorted(items: &[String]) -> Vec<&str> {
    let mut items: Vec<&str> = items.iter().map(String::as_str).collect();
    items.sort_unstable();
    items
}
