//! Error handling for the progress service

use lexiquest_core::{AnswerError, SettingsError};
use thiserror::Error;

/// Service error types
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid stored answer: {0}")]
    Answer(#[from] AnswerError),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ServiceError {
    /// Stable machine-readable code, suitable for an HTTP layer to map onto
    /// status codes.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Store(_) => "store_error",
            ServiceError::Answer(_) => "answer_error",
            ServiceError::Settings(_) => "settings_error",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::BadRequest(_) => "bad_request",
        }
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;
