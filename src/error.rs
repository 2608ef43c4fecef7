//! Error types for the usability analytics engine
//!
//! This module provides structured error definitions using thiserror. Most
//! failure classes in the engine are recovered locally (excluded respondents,
//! degraded classification labels, placeholder charts); the variants here are
//! what remains when an operation genuinely cannot proceed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for usability analytics operations
#[derive(Error, Debug)]
pub enum UsabilityError {
    /// A respondent's Likert answers are missing or outside [1, 5]
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Remote classification backend failed
    #[error("Classification backend error: {0}")]
    Backend(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart image could not be decoded
    #[error("Asset error: {0}")]
    Asset(String),

    /// Layout state machine misuse (e.g. placing after finalize)
    #[error("Layout error: {0}")]
    Layout(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for usability analytics operations
pub type Result<T> = std::result::Result<T, UsabilityError>;

/// Convert anyhow::Error to UsabilityError
impl From<anyhow::Error> for UsabilityError {
    fn from(err: anyhow::Error) -> Self {
        UsabilityError::Other(err.to_string())
    }
}

/// Why a respondent's answers cannot be scored
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ValidationError {
    /// Answer at the 1-based position is absent
    #[error("answer {position} is missing")]
    MissingAnswer { position: usize },

    /// Answer at the 1-based position is outside the Likert domain
    #[error("answer {position} has value {value}, expected 1..=5")]
    OutOfRange { position: usize, value: i64 },

    /// A raw answer label could not be read as a Likert value
    #[error("answer {position} has unrecognized label '{label}'")]
    UnrecognizedLabel { position: usize, label: String },

    /// Record does not carry exactly ten answers
    #[error("expected 10 answers, found {found}")]
    WrongAnswerCount { found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UsabilityError::Layout("document already finalized".to_string());
        assert_eq!(err.to_string(), "Layout error: document already finalized");
    }

    #[test]
    fn test_validation_conversion() {
        let err: UsabilityError = ValidationError::OutOfRange {
            position: 4,
            value: 7,
        }
        .into();
        assert!(matches!(err, UsabilityError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: answer 4 has value 7, expected 1..=5"
        );
    }
}
