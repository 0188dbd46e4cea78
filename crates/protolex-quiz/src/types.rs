//! Quiz configuration and errors.

use protolex_core::Error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wrong answers offered per question by default.
pub const DEFAULT_DISTRACTORS: usize = 3;

/// Quiz generation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Wrong answers per question.
    pub distractors: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            distractors: DEFAULT_DISTRACTORS,
        }
    }
}

impl QuizConfig {
    pub fn with_distractors(distractors: usize) -> Self {
        Self { distractors }
    }
}

/// Reasons a quiz could not be generated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The protocol has no statements to ask about.
    #[error("protocol {0:?} has no advantages, disadvantages or use cases to ask about")]
    NoCandidates(String),

    /// Other protocols cannot supply enough distinct wrong answers.
    #[error("need {needed} distinct distractors but the pool only has {available}")]
    InsufficientPool { needed: usize, available: usize },

    /// Zero questions requested.
    #[error("question count must be at least 1")]
    InvalidCount,

    /// The configuration cannot produce a multiple-choice question.
    #[error("invalid quiz configuration: {0}")]
    InvalidConfig(String),
}

impl From<QuizError> for Error {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::NoCandidates(_) => Error::invalid_data(err.to_string()),
            QuizError::InsufficientPool { .. } => Error::operation(err.to_string()),
            QuizError::InvalidCount => Error::invalid_query(err.to_string()),
            QuizError::InvalidConfig(_) => Error::config(err.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(QuizConfig::default().distractors, 3);
        assert_eq!(QuizConfig::with_distractors(1).distractors, 1);
    }

    #[test]
    fn test_error_messages() {
        let err = QuizError::InsufficientPool {
            needed: 3,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "need 3 distinct distractors but the pool only has 1"
        );
    }

    #[test]
    fn test_into_core_error() {
        let err: Error = QuizError::InvalidCount.into();
        assert!(err.is_invalid_query());

        let err: Error = QuizError::NoCandidates("x".into()).into();
        assert!(matches!(err, Error::InvalidData(_)));

        let err: Error = QuizError::InvalidConfig("zero".into()).into();
        assert!(matches!(err, Error::Config(_)));
    }
}
