//! Defines the error types surfaced by the analysis core.
//!
//! Only input problems are hard failures. Degradations such as a missing scope,
//! an unknown focus sector or a star that cannot be located are modelled as
//! explicit values by the components that encounter them.
use crate::layers::Mode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid birth parameter '{parameter}': {reason}")]
    InvalidBirthParameters { parameter: String, reason: String },
    #[error("Mode '{mode}' requires a time target")]
    MissingTarget { mode: Mode },
    #[error("Malformed chart: {0}")]
    MalformedChart(String),
}

impl AnalysisError {
    pub fn invalid_birth(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBirthParameters {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading engine configuration or guidance tables.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_birth_message_names_parameter() {
        let err = AnalysisError::invalid_birth("birth_time_slot", "must be within 0..=11, got 12");
        let msg = err.to_string();
        assert!(msg.contains("birth_time_slot"), "Msg: {}", msg);
        assert!(msg.contains("got 12"), "Msg: {}", msg);
    }

    #[test]
    fn test_missing_target_names_mode() {
        let err = AnalysisError::MissingTarget { mode: Mode::Month };
        assert_eq!(err.to_string(), "Mode 'month' requires a time target");
    }
}
