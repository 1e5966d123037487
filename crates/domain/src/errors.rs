//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Script budget outside of the accepted range
    #[error("Script length must be between {min} and {max} characters, got {value}")]
    InvalidScriptBudget {
        /// The rejected value
        value: u32,
        /// Smallest accepted budget
        min: u32,
        /// Largest accepted budget
        max: u32,
    },

    /// Voice id that is in neither catalog
    #[error("Unknown voice: {0}")]
    UnknownVoice(String),

    /// Source URL could not be parsed or uses an unsupported scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_budget_message_names_range() {
        let err = DomainError::InvalidScriptBudget {
            value: 42,
            min: 500,
            max: 4000,
        };
        assert_eq!(
            err.to_string(),
            "Script length must be between 500 and 4000 characters, got 42"
        );
    }

    #[test]
    fn unknown_voice_message() {
        let err = DomainError::UnknownVoice("nova".to_string());
        assert_eq!(err.to_string(), "Unknown voice: nova");
    }

    #[test]
    fn invalid_url_message() {
        let err = DomainError::InvalidUrl("ftp://x".to_string());
        assert_eq!(err.to_string(), "Invalid URL: ftp://x");
    }
}
