//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::outcome::PipelineStage;

/// Errors reported by ports and stage services
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Credential missing or rejected by the provider
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Provider is not compiled into this build
    #[error("Not available: {0}")]
    NotAvailable(String),

    /// Provider answered with something unusable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Stage did not finish in time
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Terminal failure of a pipeline run
///
/// Carries the first unrecoverable stage failure. Optional-provider failures
/// never end up here; they become warnings on the result.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No usable source or an invalid parameter
    #[error("Invalid input: {0}")]
    Input(String),

    /// The source resolved to empty text
    #[error("No article content could be extracted")]
    EmptyContent,

    /// The mandatory article source failed
    #[error("Fetching the article failed: {0}")]
    Fetch(#[source] ApplicationError),

    /// The script model failed or returned nothing
    #[error("Script generation failed: {0}")]
    Generation(#[source] ApplicationError),

    /// Every voice provider failed
    #[error("Audio synthesis failed: {0}")]
    Synthesis(#[source] ApplicationError),

    /// A provider could not be constructed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PipelineError {
    /// Stage that failed, if the failure belongs to one
    pub const fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::Input(_) | Self::EmptyContent => Some(PipelineStage::Input),
            Self::Fetch(_) => Some(PipelineStage::Fetch),
            Self::Generation(_) => Some(PipelineStage::Generation),
            Self::Synthesis(_) => Some(PipelineStage::Synthesis),
            Self::Configuration(_) => None,
        }
    }
}

impl From<DomainError> for PipelineError {
    fn from(err: DomainError) -> Self {
        Self::Input(err.to_string())
    }
}
