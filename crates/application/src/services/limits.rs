//! Time limits for the provider attempts of a stage

use std::{future::Future, time::Duration};

use tracing::warn;

use crate::error::ApplicationError;

/// Separate limits for a stage's optional attempt and its mandatory fallback
///
/// The optional attempt can never use up the mandatory provider's time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageLimits {
    /// Limit for the rich or premium attempt
    pub optional: Duration,
    /// Limit for the provider that always runs last
    pub mandatory: Duration,
}

impl StageLimits {
    /// Create limits from two durations
    pub const fn new(optional: Duration, mandatory: Duration) -> Self {
        Self {
            optional,
            mandatory,
        }
    }

    /// Create limits from whole seconds
    pub const fn from_secs(optional: u64, mandatory: u64) -> Self {
        Self::new(Duration::from_secs(optional), Duration::from_secs(mandatory))
    }
}

/// Run `attempt` under `limit`, mapping an elapsed limit to `Timeout`
pub(crate) async fn within<T>(
    limit: Duration,
    attempt: impl Future<Output = Result<T, ApplicationError>>,
) -> Result<T, ApplicationError> {
    match tokio::time::timeout(limit, attempt).await {
        Ok(result) => result,
        Err(_) => {
            warn!(limit = ?limit, "Provider attempt timed out");
            Err(ApplicationError::Timeout(limit.as_secs()))
        },
    }
}
