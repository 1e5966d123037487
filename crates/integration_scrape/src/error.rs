//! Scraping error types

use thiserror::Error;

/// Errors that can occur while acquiring article text
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Connection to the remote host failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed before a response was received
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Remote host answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Status code returned
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Failed to parse the response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The response did not contain the expected content field
    #[error("Missing content: {0}")]
    MissingContent(String),

    /// URL is malformed or uses an unsupported scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// API key is missing or invalid
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl ScrapeError {
    /// Classify a transport error from reqwest
    #[must_use]
    pub fn from_request(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ScrapeError::HttpStatus {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");

        let err = ScrapeError::Timeout { timeout_secs: 20 };
        assert!(err.to_string().contains("20"));
    }
}
