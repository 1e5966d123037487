//! Article URL value object

use std::fmt;

use url::Url;

use crate::errors::DomainError;

/// An absolute `http` or `https` URL pointing at an article
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUrl(Url);

impl SourceUrl {
    /// Parse and validate a URL, trimming surrounding whitespace
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let url =
            Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{trimmed}: {e}")))?;

        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(DomainError::InvalidUrl(format!(
                "{trimmed}: unsupported scheme '{other}'"
            ))),
        }
    }

    /// Get the URL as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Host part of the URL, if any
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
