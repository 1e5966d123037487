//! Scraping configuration

use serde::{Deserialize, Serialize};

/// Configuration for article acquisition
#[derive(Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Firecrawl API key (optional, enables rich scraping)
    #[serde(default, skip_serializing)]
    pub firecrawl_api_key: Option<String>,

    /// Firecrawl API base URL
    #[serde(default = "default_firecrawl_base_url")]
    pub firecrawl_base_url: String,

    /// Timeout for Firecrawl requests in seconds
    #[serde(default = "default_firecrawl_timeout_secs")]
    pub firecrawl_timeout_secs: u64,

    /// Timeout for the basic page download in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum characters kept from a basic page download
    #[serde(default = "default_max_article_chars")]
    pub max_article_chars: usize,

    /// User-Agent header sent with page downloads
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_firecrawl_base_url() -> String {
    "https://api.firecrawl.dev/v1".to_string()
}

const fn default_firecrawl_timeout_secs() -> u64 {
    60
}

const fn default_fetch_timeout_secs() -> u64 {
    20
}

const fn default_max_article_chars() -> usize {
    15_000
}

fn default_user_agent() -> String {
    concat!("blogcast/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            firecrawl_api_key: None,
            firecrawl_base_url: default_firecrawl_base_url(),
            firecrawl_timeout_secs: default_firecrawl_timeout_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_article_chars: default_max_article_chars(),
            user_agent: default_user_agent(),
        }
    }
}

impl std::fmt::Debug for ScrapeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrapeConfig")
            .field(
                "firecrawl_api_key",
                &self.firecrawl_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("firecrawl_base_url", &self.firecrawl_base_url)
            .field("firecrawl_timeout_secs", &self.firecrawl_timeout_secs)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("max_article_chars", &self.max_article_chars)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ScrapeConfig {
    /// Create a configuration for testing (no API key, short timeouts)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            firecrawl_api_key: None,
            firecrawl_timeout_secs: 5,
            fetch_timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Copy of this configuration carrying a Firecrawl key
    #[must_use]
    pub fn with_firecrawl_key(mut self, api_key: impl Into<String>) -> Self {
        self.firecrawl_api_key = Some(api_key.into());
        self
    }

    /// Whether a non-empty Firecrawl key is present
    #[must_use]
    pub fn has_firecrawl_key(&self) -> bool {
        self.firecrawl_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if any value is out of range.
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be greater than 0".to_string());
        }
        if self.firecrawl_timeout_secs == 0 {
            return Err("firecrawl_timeout_secs must be greater than 0".to_string());
        }
        if self.max_article_chars == 0 {
            return Err("max_article_chars must be greater than 0".to_string());
        }
        if !self.firecrawl_base_url.starts_with("http://")
            && !self.firecrawl_base_url.starts_with("https://")
        {
            return Err(format!(
                "firecrawl_base_url must be an http(s) URL, got '{}'",
                self.firecrawl_base_url
            ));
        }
        Ok(())
    }
}
