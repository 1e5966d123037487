//! Scraping data models

use serde::{Deserialize, Serialize};

/// Text extracted from a single web page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapedArticle {
    /// URL that was fetched
    pub url: String,

    /// Extracted text (markdown for Firecrawl, plain paragraphs otherwise)
    pub content: String,

    /// Provider that produced the content
    pub provider: String,

    /// Whether the content was cut to the configured maximum length
    #[serde(default)]
    pub truncated: bool,

    /// Time taken for the fetch in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_time_ms: Option<u64>,
}

impl ScrapedArticle {
    /// Create a new scraped article
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        content: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            provider: provider.into(),
            truncated: false,
            fetch_time_ms: None,
        }
    }

    /// True if no text was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
