//! Article provider trait

use async_trait::async_trait;

use crate::{ScrapeError, ScrapedArticle};

/// Trait for article providers
///
/// Implemented by every acquisition backend (Firecrawl, basic HTML fetch).
#[async_trait]
pub trait ArticleProvider: Send + Sync {
    /// Fetch the article behind `url` and return its text
    ///
    /// An empty `content` is a successful fetch of a page without
    /// extractable text, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the page can not be retrieved or the response
    /// has an unexpected shape.
    async fn fetch_article(&self, url: &str) -> Result<ScrapedArticle, ScrapeError>;

    /// Get the provider name (e.g., "firecrawl", "html")
    fn provider_name(&self) -> &'static str;
}
