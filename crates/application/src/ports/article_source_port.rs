//! Article source port - Interface for turning a URL into article text

use async_trait::async_trait;
use domain::ArticleOrigin;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for article acquisition
///
/// Implementations may use a rich scraping service or plain HTML parsing.
/// An empty string is a valid answer; callers decide what empty means.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArticleSourcePort: Send + Sync {
    /// Fetch the readable text of the page at `url`
    ///
    /// # Arguments
    /// * `url` - Absolute http(s) URL of the article
    async fn fetch_article(&self, url: &str) -> Result<String, ApplicationError>;

    /// Provider name used in logs and warnings
    fn source_name(&self) -> String;

    /// Origin tag for text produced by this source
    fn origin(&self) -> ArticleOrigin;
}
