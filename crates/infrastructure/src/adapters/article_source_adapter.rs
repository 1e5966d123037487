//! Article source adapter - Implements ArticleSourcePort using integration_scrape

use std::sync::Arc;

use application::{error::ApplicationError, ports::ArticleSourcePort};
use async_trait::async_trait;
use domain::ArticleOrigin;
#[cfg(feature = "firecrawl")]
use integration_scrape::FirecrawlClient;
use integration_scrape::{ArticleProvider, HtmlArticleClient, ScrapeConfig, ScrapeError};
use tracing::{debug, instrument, warn};

/// Adapter for article providers
pub struct ArticleSourceAdapter {
    provider: Arc<dyn ArticleProvider>,
    origin: ArticleOrigin,
    name: &'static str,
}

impl std::fmt::Debug for ArticleSourceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleSourceAdapter")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .finish()
    }
}

impl ArticleSourceAdapter {
    /// Display name of the plain HTML fetcher
    pub const BASIC_NAME: &'static str = "basic HTML fetch";

    /// Display name of the Firecrawl scraper
    pub const FIRECRAWL_NAME: &'static str = "Firecrawl";

    /// Create the credential-free HTML fetcher
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the HTTP client can not be
    /// built from the configuration.
    pub fn basic(config: &ScrapeConfig) -> Result<Self, ApplicationError> {
        let client = HtmlArticleClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_provider(
            Arc::new(client),
            ArticleOrigin::BasicScrape,
            Self::BASIC_NAME,
        ))
    }

    /// Create the Firecrawl scraper
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the configuration carries
    /// no Firecrawl key or is otherwise invalid.
    #[cfg(feature = "firecrawl")]
    pub fn firecrawl(config: &ScrapeConfig) -> Result<Self, ApplicationError> {
        let client = FirecrawlClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_provider(
            Arc::new(client),
            ArticleOrigin::RichScrape,
            Self::FIRECRAWL_NAME,
        ))
    }

    /// Wrap an existing provider
    pub fn with_provider(
        provider: Arc<dyn ArticleProvider>,
        origin: ArticleOrigin,
        name: &'static str,
    ) -> Self {
        Self {
            provider,
            origin,
            name,
        }
    }

    /// Map scrape error to application error
    fn map_error(err: ScrapeError) -> ApplicationError {
        match err {
            ScrapeError::ConfigurationError(e) => ApplicationError::Configuration(e),
            ScrapeError::AuthenticationFailed(e) => ApplicationError::NotAuthorized(e),
            ScrapeError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            ScrapeError::Timeout { timeout_secs } => ApplicationError::Timeout(timeout_secs),
            ScrapeError::ParseError(e) | ScrapeError::MissingContent(e) => {
                ApplicationError::InvalidResponse(e)
            },
            ScrapeError::InvalidUrl(url) => {
                ApplicationError::ExternalService(format!("Invalid URL: {url}"))
            },
            ScrapeError::HttpStatus { status, message } => {
                ApplicationError::ExternalService(format!("HTTP {status}: {message}"))
            },
            ScrapeError::ConnectionFailed(e)
            | ScrapeError::RequestFailed(e)
            | ScrapeError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
        }
    }
}

#[async_trait]
impl ArticleSourcePort for ArticleSourceAdapter {
    #[instrument(skip(self), fields(source = self.name))]
    async fn fetch_article(&self, url: &str) -> Result<String, ApplicationError> {
        let article = self
            .provider
            .fetch_article(url)
            .await
            .map_err(Self::map_error)?;

        if article.truncated {
            warn!(chars = article.content.chars().count(), "Article was truncated");
        }
        debug!(
            provider = %article.provider,
            fetch_time_ms = ?article.fetch_time_ms,
            "Article fetched"
        );

        Ok(article.content)
    }

    fn source_name(&self) -> String {
        self.name.to_string()
    }

    fn origin(&self) -> ArticleOrigin {
        self.origin
    }
}
