//! Firecrawl API client
//!
//! Client for the Firecrawl scrape endpoint (<https://docs.firecrawl.dev/>),
//! which renders a page and returns it as markdown.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{
    config::ScrapeConfig, error::ScrapeError, models::ScrapedArticle, provider::ArticleProvider,
};

/// Firecrawl API request and response structures
mod api {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct ScrapeRequest<'a> {
        pub url: &'a str,
        pub formats: [&'a str; 1],
    }

    #[derive(Debug, Deserialize)]
    pub struct ScrapeResponse {
        #[serde(default)]
        pub success: bool,
        pub data: Option<ScrapeData>,
        pub error: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ScrapeData {
        pub markdown: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorResponse {
        pub error: Option<String>,
    }
}

/// Firecrawl scrape client
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout_secs: u64,
}

impl std::fmt::Debug for FirecrawlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirecrawlClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl FirecrawlClient {
    /// Create a new Firecrawl client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot be created.
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let api_key = config
            .firecrawl_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ScrapeError::ConfigurationError("Firecrawl API key is required".to_string())
            })?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.firecrawl_timeout_secs))
            .build()
            .map_err(|e| ScrapeError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.firecrawl_base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.firecrawl_timeout_secs,
        })
    }

    fn scrape_url(&self) -> String {
        format!("{}/scrape", self.base_url)
    }

    /// Pull the error message out of a non-success response body
    fn error_message(body: &str) -> String {
        serde_json::from_str::<api::ErrorResponse>(body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| body.chars().take(200).collect())
    }
}

#[async_trait]
impl ArticleProvider for FirecrawlClient {
    #[instrument(skip(self), fields(provider = "firecrawl"))]
    async fn fetch_article(&self, url: &str) -> Result<ScrapedArticle, ScrapeError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ScrapeError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let request = api::ScrapeRequest {
            url,
            formats: ["markdown"],
        };
        let start = Instant::now();

        debug!(endpoint = %self.scrape_url(), "Sending Firecrawl scrape request");

        let response = self
            .client
            .post(self.scrape_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ScrapeError::from_request(&e, self.timeout_secs))?;

        let status = response.status();
        debug!(status = %status, "Received Firecrawl response");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok());

            return Err(ScrapeError::RateLimitExceeded {
                retry_after_secs: retry_after,
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ScrapeError::AuthenticationFailed(
                "Invalid Firecrawl API key".to_string(),
            ));
        }

        if status == reqwest::StatusCode::PAYMENT_REQUIRED {
            return Err(ScrapeError::ServiceUnavailable(
                "Firecrawl credits exhausted".to_string(),
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScrapeError::HttpStatus {
                status: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        let api_response: api::ScrapeResponse = response
            .json()
            .await
            .map_err(|e| ScrapeError::ParseError(e.to_string()))?;

        if !api_response.success {
            return Err(ScrapeError::ServiceUnavailable(
                api_response
                    .error
                    .unwrap_or_else(|| "scrape reported failure".to_string()),
            ));
        }

        let markdown = api_response
            .data
            .and_then(|data| data.markdown)
            .ok_or_else(|| {
                ScrapeError::MissingContent("response has no data.markdown field".to_string())
            })?;

        let mut article = ScrapedArticle::new(url, markdown.trim(), self.provider_name());
        #[allow(clippy::cast_possible_truncation)]
        {
            article.fetch_time_ms = Some(start.elapsed().as_millis() as u64);
        }

        debug!(
            chars = article.content.chars().count(),
            time_ms = article.fetch_time_ms,
            "Firecrawl scrape completed"
        );

        Ok(article)
    }

    fn provider_name(&self) -> &'static str {
        "firecrawl"
    }
}
