//! Basic article fetcher
//!
//! Downloads the raw page and pulls paragraph text out of the HTML. Text
//! inside the first `<article>` element is preferred; pages without one fall
//! back to every `<p>` in the document.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use domain::truncate_chars;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use crate::{
    config::ScrapeConfig, error::ScrapeError, models::ScrapedArticle, provider::ArticleProvider,
};

/// Separator placed between extracted paragraphs
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Plain HTTP + HTML paragraph extractor
#[derive(Debug)]
pub struct HtmlArticleClient {
    client: Client,
    timeout_secs: u64,
    max_chars: usize,
}

impl HtmlArticleClient {
    /// Create a new HTML article client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ScrapeError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.fetch_timeout_secs,
            max_chars: config.max_article_chars,
        })
    }
}

/// Extract readable paragraph text from an HTML document
///
/// Paragraph whitespace is collapsed, empty paragraphs are dropped and the
/// rest are joined with a blank line.
///
/// # Errors
///
/// Returns an error only if a built-in CSS selector fails to compile.
pub fn extract_article_text(html: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);
    let article_selector = selector("article")?;
    let paragraph_selector = selector("p")?;

    let paragraphs: Vec<String> = match document.select(&article_selector).next() {
        Some(article) => article.select(&paragraph_selector).map(element_text).collect(),
        None => document.select(&paragraph_selector).map(element_text).collect(),
    };

    Ok(paragraphs
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR))
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::ParseError(format!("invalid selector '{css}': {e:?}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl ArticleProvider for HtmlArticleClient {
    #[instrument(skip(self), fields(provider = "html"))]
    async fn fetch_article(&self, url: &str) -> Result<ScrapedArticle, ScrapeError> {
        let parsed = Url::parse(url.trim())
            .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {e}", url.trim())))?;
        let start = Instant::now();

        let response = self
            .client
            .get(parsed.as_str())
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| ScrapeError::from_request(&e, self.timeout_secs))?;

        let status = response.status();
        debug!(status = %status, "Received page response");

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

        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("request failed").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::from_request(&e, self.timeout_secs))?;

        let text = extract_article_text(&body)?;
        let content = truncate_chars(&text, self.max_chars);

        let mut article = ScrapedArticle::new(parsed.as_str(), content, self.provider_name());
        article.truncated = content.len() < text.len();
        #[allow(clippy::cast_possible_truncation)]
        {
            article.fetch_time_ms = Some(start.elapsed().as_millis() as u64);
        }

        debug!(
            html_bytes = body.len(),
            text_chars = article.content.chars().count(),
            truncated = article.truncated,
            "Extracted article text"
        );

        Ok(article)
    }

    fn provider_name(&self) -> &'static str {
        "html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn prefers_article_paragraphs() {
        let html = r"
            <html><body>
              <p>Navigation noise</p>
              <article>
                <h1>Title</h1>
                <p>First paragraph.</p>
                <p>Second paragraph.</p>
              </article>
              <p>Footer noise</p>
            </body></html>";

        let text = extract_article_text(html).unwrap();
        assert_eq!(text, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn falls_back_to_all_paragraphs() {
        let html = "<html><body><p>One</p><div><p>Two</p></div></body></html>";
        assert_eq!(extract_article_text(html).unwrap(), "One\n\nTwo");
    }

    #[test]
    fn collapses_inline_whitespace() {
        let html = "<p>Hello\n   <b>bold</b>   world</p>";
        assert_eq!(extract_article_text(html).unwrap(), "Hello bold world");
    }

    #[test]
    fn inline_markup_without_spaces_is_not_split() {
        let html = "<p>Rust<b>acean</b> news</p>";
        assert_eq!(extract_article_text(html).unwrap(), "Rustacean news");
    }

    #[test]
    fn drops_empty_paragraphs() {
        let html = "<p>  </p><p>Kept</p><p></p>";
        assert_eq!(extract_article_text(html).unwrap(), "Kept");
    }

    #[test]
    fn article_without_paragraphs_yields_empty_text() {
        let html = "<article><div>No paragraphs here</div></article><p>Outside</p>";
        assert_eq!(extract_article_text(html).unwrap(), "");
    }

    #[test]
    fn page_without_paragraphs_yields_empty_text() {
        assert_eq!(extract_article_text("<html><body></body></html>").unwrap(), "");
    }

    #[tokio::test]
    async fn fetches_and_extracts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/post"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<article><p>Body text</p></article>")
                    .insert_header("Content-Type", "text/html"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HtmlArticleClient::new(&ScrapeConfig::for_testing()).unwrap();
        let article = client
            .fetch_article(&format!("{}/post", server.uri()))
            .await
            .unwrap();

        assert_eq!(article.content, "Body text");
        assert_eq!(article.provider, "html");
        assert!(!article.truncated);
        assert!(article.fetch_time_ms.is_some());
    }

    #[tokio::test]
    async fn truncates_to_max_chars() {
        let server = MockServer::start().await;
        let long = "word ".repeat(100);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("<p>{long}</p>")))
            .mount(&server)
            .await;

        let config = ScrapeConfig {
            max_article_chars: 20,
            ..ScrapeConfig::for_testing()
        };
        let client = HtmlArticleClient::new(&config).unwrap();
        let article = client.fetch_article(&server.uri()).await.unwrap();

        assert_eq!(article.content.chars().count(), 20);
        assert!(article.truncated);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = HtmlArticleClient::new(&ScrapeConfig::for_testing()).unwrap();
        let result = client.fetch_article(&server.uri()).await;

        assert!(matches!(result, Err(ScrapeError::HttpStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_without_request() {
        let client = HtmlArticleClient::new(&ScrapeConfig::for_testing()).unwrap();
        let result = client.fetch_article("not a url").await;
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }
}
