#![forbid(unsafe_code)]
//! Article acquisition for blogcast
//!
//! Two providers implement the common [`ArticleProvider`] trait:
//!
//! - [`FirecrawlClient`] renders a page to markdown through the Firecrawl API
//!   (requires the `firecrawl` feature and an API key).
//! - [`HtmlArticleClient`] downloads the raw page and extracts paragraph text.
//!
//! Choosing between them is left to the caller, which knows whether a
//! Firecrawl key was supplied for the current request.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_scrape::{ArticleProvider, HtmlArticleClient, ScrapeConfig};
//!
//! let client = HtmlArticleClient::new(&ScrapeConfig::default())?;
//! let article = client.fetch_article("https://example.com/post").await?;
//! println!("{} chars from {}", article.content.len(), article.provider);
//! ```

mod config;
mod error;
#[cfg(feature = "firecrawl")]
mod firecrawl;
mod html;
mod models;
mod provider;

pub use config::ScrapeConfig;
pub use error::ScrapeError;
#[cfg(feature = "firecrawl")]
pub use firecrawl::FirecrawlClient;
pub use html::{HtmlArticleClient, extract_article_text};
pub use models::ScrapedArticle;
pub use provider::ArticleProvider;

/// Whether the Firecrawl client was compiled into this build
pub const FIRECRAWL_ENABLED: bool = cfg!(feature = "firecrawl");
