//! Article text resolved from the caller's input

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::char_count;

/// Where the article text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleOrigin {
    /// Pasted by the caller
    Manual,
    /// Extracted by the rich scraping provider
    RichScrape,
    /// Extracted by the basic HTML fetcher
    BasicScrape,
}

impl fmt::Display for ArticleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manual => "manual",
            Self::RichScrape => "rich_scrape",
            Self::BasicScrape => "basic_scrape",
        })
    }
}

/// Plain article text, trimmed of surrounding whitespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleText {
    text: String,
    origin: ArticleOrigin,
}

impl ArticleText {
    /// Wrap text produced by `origin`
    pub fn new(text: impl AsRef<str>, origin: ArticleOrigin) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            origin,
        }
    }

    /// Text pasted by the caller
    pub fn manual(text: impl AsRef<str>) -> Self {
        Self::new(text, ArticleOrigin::Manual)
    }

    /// The article text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Where the text came from
    pub const fn origin(&self) -> ArticleOrigin {
        self.origin
    }

    /// True when there is nothing to summarize
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters
    pub fn char_count(&self) -> usize {
        char_count(&self.text)
    }
}
