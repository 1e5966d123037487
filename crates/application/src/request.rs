//! Pipeline input and per-request credentials

use domain::{ScriptBudget, VoiceSelection};
use secrecy::SecretString;

/// API keys supplied with one request
///
/// Keys that are blank after trimming are treated as absent. Nothing here is
/// stored beyond the request that carries it.
#[derive(Debug, Default)]
pub struct Credentials {
    primary: Option<SecretString>,
    rich_scrape: Option<SecretString>,
    premium_voice: Option<SecretString>,
}

fn non_blank(key: Option<String>) -> Option<SecretString> {
    key.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .map(SecretString::from)
}

impl Credentials {
    /// Credentials with only the language-model key
    pub fn new(primary: impl Into<String>) -> Self {
        Self::from_keys(Some(primary.into()), None, None)
    }

    /// Credentials from optional raw keys
    pub fn from_keys(
        primary: Option<String>,
        rich_scrape: Option<String>,
        premium_voice: Option<String>,
    ) -> Self {
        Self {
            primary: non_blank(primary),
            rich_scrape: non_blank(rich_scrape),
            premium_voice: non_blank(premium_voice),
        }
    }

    /// Add a rich-scraping key
    #[must_use]
    pub fn with_rich_scrape_key(mut self, key: impl Into<String>) -> Self {
        self.rich_scrape = non_blank(Some(key.into()));
        self
    }

    /// Add a premium voice key
    #[must_use]
    pub fn with_premium_voice_key(mut self, key: impl Into<String>) -> Self {
        self.premium_voice = non_blank(Some(key.into()));
        self
    }

    /// Language-model and default speech key
    pub const fn primary(&self) -> Option<&SecretString> {
        self.primary.as_ref()
    }

    /// Rich-scraping key
    pub const fn rich_scrape(&self) -> Option<&SecretString> {
        self.rich_scrape.as_ref()
    }

    /// Premium voice key
    pub const fn premium_voice(&self) -> Option<&SecretString> {
        self.premium_voice.as_ref()
    }
}

/// One blog-to-podcast run
///
/// Manual text takes priority over the URL whenever it is non-blank.
#[derive(Debug, Default)]
pub struct PipelineRequest {
    /// Pasted article text
    pub source_text: Option<String>,
    /// Article URL
    pub source_url: Option<String>,
    /// Target script length
    pub budget: ScriptBudget,
    /// Requested voice
    pub voice: VoiceSelection,
    /// Keys for this run
    pub credentials: Credentials,
}

impl PipelineRequest {
    /// Request for pasted text
    pub fn from_text(text: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            source_text: Some(text.into()),
            credentials,
            ..Default::default()
        }
    }

    /// Request for an article URL
    pub fn from_url(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            source_url: Some(url.into()),
            credentials,
            ..Default::default()
        }
    }

    /// Set the script budget
    #[must_use]
    pub const fn with_budget(mut self, budget: ScriptBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Set the voice
    #[must_use]
    pub fn with_voice(mut self, voice: VoiceSelection) -> Self {
        self.voice = voice;
        self
    }

    /// Manual text if it is non-blank, trimmed
    pub fn manual_text(&self) -> Option<&str> {
        self.source_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// URL if it is non-blank, trimmed
    pub fn url(&self) -> Option<&str> {
        self.source_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}
