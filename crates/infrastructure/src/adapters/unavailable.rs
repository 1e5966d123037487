//! Placeholders for strategies that can not run in this build
//!
//! A key may be supplied for a provider whose cargo feature is disabled, or
//! the provider may fail to initialize. The pipeline still gets a strategy so
//! that the attempt surfaces as a warning instead of silently vanishing.

use application::{
    error::ApplicationError,
    ports::{ArticleSourcePort, SpeechPort},
};
use async_trait::async_trait;
use domain::{ArticleOrigin, SynthesisEngine};

/// Article source that always fails with `NotAvailable`
#[derive(Debug, Clone)]
pub struct UnavailableArticleSource {
    name: String,
    reason: String,
}

impl UnavailableArticleSource {
    /// Create a placeholder for the named source
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ArticleSourcePort for UnavailableArticleSource {
    async fn fetch_article(&self, _url: &str) -> Result<String, ApplicationError> {
        Err(ApplicationError::NotAvailable(self.reason.clone()))
    }

    fn source_name(&self) -> String {
        self.name.clone()
    }

    fn origin(&self) -> ArticleOrigin {
        ArticleOrigin::RichScrape
    }
}

/// Speech engine that always fails with `NotAvailable`
#[derive(Debug, Clone)]
pub struct UnavailableSpeech {
    name: String,
    reason: String,
}

impl UnavailableSpeech {
    /// Create a placeholder for the named engine
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SpeechPort for UnavailableSpeech {
    async fn synthesize(&self, _text: &str, _voice: &str) -> Result<Vec<u8>, ApplicationError> {
        Err(ApplicationError::NotAvailable(self.reason.clone()))
    }

    fn engine(&self) -> SynthesisEngine {
        SynthesisEngine::Premium
    }

    fn provider_name(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn article_source_reports_reason() {
        let source = UnavailableArticleSource::new("Firecrawl", "not compiled in");
        let err = source.fetch_article("https://example.com").await.unwrap_err();

        assert!(matches!(err, ApplicationError::NotAvailable(_)));
        assert_eq!(source.source_name(), "Firecrawl");
        assert_eq!(source.origin(), ArticleOrigin::RichScrape);
    }

    #[tokio::test]
    async fn speech_reports_reason() {
        let speech = UnavailableSpeech::new("ElevenLabs", "not compiled in");
        let err = speech.synthesize("hi", "Rachel").await.unwrap_err();

        assert!(matches!(err, ApplicationError::NotAvailable(r) if r == "not compiled in"));
        assert_eq!(speech.engine(), SynthesisEngine::Premium);
    }
}
