//! Provider factory - Builds per-request strategies from configuration and keys
//!
//! Keys never live in [`AppConfig`]; each request carries its own
//! [`Credentials`], which are copied into a cloned provider configuration
//! only for as long as it takes to build the client.

use std::sync::Arc;

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use application::{
    error::ApplicationError,
    ports::{ArticleSourcePort, InferencePort, ProviderFactoryPort, SpeechPort},
    request::Credentials,
};
use secrecy::ExposeSecret;
use tracing::{debug, warn};

use super::{
    ArticleSourceAdapter, InferenceAdapter, SpeechAdapter, UnavailableArticleSource,
    UnavailableSpeech,
};
use crate::config::AppConfig;

/// Builds adapters for one pipeline run
pub struct ProviderFactory {
    config: AppConfig,
    basic_source: Arc<dyn ArticleSourcePort>,
}

impl std::fmt::Debug for ProviderFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderFactory")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ProviderFactory {
    /// Create a factory from application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the basic HTML fetcher can not be built.
    pub fn new(config: AppConfig) -> Result<Self, ApplicationError> {
        let basic_source: Arc<dyn ArticleSourcePort> =
            Arc::new(ArticleSourceAdapter::basic(&config.scrape)?);

        Ok(Self {
            config,
            basic_source,
        })
    }

    /// Configuration the factory builds from
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    fn inference_config(&self, key: &str) -> InferenceConfig {
        let mut config = self.config.inference.clone();
        config.api_key = Some(key.to_string());
        config
    }

    fn speech_config(&self, key: &str) -> SpeechConfig {
        let mut config = self.config.speech.clone();
        config.openai_api_key = Some(key.to_string());
        config
    }

    #[cfg(feature = "firecrawl")]
    fn build_rich_source(&self, key: &str) -> Arc<dyn ArticleSourcePort> {
        let config = self.config.scrape.clone().with_firecrawl_key(key);
        match ArticleSourceAdapter::firecrawl(&config) {
            Ok(adapter) => Arc::new(adapter),
            Err(e) => {
                warn!(error = %e, "Firecrawl client could not be built");
                Arc::new(UnavailableArticleSource::new(
                    ArticleSourceAdapter::FIRECRAWL_NAME,
                    format!("Firecrawl client could not be built: {e}"),
                ))
            },
        }
    }

    #[cfg(not(feature = "firecrawl"))]
    fn build_rich_source(&self, _key: &str) -> Arc<dyn ArticleSourcePort> {
        Arc::new(UnavailableArticleSource::new(
            ArticleSourceAdapter::FIRECRAWL_NAME,
            "Firecrawl support is not compiled into this build",
        ))
    }

    #[cfg(feature = "elevenlabs")]
    fn build_premium_speech(&self, key: &str) -> Arc<dyn SpeechPort> {
        let config = self.config.elevenlabs.clone().with_api_key(key);
        match SpeechAdapter::elevenlabs(config) {
            Ok(adapter) => Arc::new(adapter),
            Err(e) => {
                warn!(error = %e, "ElevenLabs client could not be built");
                Arc::new(UnavailableSpeech::new(
                    SpeechAdapter::ELEVENLABS_NAME,
                    format!("ElevenLabs client could not be built: {e}"),
                ))
            },
        }
    }

    #[cfg(not(feature = "elevenlabs"))]
    fn build_premium_speech(&self, _key: &str) -> Arc<dyn SpeechPort> {
        Arc::new(UnavailableSpeech::new(
            SpeechAdapter::ELEVENLABS_NAME,
            "ElevenLabs support is not compiled into this build",
        ))
    }
}

fn primary_key(credentials: &Credentials) -> Result<&str, ApplicationError> {
    credentials
        .primary()
        .map(|key| key.expose_secret())
        .ok_or_else(|| ApplicationError::Configuration("OpenAI API key is missing".to_string()))
}

impl ProviderFactoryPort for ProviderFactory {
    fn rich_article_source(
        &self,
        credentials: &Credentials,
    ) -> Option<Arc<dyn ArticleSourcePort>> {
        let key = credentials.rich_scrape()?;
        debug!("Rich article source enabled for this run");
        Some(self.build_rich_source(key.expose_secret()))
    }

    fn basic_article_source(&self) -> Arc<dyn ArticleSourcePort> {
        Arc::clone(&self.basic_source)
    }

    fn script_writer(
        &self,
        credentials: &Credentials,
    ) -> Result<Arc<dyn InferencePort>, ApplicationError> {
        let key = primary_key(credentials)?;
        let adapter = InferenceAdapter::openai(self.inference_config(key))?;
        Ok(Arc::new(adapter))
    }

    fn premium_speech(&self, credentials: &Credentials) -> Option<Arc<dyn SpeechPort>> {
        let key = credentials.premium_voice()?;
        debug!("Premium speech enabled for this run");
        Some(self.build_premium_speech(key.expose_secret()))
    }

    fn default_speech(
        &self,
        credentials: &Credentials,
    ) -> Result<Arc<dyn SpeechPort>, ApplicationError> {
        let key = primary_key(credentials)?;
        let adapter = SpeechAdapter::openai(self.speech_config(key))?;
        Ok(Arc::new(adapter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{ArticleOrigin, SynthesisEngine};

    fn factory() -> ProviderFactory {
        ProviderFactory::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn no_optional_keys_means_no_optional_strategies() {
        let factory = factory();
        let credentials = Credentials::new("sk-test");

        assert!(factory.rich_article_source(&credentials).is_none());
        assert!(factory.premium_speech(&credentials).is_none());
    }

    #[test]
    fn basic_source_is_shared() {
        let factory = factory();
        let a = factory.basic_article_source();
        let b = factory.basic_article_source();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.origin(), ArticleOrigin::BasicScrape);
    }

    #[test]
    fn rich_source_is_built_when_key_present() {
        let factory = factory();
        let credentials = Credentials::new("sk-test").with_rich_scrape_key("fc-test");

        let source = factory.rich_article_source(&credentials).unwrap();

        assert_eq!(source.origin(), ArticleOrigin::RichScrape);
        assert_eq!(source.source_name(), ArticleSourceAdapter::FIRECRAWL_NAME);
    }

    #[test]
    fn premium_speech_is_built_when_key_present() {
        let factory = factory();
        let credentials = Credentials::new("sk-test").with_premium_voice_key("el-test");

        let speech = factory.premium_speech(&credentials).unwrap();

        assert_eq!(speech.engine(), SynthesisEngine::Premium);
        assert_eq!(speech.provider_name(), SpeechAdapter::ELEVENLABS_NAME);
    }

    #[cfg(not(feature = "elevenlabs"))]
    #[tokio::test]
    async fn premium_speech_without_feature_is_unavailable() {
        let factory = factory();
        let credentials = Credentials::new("sk-test").with_premium_voice_key("el-test");

        let speech = factory.premium_speech(&credentials).unwrap();
        let err = speech.synthesize("hi", "Rachel").await.unwrap_err();

        assert!(matches!(err, ApplicationError::NotAvailable(_)));
    }

    #[test]
    fn required_strategies_need_primary_key() {
        let factory = factory();
        let credentials = Credentials::default();

        assert!(matches!(
            factory.script_writer(&credentials),
            Err(ApplicationError::Configuration(_))
        ));
        assert!(matches!(
            factory.default_speech(&credentials),
            Err(ApplicationError::Configuration(_))
        ));
    }

    #[test]
    fn required_strategies_build_with_primary_key() {
        let factory = factory();
        let credentials = Credentials::new("sk-test");

        let writer = factory.script_writer(&credentials).unwrap();
        let speech = factory.default_speech(&credentials).unwrap();

        assert_eq!(writer.current_model(), "gpt-4o-mini");
        assert_eq!(speech.engine(), SynthesisEngine::Default);
    }

    #[test]
    fn debug_output_has_no_keys() {
        let factory = factory();
        let rendered = format!("{factory:?}");
        assert!(rendered.contains("ProviderFactory"));
        assert!(!rendered.contains("sk-"));
    }
}
