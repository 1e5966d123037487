//! Podcast pipeline - Source resolution, script, then audio
//!
//! Stages run strictly in order and each one is bounded by its own timeout.
//! Optional providers get a shorter budget of their own inside the fetch
//! and synthesis stages, so a stalled one still leaves time for fallback.
//! Providers are built per request from the request's credentials, so no
//! key outlives the run that carried it.

use std::{fmt, sync::Arc, time::Duration};

use chrono::Utc;
use domain::{ArticleText, RunId, SourceUrl};
use serde::{Deserialize, Serialize};
use tracing::{Instrument, info, info_span};

use crate::{
    error::{ApplicationError, PipelineError},
    outcome::PipelineResult,
    ports::ProviderFactoryPort,
    request::PipelineRequest,
    services::{
        ContentFetcher, ScriptGenerator, SpeechSynthesizer,
        limits::{StageLimits, within},
    },
};

/// Per-stage time limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Limit for the basic article fetch
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Limit for the rich scrape attempt that precedes the basic fetch
    #[serde(default = "default_rich_fetch_timeout")]
    pub rich_fetch_timeout_secs: u64,

    /// Limit for the script model call
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,

    /// Limit for default-voice synthesis
    #[serde(default = "default_synthesis_timeout")]
    pub synthesis_timeout_secs: u64,

    /// Limit for the premium voice attempt that precedes default synthesis
    #[serde(default = "default_premium_synthesis_timeout")]
    pub premium_synthesis_timeout_secs: u64,
}

const fn default_fetch_timeout() -> u64 {
    60
}

const fn default_rich_fetch_timeout() -> u64 {
    30
}

const fn default_generation_timeout() -> u64 {
    120
}

const fn default_synthesis_timeout() -> u64 {
    180
}

const fn default_premium_synthesis_timeout() -> u64 {
    120
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout(),
            rich_fetch_timeout_secs: default_rich_fetch_timeout(),
            generation_timeout_secs: default_generation_timeout(),
            synthesis_timeout_secs: default_synthesis_timeout(),
            premium_synthesis_timeout_secs: default_premium_synthesis_timeout(),
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, secs) in [
            ("fetch_timeout_secs", self.fetch_timeout_secs),
            ("rich_fetch_timeout_secs", self.rich_fetch_timeout_secs),
            ("generation_timeout_secs", self.generation_timeout_secs),
            ("synthesis_timeout_secs", self.synthesis_timeout_secs),
            ("premium_synthesis_timeout_secs", self.premium_synthesis_timeout_secs),
        ] {
            if secs == 0 {
                return Err(format!("{name} must be greater than 0"));
            }
        }

        for (optional, optional_secs, stage, stage_secs) in [
            (
                "rich_fetch_timeout_secs",
                self.rich_fetch_timeout_secs,
                "fetch_timeout_secs",
                self.fetch_timeout_secs,
            ),
            (
                "premium_synthesis_timeout_secs",
                self.premium_synthesis_timeout_secs,
                "synthesis_timeout_secs",
                self.synthesis_timeout_secs,
            ),
        ] {
            if optional_secs >= stage_secs {
                return Err(format!("{optional} must be less than {stage}"));
            }
        }
        Ok(())
    }

    /// Limits for the rich and basic fetch attempts
    pub const fn fetch_limits(&self) -> StageLimits {
        StageLimits::from_secs(self.rich_fetch_timeout_secs, self.fetch_timeout_secs)
    }

    /// Limits for the premium and default synthesis attempts
    pub const fn synthesis_limits(&self) -> StageLimits {
        StageLimits::from_secs(self.premium_synthesis_timeout_secs, self.synthesis_timeout_secs)
    }
}

enum Source {
    Manual(ArticleText),
    Url(SourceUrl),
}

/// Orchestrates one blog-to-podcast run
pub struct PodcastPipeline {
    factory: Arc<dyn ProviderFactoryPort>,
    config: PipelineConfig,
}

impl fmt::Debug for PodcastPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PodcastPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PodcastPipeline {
    /// Create a pipeline with default timeouts
    pub fn new(factory: Arc<dyn ProviderFactoryPort>) -> Self {
        Self::with_config(factory, PipelineConfig::default())
    }

    /// Create a pipeline with custom timeouts
    pub fn with_config(factory: Arc<dyn ProviderFactoryPort>, config: PipelineConfig) -> Self {
        Self { factory, config }
    }

    /// Current configuration
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline for one request
    ///
    /// Input problems are reported before any provider is contacted.
    /// Dropping the returned future cancels the stage in flight.
    pub async fn run(&self, request: PipelineRequest) -> Result<PipelineResult, PipelineError> {
        let run_id = RunId::new();
        self.run_stages(run_id, request)
            .instrument(info_span!("pipeline_run", run_id = %run_id))
            .await
    }

    async fn run_stages(
        &self,
        run_id: RunId,
        request: PipelineRequest,
    ) -> Result<PipelineResult, PipelineError> {
        let source = match (request.manual_text(), request.url()) {
            (Some(text), _) => Source::Manual(ArticleText::manual(text)),
            (None, Some(url)) => Source::Url(SourceUrl::parse(url)?),
            (None, None) => {
                return Err(PipelineError::Input(
                    "Provide article text or a blog URL".to_string(),
                ));
            },
        };

        let credentials = &request.credentials;
        if credentials.primary().is_none() {
            return Err(PipelineError::Input(
                "An OpenAI API key is required".to_string(),
            ));
        }

        let writer = self
            .factory
            .script_writer(credentials)
            .map_err(|e| PipelineError::Configuration(e.to_string()))?;
        let default_speech = self
            .factory
            .default_speech(credentials)
            .map_err(|e| PipelineError::Configuration(e.to_string()))?;

        let mut warnings = Vec::new();

        let article = match source {
            Source::Manual(article) => {
                info!(chars = article.char_count(), "Using manual article text");
                article
            },
            Source::Url(url) => {
                let fetcher = ContentFetcher::new(
                    self.factory.rich_article_source(credentials),
                    self.factory.basic_article_source(),
                )
                .with_limits(self.config.fetch_limits());
                let outcome = fetcher.fetch(&url).await.map_err(PipelineError::Fetch)?;
                warnings.extend(outcome.warnings);
                outcome.value
            },
        };

        if article.is_empty() {
            return Err(PipelineError::EmptyContent);
        }

        let generator = ScriptGenerator::new(writer);
        let script = within(
            Duration::from_secs(self.config.generation_timeout_secs),
            generator.generate(&article, request.budget),
        )
        .await
        .map_err(PipelineError::Generation)?;

        let synthesizer =
            SpeechSynthesizer::new(self.factory.premium_speech(credentials), default_speech)
                .with_limits(self.config.synthesis_limits());
        let synthesis = synthesizer
            .synthesize(&script, &request.voice)
            .await
            .map_err(PipelineError::Synthesis)?;
        warnings.extend(synthesis.warnings);

        info!(
            engine = %synthesis.value.engine,
            voice = %synthesis.value.voice,
            audio_bytes = synthesis.value.size_bytes(),
            warnings = warnings.len(),
            "Podcast generated"
        );

        Ok(PipelineResult {
            run_id,
            script,
            synthesis: synthesis.value,
            article_origin: article.origin(),
            warnings,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::PipelineStage;
    use crate::ports::{
        ArticleSourcePort, InferenceResult, MockArticleSourcePort, MockInferencePort,
        MockProviderFactoryPort, MockSpeechPort, SpeechPort,
    };
    use crate::request::Credentials;
    use async_trait::async_trait;
    use domain::{ArticleOrigin, ScriptBudget, SynthesisEngine, VoiceSelection};
    use mockall::predicate::{always, eq};

    fn writer(content: String) -> Arc<dyn crate::ports::InferencePort> {
        let mut writer = MockInferencePort::new();
        writer
            .expect_current_model()
            .returning(|| "gpt-4o-mini".to_string());
        writer.expect_generate_with_system().returning(move |_, _| {
            Ok(InferenceResult {
                content: content.clone(),
                model: "gpt-4o-mini".to_string(),
                tokens_used: None,
                latency_ms: 1,
            })
        });
        Arc::new(writer)
    }

    fn default_speech(expected_voice: &'static str) -> Arc<dyn SpeechPort> {
        let mut port = MockSpeechPort::new();
        port.expect_provider_name()
            .returning(|| "OpenAI TTS".to_string());
        port.expect_engine().returning(|| SynthesisEngine::Default);
        port.expect_synthesize()
            .with(always(), eq(expected_voice))
            .times(1)
            .returning(|_, _| Ok(vec![0xFF, 0xFB]));
        Arc::new(port)
    }

    fn basic_source(text: &'static str) -> Arc<dyn ArticleSourcePort> {
        let mut source = MockArticleSourcePort::new();
        source
            .expect_source_name()
            .returning(|| "basic HTML fetch".to_string());
        source.expect_origin().returning(|| ArticleOrigin::BasicScrape);
        source
            .expect_fetch_article()
            .times(1)
            .returning(move |_| Ok(text.to_string()));
        Arc::new(source)
    }

    #[derive(Default)]
    struct Strategies {
        rich: Option<Arc<dyn ArticleSourcePort>>,
        basic: Option<Arc<dyn ArticleSourcePort>>,
        premium: Option<Arc<dyn SpeechPort>>,
    }

    fn factory(
        script: String,
        speech: Arc<dyn SpeechPort>,
        strategies: Strategies,
    ) -> MockProviderFactoryPort {
        let Strategies {
            rich,
            basic,
            premium,
        } = strategies;
        let mut factory = MockProviderFactoryPort::new();
        let script_writer = writer(script);
        factory
            .expect_script_writer()
            .returning(move |_| Ok(script_writer.clone()));
        factory
            .expect_default_speech()
            .returning(move |_| Ok(speech.clone()));
        factory
            .expect_premium_speech()
            .returning(move |_| premium.clone());
        factory
            .expect_rich_article_source()
            .returning(move |_| rich.clone());
        match basic {
            Some(basic) => {
                factory
                    .expect_basic_article_source()
                    .returning(move || basic.clone());
            },
            None => {
                factory.expect_basic_article_source().never();
            },
        }
        factory
    }

    fn credentials() -> Credentials {
        Credentials::new("sk-test")
    }

    #[tokio::test]
    async fn url_without_optional_keys_uses_basic_fetch_and_default_voice() {
        let factory = factory(
            "Welcome! ".repeat(400),
            default_speech("alloy"),
            Strategies {
                basic: Some(basic_source("First paragraph.\n\nSecond paragraph.")),
                ..Default::default()
            },
        );
        let pipeline = PodcastPipeline::new(Arc::new(factory));
        let budget = ScriptBudget::new(1000).unwrap();

        let request = PipelineRequest::from_url("https://example.com/post", credentials())
            .with_budget(budget)
            .with_voice(VoiceSelection::parse("alloy").unwrap());
        let result = pipeline.run(request).await.unwrap();

        assert_eq!(result.article_origin, ArticleOrigin::BasicScrape);
        assert!(result.script.char_count() <= 1200);
        assert_eq!(result.synthesis.engine, SynthesisEngine::Default);
        assert_eq!(result.synthesis.voice, "alloy");
        assert!(result.warnings.is_empty());
    }

    #[tokio::test]
    async fn manual_text_with_failing_premium_voice_falls_back_to_coral() {
        let mut premium = MockSpeechPort::new();
        premium
            .expect_provider_name()
            .returning(|| "ElevenLabs".to_string());
        premium.expect_engine().returning(|| SynthesisEngine::Premium);
        premium
            .expect_synthesize()
            .with(always(), eq("Rachel"))
            .returning(|_, _| Err(ApplicationError::ExternalService("boom".into())));
        let premium: Arc<dyn SpeechPort> = Arc::new(premium);

        let factory = factory(
            "A short script.".to_string(),
            default_speech("coral"),
            Strategies {
                premium: Some(premium),
                ..Default::default()
            },
        );

        let pipeline = PodcastPipeline::new(Arc::new(factory));
        let request = PipelineRequest::from_text(
            "Hello world",
            credentials().with_premium_voice_key("el-key"),
        )
        .with_voice(VoiceSelection::parse("Rachel").unwrap());

        let result = pipeline.run(request).await.unwrap();

        assert_eq!(result.article_origin, ArticleOrigin::Manual);
        assert_eq!(result.synthesis.engine, SynthesisEngine::Default);
        assert_eq!(result.synthesis.voice, "coral");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].stage, PipelineStage::Synthesis);
    }

    #[tokio::test]
    async fn empty_sources_fail_before_any_provider_is_built() {
        let mut factory = MockProviderFactoryPort::new();
        factory.expect_script_writer().never();
        factory.expect_default_speech().never();
        factory.expect_basic_article_source().never();

        let pipeline = PodcastPipeline::new(Arc::new(factory));
        let request = PipelineRequest {
            source_text: Some("   ".to_string()),
            source_url: Some(String::new()),
            credentials: credentials(),
            ..Default::default()
        };

        let err = pipeline.run(request).await.unwrap_err();

        assert!(matches!(err, PipelineError::Input(_)));
        assert_eq!(err.stage(), Some(PipelineStage::Input));
    }

    #[tokio::test]
    async fn missing_primary_key_is_an_input_error() {
        let mut factory = MockProviderFactoryPort::new();
        factory.expect_script_writer().never();

        let pipeline = PodcastPipeline::new(Arc::new(factory));
        let request = PipelineRequest::from_text("Hello world", Credentials::default());

        let err = pipeline.run(request).await.unwrap_err();

        assert!(matches!(err, PipelineError::Input(ref m) if m.contains("API key")));
    }

    #[tokio::test]
    async fn invalid_url_is_an_input_error() {
        let factory = MockProviderFactoryPort::new();
        let pipeline = PodcastPipeline::new(Arc::new(factory));

        let request = PipelineRequest::from_url("ftp://example.com/post", credentials());
        let err = pipeline.run(request).await.unwrap_err();

        assert!(matches!(err, PipelineError::Input(_)));
    }

    #[tokio::test]
    async fn manual_text_takes_priority_over_url() {
        let factory = factory(
            "Script.".to_string(),
            default_speech("coral"),
            Strategies::default(),
        );
        let pipeline = PodcastPipeline::new(Arc::new(factory));

        let mut request = PipelineRequest::from_text("Pasted text", credentials());
        request.source_url = Some("https://example.com/post".to_string());

        let result = pipeline.run(request).await.unwrap();

        assert_eq!(result.article_origin, ArticleOrigin::Manual);
    }

    #[tokio::test]
    async fn rich_failure_does_not_block_the_run() {
        let mut rich = MockArticleSourcePort::new();
        rich.expect_source_name()
            .returning(|| "Firecrawl".to_string());
        rich.expect_origin().returning(|| ArticleOrigin::RichScrape);
        rich.expect_fetch_article()
            .returning(|_| Err(ApplicationError::NotAuthorized("bad key".into())));
        let rich: Arc<dyn ArticleSourcePort> = Arc::new(rich);

        let factory = factory(
            "Script.".to_string(),
            default_speech("coral"),
            Strategies {
                rich: Some(rich),
                basic: Some(basic_source("Fallback text.")),
                ..Default::default()
            },
        );

        let pipeline = PodcastPipeline::new(Arc::new(factory));
        let request = PipelineRequest::from_url(
            "https://example.com/post",
            credentials().with_rich_scrape_key("fc-key"),
        );

        let result = pipeline.run(request).await.unwrap();

        assert_eq!(result.article_origin, ArticleOrigin::BasicScrape);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].stage, PipelineStage::Fetch);
    }

    #[tokio::test]
    async fn empty_article_is_empty_content_error() {
        let mut factory = MockProviderFactoryPort::new();
        factory
            .expect_script_writer()
            .returning(|_| Ok(writer(String::new())));
        factory.expect_default_speech().returning(|_| {
            let mut port = MockSpeechPort::new();
            port.expect_synthesize().never();
            Ok(Arc::new(port) as Arc<dyn SpeechPort>)
        });
        factory.expect_rich_article_source().returning(|_| None);
        let basic = basic_source("");
        factory
            .expect_basic_article_source()
            .returning(move || basic.clone());

        let pipeline = PodcastPipeline::new(Arc::new(factory));
        let request = PipelineRequest::from_url("https://example.com/empty", credentials());

        let err = pipeline.run(request).await.unwrap_err();

        assert!(matches!(err, PipelineError::EmptyContent));
    }

    #[tokio::test]
    async fn generation_failure_stops_before_synthesis() {
        let mut factory = MockProviderFactoryPort::new();
        factory.expect_script_writer().returning(|_| {
            let mut writer = MockInferencePort::new();
            writer
                .expect_current_model()
                .returning(|| "gpt-4o-mini".to_string());
            writer
                .expect_generate_with_system()
                .returning(|_, _| Err(ApplicationError::RateLimited));
            Ok(Arc::new(writer) as Arc<dyn crate::ports::InferencePort>)
        });
        factory.expect_default_speech().returning(|_| {
            let mut port = MockSpeechPort::new();
            port.expect_synthesize().never();
            Ok(Arc::new(port) as Arc<dyn SpeechPort>)
        });
        factory.expect_premium_speech().never();

        let pipeline = PodcastPipeline::new(Arc::new(factory));
        let request = PipelineRequest::from_text("Hello world", credentials());

        let err = pipeline.run(request).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Generation(ApplicationError::RateLimited)
        ));
        assert_eq!(err.stage(), Some(PipelineStage::Generation));
    }

    #[tokio::test]
    async fn factory_failure_is_configuration_error() {
        let mut factory = MockProviderFactoryPort::new();
        factory
            .expect_script_writer()
            .returning(|_| Err(ApplicationError::Configuration("bad base url".into())));

        let pipeline = PodcastPipeline::new(Arc::new(factory));
        let request = PipelineRequest::from_text("Hello world", credentials());

        let err = pipeline.run(request).await.unwrap_err();

        assert!(matches!(err, PipelineError::Configuration(_)));
        assert_eq!(err.stage(), None);
    }

    struct HangingSource(ArticleOrigin);

    #[async_trait]
    impl ArticleSourcePort for HangingSource {
        async fn fetch_article(&self, _url: &str) -> Result<String, ApplicationError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("too late".to_string())
        }

        fn source_name(&self) -> String {
            "hanging".to_string()
        }

        fn origin(&self) -> ArticleOrigin {
            self.0
        }
    }

    #[tokio::test]
    async fn hanging_fetch_times_out() {
        let mut factory = MockProviderFactoryPort::new();
        factory
            .expect_script_writer()
            .returning(|_| Ok(writer(String::new())));
        factory.expect_default_speech().returning(|_| {
            Ok(Arc::new(MockSpeechPort::new()) as Arc<dyn SpeechPort>)
        });
        factory.expect_rich_article_source().returning(|_| None);
        factory
            .expect_basic_article_source()
            .returning(|| Arc::new(HangingSource(ArticleOrigin::BasicScrape)));

        let config = PipelineConfig {
            fetch_timeout_secs: 1,
            ..Default::default()
        };
        let pipeline = PodcastPipeline::with_config(Arc::new(factory), config);
        let request = PipelineRequest::from_url("https://example.com/slow", credentials());

        let err = pipeline.run(request).await.unwrap_err();

        assert!(matches!(err, PipelineError::Fetch(ApplicationError::Timeout(1))));
    }

    #[tokio::test]
    async fn hanging_rich_source_leaves_time_for_basic_fetch() {
        let rich: Arc<dyn ArticleSourcePort> = Arc::new(HangingSource(ArticleOrigin::RichScrape));
        let factory = factory(
            "Script.".to_string(),
            default_speech("coral"),
            Strategies {
                rich: Some(rich),
                basic: Some(basic_source("Basic text.")),
                ..Default::default()
            },
        );

        let config = PipelineConfig {
            fetch_timeout_secs: 5,
            rich_fetch_timeout_secs: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let pipeline = PodcastPipeline::with_config(Arc::new(factory), config);
        let request = PipelineRequest::from_url(
            "https://example.com/post",
            credentials().with_rich_scrape_key("fc-key"),
        );

        let result = pipeline.run(request).await.unwrap();

        assert_eq!(result.article_origin, ArticleOrigin::BasicScrape);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].stage, PipelineStage::Fetch);
        assert!(result.warnings[0].message.contains("Timed out after 1s"));
    }

    #[test]
    fn config_defaults_and_validation() {
        let config = PipelineConfig::default();
        assert_eq!(config.fetch_timeout_secs, 60);
        assert_eq!(config.rich_fetch_timeout_secs, 30);
        assert_eq!(config.generation_timeout_secs, 120);
        assert_eq!(config.synthesis_timeout_secs, 180);
        assert_eq!(config.premium_synthesis_timeout_secs, 120);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.fetch_limits(),
            StageLimits::from_secs(30, 60)
        );
        assert_eq!(
            config.synthesis_limits(),
            StageLimits::from_secs(120, 180)
        );

        let broken = PipelineConfig {
            synthesis_timeout_secs: 0,
            ..Default::default()
        };
        assert!(broken.validate().is_err());
    }

    #[test]
    fn optional_budget_must_be_below_its_stage() {
        let rich_too_long = PipelineConfig {
            rich_fetch_timeout_secs: 60,
            ..Default::default()
        };
        let err = rich_too_long.validate().unwrap_err();
        assert!(err.contains("rich_fetch_timeout_secs"));

        let premium_too_long = PipelineConfig {
            synthesis_timeout_secs: 90,
            ..Default::default()
        };
        let err = premium_too_long.validate().unwrap_err();
        assert!(err.contains("premium_synthesis_timeout_secs"));
    }

    #[test]
    fn config_from_toml_keeps_defaults() {
        let config: PipelineConfig = toml::from_str("fetch_timeout_secs = 15").unwrap();
        assert_eq!(config.fetch_timeout_secs, 15);
        assert_eq!(config.synthesis_timeout_secs, 180);
    }
}
