//! Speech adapter - Implements SpeechPort using ai_speech

use std::sync::Arc;

#[cfg(feature = "elevenlabs")]
use ai_speech::{ElevenLabsConfig, ElevenLabsProvider};
use ai_speech::{OpenAISpeechProvider, SpeechConfig, SpeechError, TextToSpeech};
use application::{error::ApplicationError, ports::SpeechPort};
use async_trait::async_trait;
use domain::SynthesisEngine;
use tracing::{debug, instrument};

/// Adapter for text-to-speech providers
pub struct SpeechAdapter {
    provider: Arc<dyn TextToSpeech>,
    engine: SynthesisEngine,
    name: &'static str,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("name", &self.name)
            .field("engine", &self.engine)
            .field("model", &self.provider.model_name())
            .finish()
    }
}

impl SpeechAdapter {
    /// Display name of the default engine
    pub const OPENAI_NAME: &'static str = "OpenAI TTS";

    /// Display name of the premium engine
    pub const ELEVENLABS_NAME: &'static str = "ElevenLabs";

    /// Create the default-engine adapter backed by OpenAI TTS
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the configuration is
    /// invalid or carries no API key.
    pub fn openai(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let provider = OpenAISpeechProvider::new(config).map_err(Self::map_error)?;
        Ok(Self::with_provider(
            Arc::new(provider),
            SynthesisEngine::Default,
            Self::OPENAI_NAME,
        ))
    }

    /// Create the premium-engine adapter backed by ElevenLabs
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the configuration is
    /// invalid or carries no API key.
    #[cfg(feature = "elevenlabs")]
    pub fn elevenlabs(config: ElevenLabsConfig) -> Result<Self, ApplicationError> {
        let provider = ElevenLabsProvider::new(config).map_err(Self::map_error)?;
        Ok(Self::with_provider(
            Arc::new(provider),
            SynthesisEngine::Premium,
            Self::ELEVENLABS_NAME,
        ))
    }

    /// Wrap an existing provider
    pub fn with_provider(
        provider: Arc<dyn TextToSpeech>,
        engine: SynthesisEngine,
        name: &'static str,
    ) -> Self {
        Self {
            provider,
            engine,
            name,
        }
    }

    /// Map speech error to application error
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
            SpeechError::NotAvailable(e) => ApplicationError::NotAvailable(e),
            SpeechError::AuthenticationFailed(e) => ApplicationError::NotAuthorized(e),
            SpeechError::RateLimited => ApplicationError::RateLimited,
            SpeechError::Timeout(ms) => ApplicationError::Timeout(ms.div_ceil(1000)),
            SpeechError::InvalidResponse(e) => ApplicationError::InvalidResponse(e),
            SpeechError::Spool(e) => ApplicationError::Internal(format!("Audio spool: {e}")),
            SpeechError::ConnectionFailed(e)
            | SpeechError::RequestFailed(e)
            | SpeechError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            SpeechError::SynthesisFailed(e) => {
                ApplicationError::ExternalService(format!("Synthesis failed: {e}"))
            },
            SpeechError::VoiceNotFound(v) => {
                ApplicationError::ExternalService(format!("Voice not found: {v}"))
            },
            SpeechError::ModelNotAvailable(m) => {
                ApplicationError::ExternalService(format!("Model not available: {m}"))
            },
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, text), fields(provider = self.name, text_len = text.len()))]
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, ApplicationError> {
        let audio = self
            .provider
            .synthesize(text, Some(voice))
            .await
            .map_err(Self::map_error)?;

        debug!(
            format = ?audio.format(),
            size_bytes = audio.size_bytes(),
            "Speech synthesis completed"
        );

        Ok(audio.into_data())
    }

    fn engine(&self) -> SynthesisEngine {
        self.engine
    }

    fn provider_name(&self) -> String {
        self.name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_speech::{AudioData, AudioFormat};

    struct EchoTts;

    #[async_trait]
    impl TextToSpeech for EchoTts {
        async fn synthesize(
            &self,
            text: &str,
            voice: Option<&str>,
        ) -> Result<AudioData, SpeechError> {
            let voice = voice.unwrap_or("none");
            Ok(AudioData::new(
                format!("{voice}:{text}").into_bytes(),
                AudioFormat::Mp3,
            ))
        }

        fn provider_name(&self) -> &str {
            "echo"
        }

        fn model_name(&self) -> &str {
            "echo-1"
        }

        fn default_voice(&self) -> &str {
            "none"
        }
    }

    struct FailingTts;

    #[async_trait]
    impl TextToSpeech for FailingTts {
        async fn synthesize(&self, _: &str, _: Option<&str>) -> Result<AudioData, SpeechError> {
            Err(SpeechError::AuthenticationFailed("Invalid API key".to_string()))
        }

        fn provider_name(&self) -> &str {
            "failing"
        }

        fn model_name(&self) -> &str {
            "none"
        }

        fn default_voice(&self) -> &str {
            "none"
        }
    }

    #[tokio::test]
    async fn synthesize_passes_voice_through() {
        let adapter =
            SpeechAdapter::with_provider(Arc::new(EchoTts), SynthesisEngine::Default, "Echo");

        let audio = adapter.synthesize("hello", "coral").await.unwrap();

        assert_eq!(audio, b"coral:hello");
        assert_eq!(adapter.engine(), SynthesisEngine::Default);
        assert_eq!(adapter.provider_name(), "Echo");
    }

    #[tokio::test]
    async fn synthesize_maps_auth_failure() {
        let adapter =
            SpeechAdapter::with_provider(Arc::new(FailingTts), SynthesisEngine::Premium, "Fail");

        let err = adapter.synthesize("hello", "Rachel").await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotAuthorized(_)));
    }

    #[test]
    fn openai_requires_key() {
        let err = SpeechAdapter::openai(SpeechConfig::default()).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn openai_with_key_is_default_engine() {
        let adapter = SpeechAdapter::openai(SpeechConfig::default().with_api_key("sk-test"))
            .unwrap();
        assert_eq!(adapter.engine(), SynthesisEngine::Default);
        assert_eq!(adapter.provider_name(), SpeechAdapter::OPENAI_NAME);
    }

    #[cfg(feature = "elevenlabs")]
    #[test]
    fn elevenlabs_with_key_is_premium_engine() {
        let adapter =
            SpeechAdapter::elevenlabs(ElevenLabsConfig::default().with_api_key("el-test"))
                .unwrap();
        assert_eq!(adapter.engine(), SynthesisEngine::Premium);
    }

    #[test]
    fn map_error_variants() {
        assert!(matches!(
            SpeechAdapter::map_error(SpeechError::Timeout(120_000)),
            ApplicationError::Timeout(120)
        ));
        assert!(matches!(
            SpeechAdapter::map_error(SpeechError::NotAvailable("off".into())),
            ApplicationError::NotAvailable(_)
        ));
        assert!(matches!(
            SpeechAdapter::map_error(SpeechError::Spool("disk full".into())),
            ApplicationError::Internal(_)
        ));
    }
}
