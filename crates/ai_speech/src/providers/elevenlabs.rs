//! ElevenLabs Speech Provider
//!
//! Premium voices through `POST /text-to-speech/{voice_id}`. Catalog voice
//! names are mapped to provider voice ids by [`ElevenLabsConfig`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::ElevenLabsConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::spool::collect_body;
use crate::text::split_for_synthesis;
use crate::types::{AudioData, AudioFormat};

/// ElevenLabs text-to-speech provider
#[derive(Clone)]
pub struct ElevenLabsProvider {
    client: Client,
    api_key: String,
    config: ElevenLabsConfig,
}

impl std::fmt::Debug for ElevenLabsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl ElevenLabsProvider {
    /// Create a new ElevenLabs provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid
    /// or carries no API key.
    pub fn new(config: ElevenLabsConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                SpeechError::Configuration("ElevenLabs API key is required".to_string())
            })?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    fn tts_url(&self, voice_id: &str) -> String {
        format!(
            "{}/text-to-speech/{voice_id}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn synthesize_segment(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechError> {
        let voice_id = self.config.resolve_voice_id(voice);
        let request = ElevenLabsRequest {
            text,
            model_id: &self.config.model_id,
        };

        let response = self
            .client
            .post(self.tts_url(voice_id))
            .query(&[("output_format", self.config.output_format.as_str())])
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&request)
            .send()
            .await
            .map_err(|e| SpeechError::from_request(&e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error(status, &body, voice));
        }

        collect_body(response, self.config.spool_dir.as_deref()).await
    }
}

/// Pull a readable message out of an ElevenLabs error body
///
/// The API reports `{"detail": {"status": .., "message": ..}}` or
/// `{"detail": "..."}`.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let detail = value.get("detail")?;
    detail
        .get("message")
        .and_then(serde_json::Value::as_str)
        .or_else(|| detail.as_str())
        .map(ToString::to_string)
}

fn map_error(status: StatusCode, body: &str, voice: &str) -> SpeechError {
    let message = error_detail(body).unwrap_or_else(|| format!("HTTP {status}: {body}"));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SpeechError::AuthenticationFailed(message)
        },
        StatusCode::TOO_MANY_REQUESTS => SpeechError::RateLimited,
        StatusCode::NOT_FOUND => SpeechError::VoiceNotFound(voice.to_string()),
        s if s.is_server_error() => SpeechError::ServiceUnavailable(message),
        _ => SpeechError::SynthesisFailed(message),
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError> {
        let chunks = split_for_synthesis(text, self.config.max_input_chars);
        if chunks.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let voice = voice.unwrap_or(&self.config.default_voice);
        debug!(segments = chunks.len(), voice, "Synthesizing speech with ElevenLabs");

        let mut audio = Vec::new();
        for chunk in chunks {
            audio.extend_from_slice(&self.synthesize_segment(chunk, voice).await?);
        }

        if audio.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Provider returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio.len(), "Speech synthesis complete");
        Ok(AudioData::new(audio, AudioFormat::Mp3))
    }

    fn provider_name(&self) -> &str {
        "elevenlabs"
    }

    fn model_name(&self) -> &str {
        &self.config.model_id
    }

    fn default_voice(&self) -> &str {
        &self.config.default_voice
    }
}
