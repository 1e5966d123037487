//! OpenAI Speech Provider
//!
//! Implements `TextToSpeech` using the OpenAI `/audio/speech` endpoint.
//! Text longer than `max_input_chars` is sent in several requests and the
//! resulting segments are concatenated.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::spool::collect_body;
use crate::text::split_for_synthesis;
use crate::types::AudioData;

/// OpenAI text-to-speech provider
#[derive(Clone)]
pub struct OpenAISpeechProvider {
    client: Client,
    api_key: String,
    config: SpeechConfig,
}

impl std::fmt::Debug for OpenAISpeechProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAISpeechProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpenAISpeechProvider {
    /// Create a new OpenAI speech provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid
    /// or carries no API key.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let api_key = config
            .openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                SpeechError::Configuration("OpenAI API key is required".to_string())
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

    fn tts_url(&self) -> String {
        format!(
            "{}/audio/speech",
            self.config.openai_base_url.trim_end_matches('/')
        )
    }

    async fn synthesize_segment(
        &self,
        text: &str,
        voice: &str,
        response_format: &str,
    ) -> Result<Vec<u8>, SpeechError> {
        let request = TtsRequest {
            model: &self.config.tts_model,
            input: text,
            voice,
            response_format: Some(response_format),
            instructions: self.config.instructions.as_deref(),
        };

        let response = self
            .client
            .post(self.tts_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SpeechError::from_request(&e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.map_error(status, &error_body, voice));
        }

        collect_body(response, self.config.spool_dir.as_deref()).await
    }

    fn map_error(&self, status: StatusCode, body: &str, voice: &str) -> SpeechError {
        let api_error = serde_json::from_str::<ApiError>(body).ok();

        if let Some(api_error) = &api_error {
            match api_error.error.code.as_deref() {
                Some("rate_limit_exceeded") => return SpeechError::RateLimited,
                Some("model_not_found") => {
                    return SpeechError::ModelNotAvailable(self.config.tts_model.clone());
                },
                Some("invalid_voice") => return SpeechError::VoiceNotFound(voice.to_string()),
                _ => {},
            }
        }

        let message =
            api_error.map_or_else(|| format!("HTTP {status}: {body}"), |e| e.error.message);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SpeechError::AuthenticationFailed(message)
            },
            StatusCode::TOO_MANY_REQUESTS => SpeechError::RateLimited,
            s if s.is_server_error() => SpeechError::ServiceUnavailable(message),
            _ => SpeechError::SynthesisFailed(message),
        }
    }
}

/// OpenAI TTS request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    code: Option<String>,
}

#[async_trait]
impl TextToSpeech for OpenAISpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError> {
        let format = self.config.output_format;
        let chunks = split_for_synthesis(text, self.config.max_input_chars);

        if chunks.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let voice = voice.unwrap_or(&self.config.default_voice);
        let response_format = format.as_str();
        debug!(segments = chunks.len(), voice, "Synthesizing speech with OpenAI TTS");

        let mut audio = Vec::new();
        for chunk in chunks {
            let segment = self.synthesize_segment(chunk, voice, response_format).await?;
            audio.extend_from_slice(&segment);
        }

        if audio.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Provider returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio.len(), "Speech synthesis complete");
        Ok(AudioData::new(audio, format))
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model
    }

    fn default_voice(&self) -> &str {
        &self.config.default_voice
    }
}
