//! Configuration for speech synthesis providers

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::AudioFormat;

/// Configuration for the OpenAI text-to-speech provider
#[derive(Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// OpenAI API key
    #[serde(default, skip_serializing)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL (for custom endpoints)
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Voice used when the caller does not pass one
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Output audio format
    #[serde(default = "default_output_format")]
    pub output_format: AudioFormat,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Delivery instructions for models that accept them
    #[serde(default = "default_instructions")]
    pub instructions: Option<String>,

    /// Longest input accepted by a single request, in characters
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Directory for spooling audio downloads to disk (in memory when unset)
    #[serde(default)]
    pub spool_dir: Option<PathBuf>,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_tts_model() -> String {
    "gpt-4o-mini-tts".to_string()
}

fn default_voice() -> String {
    "coral".to_string()
}

const fn default_output_format() -> AudioFormat {
    AudioFormat::Mp3
}

const fn default_timeout_ms() -> u64 {
    120_000
}

#[allow(clippy::unnecessary_wraps)]
fn default_instructions() -> Option<String> {
    Some("Speak like a warm, friendly podcast host.".to_string())
}

const fn default_max_input_chars() -> usize {
    4096
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            tts_model: default_tts_model(),
            default_voice: default_voice(),
            output_format: default_output_format(),
            timeout_ms: default_timeout_ms(),
            instructions: default_instructions(),
            max_input_chars: default_max_input_chars(),
            spool_dir: None,
        }
    }
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechConfig")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("tts_model", &self.tts_model)
            .field("default_voice", &self.default_voice)
            .field("output_format", &self.output_format)
            .field("timeout_ms", &self.timeout_ms)
            .field("instructions", &self.instructions)
            .field("max_input_chars", &self.max_input_chars)
            .field("spool_dir", &self.spool_dir)
            .finish()
    }
}

impl SpeechConfig {
    /// Create a test configuration with a dummy key
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            openai_api_key: Some("test-api-key".to_string()),
            timeout_ms: 5000,
            ..Default::default()
        }
    }

    /// Copy of this configuration carrying an API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.openai_api_key = Some(api_key.into());
        self
    }

    /// Validate the configuration
    ///
    /// The API key is not checked here; it is supplied per request.
    ///
    /// # Errors
    ///
    /// Returns an error message if any value is out of range.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_input_chars == 0 {
            return Err("max_input_chars must be greater than 0".to_string());
        }

        if self.default_voice.trim().is_empty() {
            return Err("default_voice must not be empty".to_string());
        }

        Ok(())
    }
}

/// Configuration for the ElevenLabs premium voice provider
#[derive(Clone, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    /// ElevenLabs API key
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_elevenlabs_base_url")]
    pub base_url: String,

    /// Synthesis model id
    #[serde(default = "default_elevenlabs_model")]
    pub model_id: String,

    /// Output format query parameter
    #[serde(default = "default_elevenlabs_output_format")]
    pub output_format: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Voice used when the caller does not pass one
    #[serde(default = "default_elevenlabs_voice")]
    pub default_voice: String,

    /// Longest input accepted by a single request, in characters
    #[serde(default = "default_elevenlabs_max_input_chars")]
    pub max_input_chars: usize,

    /// Voice name to provider voice id; unknown names are sent as ids
    #[serde(default = "default_voice_ids")]
    pub voice_ids: BTreeMap<String, String>,

    /// Directory for spooling audio downloads to disk (in memory when unset)
    #[serde(default)]
    pub spool_dir: Option<PathBuf>,
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_elevenlabs_output_format() -> String {
    "mp3_44100_128".to_string()
}

fn default_elevenlabs_voice() -> String {
    "Rachel".to_string()
}

const fn default_elevenlabs_max_input_chars() -> usize {
    5000
}

fn default_voice_ids() -> BTreeMap<String, String> {
    [
        ("Rachel", "21m00Tcm4TlvDq8ikWAM"),
        ("Adam", "pNInz6obpgDQGcFmaJgB"),
        ("Bella", "EXAVITQu4vr4xnSDxMaL"),
        ("Dorothy", "ThT5KcBeYPX3keUQqHPh"),
        ("James", "ZQe5CZNOzWyzPSCn5a3c"),
    ]
    .into_iter()
    .map(|(name, id)| (name.to_string(), id.to_string()))
    .collect()
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_elevenlabs_base_url(),
            model_id: default_elevenlabs_model(),
            output_format: default_elevenlabs_output_format(),
            timeout_ms: default_timeout_ms(),
            default_voice: default_elevenlabs_voice(),
            max_input_chars: default_elevenlabs_max_input_chars(),
            voice_ids: default_voice_ids(),
            spool_dir: None,
        }
    }
}

impl std::fmt::Debug for ElevenLabsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model_id", &self.model_id)
            .field("output_format", &self.output_format)
            .field("timeout_ms", &self.timeout_ms)
            .field("default_voice", &self.default_voice)
            .field("max_input_chars", &self.max_input_chars)
            .field("voice_ids", &self.voice_ids.len())
            .field("spool_dir", &self.spool_dir)
            .finish()
    }
}

impl ElevenLabsConfig {
    /// Copy of this configuration carrying an API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Provider voice id for a catalog voice name
    #[must_use]
    pub fn resolve_voice_id<'a>(&'a self, voice: &'a str) -> &'a str {
        self.voice_ids.get(voice).map_or(voice, String::as_str)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if any value is out of range.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        if self.max_input_chars == 0 {
            return Err("max_input_chars must be greater than 0".to_string());
        }
        if self.model_id.trim().is_empty() {
            return Err("model_id must not be empty".to_string());
        }
        if !self.output_format.starts_with("mp3_") {
            return Err(format!(
                "output_format must be an mp3 format, got '{}'",
                self.output_format
            ));
        }
        Ok(())
    }
}
