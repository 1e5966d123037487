//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `blogcast.toml` (or an explicit file), then `BLOGCAST_*` environment
//! variables with `__` between nested keys, e.g.
//! `BLOGCAST_SPEECH__DEFAULT_VOICE=alloy`.
//!
//! API keys are not part of the effective configuration shown to users; they
//! arrive with each request.

use std::path::Path;

use ai_core::InferenceConfig;
use ai_speech::{ElevenLabsConfig, SpeechConfig};
use application::PipelineConfig;
use integration_scrape::ScrapeConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Script model settings
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Default text-to-speech settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Premium voice settings
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    /// Article acquisition settings
    #[serde(default)]
    pub scrape: ScrapeConfig,

    /// Stage timeouts
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Environment variable prefix
    pub const ENV_PREFIX: &'static str = "BLOGCAST";

    /// Config file looked up in the working directory
    pub const DEFAULT_FILE: &'static str = "blogcast";

    /// Load configuration from defaults, `blogcast.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of `blogcast.toml` if given
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(true),
            None => config::File::new(Self::DEFAULT_FILE, config::FileFormat::Toml).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // e.g. BLOGCAST_PIPELINE__FETCH_TIMEOUT_SECS=30
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found, prefixed with its section name.
    pub fn validate(&self) -> Result<(), String> {
        self.inference
            .validate()
            .map_err(|e| format!("inference: {e}"))?;
        self.speech.validate().map_err(|e| format!("speech: {e}"))?;
        self.elevenlabs
            .validate()
            .map_err(|e| format!("elevenlabs: {e}"))?;
        self.scrape.validate().map_err(|e| format!("scrape: {e}"))?;
        self.pipeline
            .validate()
            .map_err(|e| format!("pipeline: {e}"))?;
        self.telemetry
            .validate()
            .map_err(|e| format!("telemetry: {e}"))?;
        Ok(())
    }

    /// Effective configuration as TOML, without any API keys
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
