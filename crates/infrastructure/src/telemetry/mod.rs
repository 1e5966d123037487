//! Logging setup
//!
//! Logs go to stderr so that piping the CLI output stays clean. The active
//! filter is chosen in this order: `-v` flags, then `RUST_LOG`, then the
//! configured `log_filter`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive used when neither `-v` nor `RUST_LOG` is given
    /// (e.g. "warn", "blogcast=debug,reqwest=info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

impl TelemetryConfig {
    /// Check that the filter directive parses
    pub fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.log_filter)
            .map(|_| ())
            .map_err(|e| format!("invalid log_filter '{}': {e}", self.log_filter))
    }
}

/// Error during telemetry initialization
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed
    #[error("Failed to initialize tracing subscriber: {0}")]
    Init(String),

    /// Filter directive could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),
}

/// Filter directive implied by the number of `-v` flags
pub const fn verbosity_filter(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn build_filter(config: &TelemetryConfig, verbosity: u8) -> Result<EnvFilter, TelemetryError> {
    if let Some(directive) = verbosity_filter(verbosity) {
        return Ok(EnvFilter::new(directive));
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_filter).map_err(|e| TelemetryError::Filter(e.to_string()))
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init_telemetry(config: &TelemetryConfig, verbosity: u8) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config, verbosity)?;

    match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true),
            )
            .try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(format = ?config.format, verbosity, "Telemetry initialized");
    Ok(())
}
