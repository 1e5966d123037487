//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the chat, speech and scraping
//! client crates, and owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::AppConfig;
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};

/// Whether the Firecrawl scraper was compiled into this build
pub const FIRECRAWL_ENABLED: bool = cfg!(feature = "firecrawl");

/// Whether the ElevenLabs voice engine was compiled into this build
pub const ELEVENLABS_ENABLED: bool = cfg!(feature = "elevenlabs");
