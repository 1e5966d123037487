//! AI Speech - Text-to-Speech abstractions
//!
//! Provides the `TextToSpeech` port and its HTTP adapters.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Supported Providers
//!
//! - OpenAI TTS (always compiled)
//! - ElevenLabs premium voices (`elevenlabs` feature)
//!
//! Long inputs are split at sentence boundaries and the MP3 segments are
//! concatenated. Downloads can be spooled to a scoped temporary file by
//! setting `spool_dir`.
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{OpenAISpeechProvider, SpeechConfig, TextToSpeech};
//!
//! let provider = OpenAISpeechProvider::new(SpeechConfig::default().with_api_key(key))?;
//! let audio = provider.synthesize("Hello, world!", Some("coral")).await?;
//! std::fs::write("hello.mp3", audio.into_data())?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod spool;
pub mod text;
pub mod types;

pub use config::{ElevenLabsConfig, SpeechConfig};
pub use error::SpeechError;
pub use ports::TextToSpeech;
#[cfg(feature = "elevenlabs")]
pub use providers::ElevenLabsProvider;
pub use providers::OpenAISpeechProvider;
pub use spool::AudioSpool;
pub use text::split_for_synthesis;
pub use types::{AudioData, AudioFormat};

/// Whether the ElevenLabs provider was compiled in
pub const ELEVENLABS_ENABLED: bool = cfg!(feature = "elevenlabs");
