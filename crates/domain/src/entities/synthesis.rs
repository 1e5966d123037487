//! Synthesized audio plus provenance

use serde::{Deserialize, Serialize};

use crate::value_objects::SynthesisEngine;

/// Audio produced for a script, tagged with what actually produced it
///
/// The requested voice and the voice used can differ when the premium
/// engine was skipped or failed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisResult {
    /// MP3-encoded audio
    pub audio: Vec<u8>,
    /// Engine that produced the audio
    pub engine: SynthesisEngine,
    /// Voice id the engine was called with
    pub voice: String,
    /// Human-readable provider name (e.g. "OpenAI TTS")
    pub provider: String,
}

impl SynthesisResult {
    /// MIME type of [`Self::audio`]
    pub const MIME_TYPE: &'static str = "audio/mpeg";

    /// Create a new result
    pub fn new(
        audio: Vec<u8>,
        engine: SynthesisEngine,
        voice: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            audio,
            engine,
            voice: voice.into(),
            provider: provider.into(),
        }
    }

    /// Size of the audio in bytes
    pub fn size_bytes(&self) -> usize {
        self.audio.len()
    }
}

impl std::fmt::Debug for SynthesisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisResult")
            .field("audio_bytes", &self.audio.len())
            .field("engine", &self.engine)
            .field("voice", &self.voice)
            .field("provider", &self.provider)
            .finish()
    }
}
