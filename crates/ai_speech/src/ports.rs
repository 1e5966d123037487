//! Port definitions for speech synthesis
//!
//! Defines the trait (port) that text-to-speech adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::AudioData;

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations accept text of any length and split it into
/// provider-sized requests themselves.
///
/// # Example
///
/// ```ignore
/// use ai_speech::TextToSpeech;
///
/// async fn narrate(tts: &impl TextToSpeech, script: &str) -> Result<Vec<u8>, SpeechError> {
///     let audio = tts.synthesize(script, Some("coral")).await?;
///     Ok(audio.into_data())
/// }
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize speech from text
    ///
    /// # Arguments
    ///
    /// * `text` - Text to speak
    /// * `voice` - Voice name, or `None` for the provider default
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if synthesis fails.
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError>;

    /// Short provider identifier, e.g. `openai`
    fn provider_name(&self) -> &str;

    /// Model used for synthesis
    fn model_name(&self) -> &str;

    /// Voice used when none is requested
    fn default_voice(&self) -> &str;
}
