//! Speech port - Interface for text-to-speech synthesis

use async_trait::async_trait;
use domain::SynthesisEngine;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for speech synthesis
///
/// Implementations return MP3 audio and accept scripts of any length.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Synthesize `text` with the given voice id
    ///
    /// # Returns
    /// MP3-encoded audio bytes.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, ApplicationError>;

    /// Engine tag reported for audio from this port
    fn engine(&self) -> SynthesisEngine;

    /// Provider name used in logs, warnings and results
    fn provider_name(&self) -> String;
}
