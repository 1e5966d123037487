//! Types for speech synthesis
//!
//! Contains data structures for audio data and formats.

use serde::{Deserialize, Serialize};

/// Supported audio formats
///
/// Only MP3 is produced. Long scripts are narrated in segments that are
/// joined byte for byte, which needs a frame-based format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format
    Mp3,
}

impl AudioFormat {
    /// Name of this format in provider requests and file extensions
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }
}

/// Container for synthesized audio
#[derive(Clone)]
pub struct AudioData {
    data: Vec<u8>,
    format: AudioFormat,
}

impl std::fmt::Debug for AudioData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioData")
            .field("size_bytes", &self.data.len())
            .field("format", &self.format)
            .finish()
    }
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
