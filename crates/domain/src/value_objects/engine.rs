//! Synthesis engine tag

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which synthesis backend produced the audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisEngine {
    /// The optional premium voice provider
    Premium,
    /// The primary provider's built-in text-to-speech
    Default,
}

impl SynthesisEngine {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Premium => "Premium",
            Self::Default => "Default",
        }
    }
}

impl fmt::Display for SynthesisEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
