//! Voice catalogs and the caller's voice selection
//!
//! Voices come from two disjoint catalogs. The catalog a requested voice
//! belongs to decides which synthesis engine is tried first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Voices offered by the default text-to-speech engine
pub const DEFAULT_VOICES: [&str; 5] = ["coral", "alloy", "verse", "spark", "lunar"];

/// Voices offered by the premium voice provider
pub const PREMIUM_VOICES: [&str; 5] = ["Rachel", "Adam", "Bella", "Dorothy", "James"];

/// Default-engine voice used when a premium voice can not be honoured
pub const FALLBACK_VOICE: &str = "coral";

/// The catalog a voice id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceCatalog {
    /// Built-in voices of the primary provider
    Default,
    /// Voices of the premium provider
    Premium,
}

impl VoiceCatalog {
    /// All voice ids in this catalog
    #[must_use]
    pub const fn voices(self) -> &'static [&'static str] {
        match self {
            Self::Default => &DEFAULT_VOICES,
            Self::Premium => &PREMIUM_VOICES,
        }
    }

    /// Look up which catalog contains `voice` (exact, case-sensitive match)
    #[must_use]
    pub fn of(voice: &str) -> Option<Self> {
        [Self::Default, Self::Premium]
            .into_iter()
            .find(|catalog| catalog.voices().contains(&voice))
    }
}

/// A voice id validated against the catalogs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoiceSelection {
    id: String,
    catalog: VoiceCatalog,
}

impl VoiceSelection {
    /// Validate a voice id
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownVoice`] when the id is in neither catalog.
    pub fn parse(id: &str) -> Result<Self, DomainError> {
        let id = id.trim();
        let catalog =
            VoiceCatalog::of(id).ok_or_else(|| DomainError::UnknownVoice(id.to_string()))?;
        Ok(Self {
            id: id.to_string(),
            catalog,
        })
    }

    /// The requested voice id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Catalog the requested voice belongs to
    pub const fn catalog(&self) -> VoiceCatalog {
        self.catalog
    }

    /// Whether the requested voice comes from the premium catalog
    pub const fn is_premium(&self) -> bool {
        matches!(self.catalog, VoiceCatalog::Premium)
    }

    /// Voice to hand to the default engine
    ///
    /// A default-catalog voice is kept as requested. A premium voice has no
    /// counterpart there and is replaced by [`FALLBACK_VOICE`].
    pub fn default_engine_voice(&self) -> &str {
        match self.catalog {
            VoiceCatalog::Default => &self.id,
            VoiceCatalog::Premium => FALLBACK_VOICE,
        }
    }
}

impl Default for VoiceSelection {
    fn default() -> Self {
        Self {
            id: FALLBACK_VOICE.to_string(),
            catalog: VoiceCatalog::Default,
        }
    }
}

impl FromStr for VoiceSelection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VoiceSelection {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VoiceSelection> for String {
    fn from(voice: VoiceSelection) -> Self {
        voice.id
    }
}

impl fmt::Display for VoiceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_are_disjoint() {
        for voice in DEFAULT_VOICES {
            assert!(!PREMIUM_VOICES.contains(&voice));
        }
    }

    #[test]
    fn fallback_voice_is_in_default_catalog() {
        assert_eq!(VoiceCatalog::of(FALLBACK_VOICE), Some(VoiceCatalog::Default));
    }

    #[test]
    fn default_voice_is_kept_for_default_engine() {
        let voice = VoiceSelection::parse("alloy").unwrap();
        assert_eq!(voice.catalog(), VoiceCatalog::Default);
        assert!(!voice.is_premium());
        assert_eq!(voice.default_engine_voice(), "alloy");
    }

    #[test]
    fn premium_voice_maps_to_fallback_on_default_engine() {
        let voice = VoiceSelection::parse("Rachel").unwrap();
        assert!(voice.is_premium());
        assert_eq!(voice.id(), "Rachel");
        assert_eq!(voice.default_engine_voice(), FALLBACK_VOICE);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(VoiceSelection::parse("rachel").is_err());
        assert!(VoiceSelection::parse("Alloy").is_err());
    }

    #[test]
    fn unknown_voice_is_rejected() {
        assert!(matches!(
            VoiceSelection::parse("nova"),
            Err(DomainError::UnknownVoice(v)) if v == "nova"
        ));
    }

    #[test]
    fn parse_trims_input() {
        assert_eq!(VoiceSelection::parse(" verse ").unwrap().id(), "verse");
    }

    #[test]
    fn default_selection_is_fallback_voice() {
        assert_eq!(VoiceSelection::default().id(), FALLBACK_VOICE);
    }

    #[test]
    fn serde_roundtrip_validates() {
        let voice: VoiceSelection = serde_json::from_str("\"Bella\"").unwrap();
        assert!(voice.is_premium());
        assert!(serde_json::from_str::<VoiceSelection>("\"nobody\"").is_err());
    }
}
