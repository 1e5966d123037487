//! Value Objects - Immutable, identity-less domain primitives

mod engine;
mod run_id;
mod script_budget;
mod source_url;
mod voice;

pub use engine::SynthesisEngine;
pub use run_id::RunId;
pub use script_budget::ScriptBudget;
pub use source_url::SourceUrl;
pub use voice::{DEFAULT_VOICES, FALLBACK_VOICE, PREMIUM_VOICES, VoiceCatalog, VoiceSelection};
