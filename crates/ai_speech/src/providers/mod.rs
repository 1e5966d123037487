//! Text-to-speech provider implementations

#[cfg(feature = "elevenlabs")]
pub mod elevenlabs;
pub mod openai;

#[cfg(feature = "elevenlabs")]
pub use elevenlabs::ElevenLabsProvider;
pub use openai::OpenAISpeechProvider;
