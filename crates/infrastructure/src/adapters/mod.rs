//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod article_source_adapter;
mod inference_adapter;
mod provider_factory;
mod speech_adapter;
mod unavailable;

pub use article_source_adapter::ArticleSourceAdapter;
pub use inference_adapter::InferenceAdapter;
pub use provider_factory::ProviderFactory;
pub use speech_adapter::SpeechAdapter;
pub use unavailable::{UnavailableArticleSource, UnavailableSpeech};
