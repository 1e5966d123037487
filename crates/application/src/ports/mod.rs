//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod article_source_port;
mod inference_port;
mod provider_factory_port;
mod speech_port;

#[cfg(test)]
pub use article_source_port::MockArticleSourcePort;
pub use article_source_port::ArticleSourcePort;
#[cfg(test)]
pub use inference_port::MockInferencePort;
pub use inference_port::{InferencePort, InferenceResult};
#[cfg(test)]
pub use provider_factory_port::MockProviderFactoryPort;
pub use provider_factory_port::ProviderFactoryPort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::SpeechPort;
