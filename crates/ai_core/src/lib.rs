//! AI Core - Chat completion client
//!
//! Provides the [`InferenceEngine`] abstraction and an implementation for
//! OpenAI-compatible `/chat/completions` endpoints.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiChatEngine;
pub use ports::{
    InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage,
};
