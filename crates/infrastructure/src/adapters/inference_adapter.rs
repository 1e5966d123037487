//! Inference adapter - Implements InferencePort using ai_core

use std::{sync::Arc, time::Instant};

use ai_core::{InferenceConfig, InferenceEngine, InferenceError, InferenceRequest, OpenAiChatEngine};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Adapter for OpenAI-compatible chat completion engines
pub struct InferenceAdapter {
    engine: Arc<dyn InferenceEngine>,
}

impl std::fmt::Debug for InferenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceAdapter")
            .field("model", &self.engine.default_model())
            .finish()
    }
}

impl InferenceAdapter {
    /// Create an adapter backed by the OpenAI chat completion API
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the configuration is
    /// invalid or carries no API key.
    pub fn openai(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = OpenAiChatEngine::new(config).map_err(Self::map_error)?;
        Ok(Self::with_engine(Arc::new(engine)))
    }

    /// Wrap an existing engine
    pub fn with_engine(engine: Arc<dyn InferenceEngine>) -> Self {
        Self { engine }
    }

    /// Convert ai_core error to application error
    fn map_error(err: InferenceError) -> ApplicationError {
        match err {
            InferenceError::Configuration(msg) => ApplicationError::Configuration(msg),
            InferenceError::AuthenticationFailed(msg) => ApplicationError::NotAuthorized(msg),
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::Timeout(ms) => ApplicationError::Timeout(ms.div_ceil(1000)),
            InferenceError::InvalidResponse(msg) => ApplicationError::InvalidResponse(msg),
            InferenceError::ModelNotAvailable(model) => {
                ApplicationError::ExternalService(format!("Model not available: {model}"))
            },
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Inference connection failed: {msg}"))
            },
            InferenceError::RequestFailed(msg) | InferenceError::ServerError(msg) => {
                ApplicationError::ExternalService(msg)
            },
        }
    }
}

#[async_trait]
impl InferencePort for InferenceAdapter {
    #[instrument(skip(self, system_prompt, message), fields(message_len = message.len()))]
    async fn generate_with_system(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();
        let request = InferenceRequest::with_system(system_prompt, message);

        let response = self
            .engine
            .generate(request)
            .await
            .map_err(Self::map_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms,
            "Inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}
