//! Chat completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{
    InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage,
};

/// Inference engine backed by an OpenAI-compatible `/chat/completions` API
pub struct OpenAiChatEngine {
    client: Client,
    api_key: String,
    config: InferenceConfig,
}

impl std::fmt::Debug for OpenAiChatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [InferenceMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// OpenAI error envelope
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl OpenAiChatEngine {
    /// Create a new chat engine
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, the configuration is
    /// invalid, or the HTTP client can not be built.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::Configuration)?;

        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| InferenceError::Configuration("API key is required".to_string()))?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized chat completion engine"
        );

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Get the model to use for a request
    /// Map a non-success response to an error
    fn map_status(status: StatusCode, body: &str, model: &str) -> InferenceError {
        let detail = serde_json::from_str::<ApiError>(body).ok().map(|e| e.error);
        let message = detail
            .as_ref()
            .map_or_else(|| body.chars().take(200).collect(), |d| d.message.clone());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                InferenceError::AuthenticationFailed(message)
            },
            StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited,
            StatusCode::NOT_FOUND
                if detail
                    .as_ref()
                    .and_then(|d| d.code.as_deref())
                    .is_some_and(|code| code == "model_not_found") =>
            {
                InferenceError::ModelNotAvailable(model.to_string())
            },
            _ => InferenceError::ServerError(format!("Status {status}: {message}")),
        }
    }
}

#[async_trait]
impl InferenceEngine for OpenAiChatEngine {
    #[instrument(skip(self, request), fields(model = %self.config.default_model))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let model = self.config.default_model.as_str();

        let body = ChatCompletionRequest {
            model,
            messages: &request.messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(messages = request.messages.len(), "Sending chat completion request");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::from_request(&e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Chat completion request failed");
            return Err(Self::map_status(status, &body, model));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("no choices returned".to_string()))?;

        let content = choice.message.content.ok_or_else(|| {
            InferenceError::InvalidResponse("choice has no message content".to_string())
        })?;

        let usage = completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!(tokens = ?usage, finish_reason = ?choice.finish_reason, "Inference completed");

        Ok(InferenceResponse {
            content,
            model: completion.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> InferenceConfig {
        InferenceConfig {
            base_url: server.uri(),
            timeout_ms: 5000,
            ..InferenceConfig::default()
        }
        .with_api_key("sk-test")
    }

    #[test]
    fn new_requires_api_key() {
        let result = OpenAiChatEngine::new(InferenceConfig::default());
        assert!(matches!(result, Err(InferenceError::Configuration(_))));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = InferenceConfig {
            temperature: 9.0,
            ..InferenceConfig::default().with_api_key("sk-test")
        };
        assert!(matches!(
            OpenAiChatEngine::new(config),
            Err(InferenceError::Configuration(_))
        ));
    }

    #[test]
    fn map_status_classifies_errors() {
        let body = serde_json::json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })
        .to_string();
        assert!(matches!(
            OpenAiChatEngine::map_status(StatusCode::UNAUTHORIZED, &body, "m"),
            InferenceError::AuthenticationFailed(msg) if msg == "Incorrect API key provided"
        ));
        assert!(matches!(
            OpenAiChatEngine::map_status(StatusCode::TOO_MANY_REQUESTS, "", "m"),
            InferenceError::RateLimited
        ));

        let body = r#"{"error":{"message":"The model does not exist","code":"model_not_found"}}"#;
        assert!(matches!(
            OpenAiChatEngine::map_status(StatusCode::NOT_FOUND, body, "gpt-x"),
            InferenceError::ModelNotAvailable(m) if m == "gpt-x"
        ));
        assert!(matches!(
            OpenAiChatEngine::map_status(StatusCode::BAD_GATEWAY, "upstream", "m"),
            InferenceError::ServerError(_)
        ));
    }

    #[tokio::test]
    async fn generate_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "model": "gpt-4o-mini-2024-07-18",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "Welcome to the show!" },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let engine = OpenAiChatEngine::new(config_for(&server)).unwrap();
        let response = engine
            .generate(InferenceRequest::with_system("sys", "user"))
            .await
            .unwrap();

        assert_eq!(response.content, "Welcome to the show!");
        assert_eq!(response.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(17));
    }

    #[tokio::test]
    async fn empty_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "choices": []
            })))
            .mount(&server)
            .await;

        let engine = OpenAiChatEngine::new(config_for(&server)).unwrap();
        let result = engine.generate(InferenceRequest::with_system("sys", "hi")).await;

        assert!(matches!(result, Err(InferenceError::InvalidResponse(_))));
    }

    #[test]
    fn default_model_comes_from_config() {
        let config = InferenceConfig::default().with_api_key("sk-test");
        let engine = OpenAiChatEngine::new(config).unwrap();
        assert_eq!(engine.default_model(), "gpt-4o-mini");
    }
}
