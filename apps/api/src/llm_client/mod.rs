//! LLM Client — the single point of entry for all OpenAI API calls in SocioMap.
//!
//! ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
//! Handlers depend on the `TextGenerator` trait; `LlmClient` is its production backend.
//!
//! Model: gpt-4o-mini (hardcoded — do not make configurable to prevent drift)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub mod prompts;
#[cfg(test)]
pub mod stub;

/// Default chat completions endpoint. Overridable through `OPENAI_API_URL`.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all LLM calls in SocioMap.
pub const MODEL: &str = "gpt-4o-mini";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 1000;

/// Message surfaced to API callers when generation fails for any reason.
pub const GENERATION_FAILED: &str = "Failed to generate recommendations";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned no completion content")]
    EmptyContent,
}

/// Caller-facing generation failure. Carries only the message that is safe
/// to return in an HTTP response.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GenerationError {
    message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn upstream() -> Self {
        Self::new(GENERATION_FAILED)
    }
}

/// Capability boundary for text generation. Carried in `AppState` as
/// `Arc<dyn TextGenerator>` so handlers can be exercised without network access.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_role: &str, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the content of the first completion candidate.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Wraps the OpenAI Chat Completions API. One request per call: no retries,
/// no streaming, transport-default timeouts.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }

    /// Makes a raw call to the chat completions API, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }

    /// Calls the LLM and returns the first candidate's text.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_owned)
            .ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, system_role: &str, prompt: &str) -> Result<String, GenerationError> {
        self.complete(prompt, system_role).await.map_err(|e| {
            error!("Error generating recommendations: {e}");
            GenerationError::upstream()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const COMPLETIONS_PATH: &str = "/v1/chat/completions";

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new("sk-test".to_string(), server.url(COMPLETIONS_PATH))
    }

    #[tokio::test]
    async fn test_generate_sends_fixed_parameters_and_returns_first_choice() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(COMPLETIONS_PATH)
                    .header("authorization", "Bearer sk-test")
                    .body_contains("\"model\":\"gpt-4o-mini\"")
                    .body_contains("\"temperature\":0.7")
                    .body_contains("\"max_tokens\":1000")
                    .body_contains("\"role\":\"system\",\"content\":\"be helpful\"")
                    .body_contains("\"role\":\"user\",\"content\":\"write policy\"");
                then.status(200).json_body(json!({
                    "choices": [
                        {"message": {"role": "assistant", "content": "1. Expand transit"}},
                        {"message": {"role": "assistant", "content": "ignored"}}
                    ],
                    "usage": {"prompt_tokens": 12, "completion_tokens": 4}
                }));
            })
            .await;

        let text = client_for(&server)
            .generate("be helpful", "write policy")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "1. Expand transit");
    }

    #[tokio::test]
    async fn test_api_error_message_is_parsed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(COMPLETIONS_PATH);
                then.status(401)
                    .json_body(json!({"error": {"message": "Incorrect API key provided"}}));
            })
            .await;

        let err = client_for(&server).call("p", "s").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried_and_maps_to_generation_failure() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(COMPLETIONS_PATH);
                then.status(503).body("upstream overloaded");
            })
            .await;

        let err = client_for(&server).generate("s", "p").await.unwrap_err();

        mock.assert_hits_async(1).await;
        assert_eq!(err.to_string(), GENERATION_FAILED);
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(COMPLETIONS_PATH);
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.complete("p", "s").await,
            Err(LlmError::EmptyContent)
        ));
        assert_eq!(
            client.generate("s", "p").await.unwrap_err().to_string(),
            GENERATION_FAILED
        );
    }

    #[test]
    fn test_text_skips_missing_content() {
        let response: ChatResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": null}}]})).unwrap();
        assert_eq!(response.text(), None);
    }
}
