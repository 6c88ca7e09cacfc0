//! OpenAI-compatible chat-completion client
//!
//! Talks to any endpoint implementing `POST {base_url}/chat/completions`
//! (OpenAI, OpenRouter, and most self-hosted gateways).
//!
//! Each call is a single attempt: there is no retry, no streaming, and no
//! client-side timeout unless one is configured.
//!
//! # Examples
//!
//! ```no_run
//! use claimcheck_llm::{OpenAiCompatClient, ProviderConfig};
//!
//! let config = ProviderConfig::new("sk-...");
//! let client = OpenAiCompatClient::new(&config).unwrap();
//! assert!(client.endpoint().ends_with("/chat/completions"));
//! ```

use crate::config::ProviderConfig;
use crate::LlmError;
use async_trait::async_trait;
use claimcheck_domain::{CompletionClient, CompletionRequest};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Chat-completion client authenticated with a bearer key
pub struct OpenAiCompatClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Debug, Serialize)]
pub struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a CompletionRequest> for ChatCompletionBody<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.sampling.temperature(),
        }
    }
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiCompatClient {
    /// Create a client from provider settings
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Other`] if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full chat-completions URL
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send one request and return the first choice's content
    ///
    /// # Errors
    ///
    /// - [`LlmError::Communication`] on transport failure or an unexpected status
    /// - [`LlmError::Authentication`] on 401/403
    /// - [`LlmError::ModelNotAvailable`] on 404
    /// - [`LlmError::RateLimitExceeded`] on 429
    /// - [`LlmError::InvalidResponse`] when the body has no usable completion
    pub async fn chat(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = ChatCompletionBody::from(request);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            temperature = request.sampling.temperature(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(%status, "Completion endpoint returned an error");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    LlmError::Authentication(format!("HTTP {}: {}", status, error_text))
                }
                StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(request.model.clone()),
                StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
                _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no completion text".to_string()))
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatClient {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.chat(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimcheck_domain::{ChatMessage, SamplingConfig};

    fn sample_request() -> CompletionRequest {
        CompletionRequest {
            model: "openai/gpt-4-turbo".to_string(),
            messages: vec![ChatMessage::system("rules"), ChatMessage::user("Section A:\nx")],
            sampling: SamplingConfig::deterministic(),
        }
    }

    #[test]
    fn test_client_creation() {
        let config = ProviderConfig::new("key").with_base_url("http://localhost:9000/v1/");
        let client = OpenAiCompatClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/v1");
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_wire_body_shape() {
        let request = sample_request();
        let body = serde_json::to_value(ChatCompletionBody::from(&request)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "openai/gpt-4-turbo",
                "messages": [
                    {"role": "system", "content": "rules"},
                    {"role": "user", "content": "Section A:\nx"}
                ],
                "temperature": 0.0
            })
        );
    }

    #[test]
    fn test_response_without_content() {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert!(parsed.choices[0].message.content.is_none());

        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[tokio::test]
    async fn test_connection_error() {
        // Nothing listens on port 9 locally
        let config = ProviderConfig::new("key").with_base_url("http://127.0.0.1:9/v1");
        let client = OpenAiCompatClient::new(&config).unwrap();

        let result = client.chat(&sample_request()).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
