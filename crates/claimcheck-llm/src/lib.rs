//! claimcheck LLM Provider Layer
//!
//! Implementations of the `CompletionClient` trait from `claimcheck-domain`.
//!
//! # Providers
//!
//! - `MockClient`: Deterministic mock for testing; records every request
//! - `OpenAiCompatClient`: Any OpenAI-compatible chat-completions endpoint
//!
//! # Examples
//!
//! ```
//! use claimcheck_domain::{ChatMessage, CompletionClient, CompletionRequest, SamplingConfig};
//! use claimcheck_llm::MockClient;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = MockClient::new("Hello from LLM!");
//! let request = CompletionRequest {
//!     model: "test".to_string(),
//!     messages: vec![ChatMessage::user("hi")],
//!     sampling: SamplingConfig::deterministic(),
//! };
//! assert_eq!(client.complete(&request).await.unwrap(), "Hello from LLM!");
//! assert_eq!(client.call_count(), 1);
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod openai;

use async_trait::async_trait;
use claimcheck_domain::{CompletionClient, CompletionRequest, Role};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use config::ProviderConfig;
pub use openai::OpenAiCompatClient;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credential rejected by the provider
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock completion client for deterministic testing
///
/// Returns pre-configured responses without making any network calls and
/// records every request it receives. Clones share the recorded requests.
///
/// Responses can be keyed on the user message content.
#[derive(Debug, Clone)]
pub struct MockClient {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Result<String, String>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockClient {
    /// Create a new MockClient with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given user message
    pub fn add_response(&mut self, user_message: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(user_message.into(), Ok(response.into()));
    }

    /// Configure to return an error for a specific user message
    pub fn add_error(&mut self, user_message: impl Into<String>, message: impl Into<String>) {
        lock(&self.responses).insert(user_message.into(), Err(message.into()));
    }

    /// Get the number of times `complete` was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<CompletionRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Forget recorded requests
    pub fn reset(&self) {
        lock(&self.requests).clear();
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionClient for MockClient {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        lock(&self.requests).push(request.clone());

        let key = request.message(Role::User).map(|m| m.content.as_str());
        let configured = key.and_then(|k| lock(&self.responses).get(k).cloned());

        match configured {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(LlmError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}
