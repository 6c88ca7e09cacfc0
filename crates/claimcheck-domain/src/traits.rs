//! Trait definitions for external interactions
//!
//! The completion service is the only external dependency. Implementations
//! live in `claimcheck-llm`.

use crate::request::CompletionRequest;
use async_trait::async_trait;

/// A service that turns one completion request into one completion text
///
/// Implementations issue exactly one call per invocation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Error type for completion calls
    type Error: std::error::Error + Send + Sync + 'static;

    /// Submit the request and return the single best completion text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;
}
