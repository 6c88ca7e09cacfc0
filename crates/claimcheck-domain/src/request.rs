//! Completion request model
//!
//! A request is an ordered list of role-tagged messages plus the model
//! identifier and sampling settings. The wire format belongs to the client
//! implementation; this module only describes what is asked.

use std::fmt;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "openai/gpt-4-turbo";

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Fixed instruction that frames the task
    System,
    /// The user's content (both sections)
    User,
}

impl Role {
    /// Lowercase role name as used by chat-completion APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who is speaking
    pub role: Role,
    /// Message body
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    temperature: f32,
}

impl SamplingConfig {
    /// Greedy decoding: always request the most likely token path
    pub const fn deterministic() -> Self {
        Self { temperature: 0.0 }
    }

    /// Sampling temperature
    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::deterministic()
    }
}

/// One request to a completion endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier, e.g. `openai/gpt-4-turbo`
    pub model: String,
    /// Messages in order: system instruction first, then user content
    pub messages: Vec<ChatMessage>,
    /// Sampling settings
    pub sampling: SamplingConfig,
}

impl CompletionRequest {
    /// First message with the given role, if present
    pub fn message(&self, role: Role) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.role == role)
    }
}

/// Text returned by the model, shown to the user unmodified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult(String);

impl VerificationResult {
    /// Wrap completion text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the text
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_sampling() {
        assert_eq!(SamplingConfig::deterministic().temperature(), 0.0);
        assert_eq!(SamplingConfig::default(), SamplingConfig::deterministic());
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn test_message_lookup() {
        let request = CompletionRequest {
            model: "m".to_string(),
            messages: vec![ChatMessage::system("rules"), ChatMessage::user("content")],
            sampling: SamplingConfig::deterministic(),
        };
        assert_eq!(request.message(Role::System).unwrap().content, "rules");
        assert_eq!(request.message(Role::User).unwrap().content, "content");
    }

    #[test]
    fn test_result_is_verbatim() {
        let text = "The response is fully factual\n\nClaim 1: x\n";
        let result = VerificationResult::new(text);
        assert_eq!(result.as_str(), text);
        assert_eq!(result.to_string(), text);
        assert_eq!(result.into_inner(), text);
    }
}
