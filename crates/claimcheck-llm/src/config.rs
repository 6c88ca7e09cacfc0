//! Provider configuration
//!
//! Shared by the web server and the CLI. The API key is injected into the
//! client constructor; nothing in this crate reads process-wide state except
//! the explicit [`ProviderConfig::resolve_api_key`] call made at startup.

use claimcheck_domain::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable consulted when no key is configured
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default base URL (OpenRouter's OpenAI-compatible API)
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Connection settings for a chat-completion provider
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL, without the `/chat/completions` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer credential
    #[serde(default)]
    pub api_key: String,

    /// Client-side timeout in seconds; 0 leaves it to the service
    #[serde(default)]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl ProviderConfig {
    /// Config with the default endpoint and model and the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Fill an empty `api_key` from a fallback value (normally `OPENAI_API_KEY`)
    pub fn resolve_api_key(mut self, fallback: Option<String>) -> Self {
        if self.api_key.is_empty() {
            if let Some(key) = fallback.filter(|k| !k.is_empty()) {
                self.api_key = key;
            }
        }
        self
    }

    /// Client-side timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// True when a credential is present
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Copy of this config with the key masked, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.has_api_key() {
            copy.api_key = "********".to_string();
        }
        copy
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: String::new(),
            request_timeout_secs: 0,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &if self.has_api_key() { "<set>" } else { "<unset>" })
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(!config.has_api_key());
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_resolve_api_key_prefers_configured() {
        let config = ProviderConfig::new("from-file").resolve_api_key(Some("from-env".into()));
        assert_eq!(config.api_key, "from-file");
    }

    #[test]
    fn test_resolve_api_key_fallback() {
        let config = ProviderConfig::default().resolve_api_key(Some("from-env".into()));
        assert_eq!(config.api_key, "from-env");

        let config = ProviderConfig::default().resolve_api_key(Some(String::new()));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_timeout() {
        let mut config = ProviderConfig::default();
        config.request_timeout_secs = 90;
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_debug_hides_key() {
        let config = ProviderConfig::new("sk-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<set>"));
        assert_eq!(config.redacted().api_key, "********");
    }
}
