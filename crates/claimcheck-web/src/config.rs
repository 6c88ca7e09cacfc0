//! Configuration file parsing for the web server.
//!
//! Loads settings from TOML files: bind address, port, and the completion
//! provider. The API key may come from the file or from `OPENAI_API_KEY`.

use claimcheck_llm::config::API_KEY_ENV;
use claimcheck_llm::ProviderConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Web configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Web server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8501)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Completion provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8501
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            provider: ProviderConfig::default(),
        }
    }
}

impl WebConfig {
    /// Load configuration from a TOML file, falling back to `OPENAI_API_KEY`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents, std::env::var(API_KEY_ENV).ok())
    }

    /// Built-in defaults with the key taken from `OPENAI_API_KEY`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().finish(std::env::var(API_KEY_ENV).ok())
    }

    /// Parse TOML and resolve the API key against an explicit fallback
    pub fn from_toml(contents: &str, env_api_key: Option<String>) -> Result<Self, ConfigError> {
        let config: WebConfig = toml::from_str(contents)?;
        config.finish(env_api_key)
    }

    fn finish(mut self, env_api_key: Option<String>) -> Result<Self, ConfigError> {
        self.provider = self.provider.resolve_api_key(env_api_key);

        // Validate required fields
        if !self.provider.has_api_key() {
            return Err(ConfigError::MissingField("provider.api_key".to_string()));
        }

        Ok(self)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        WebConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8501,
            provider: ProviderConfig::new("test-key-do-not-use-in-production")
                .with_base_url("http://127.0.0.1:9/v1"),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WebConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8501);
        assert!(config.provider.has_api_key());
    }

    #[test]
    fn test_bind_addr() {
        let config = WebConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8501");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000

            [provider]
            base_url = "https://api.openai.com/v1"
            model = "gpt-4o"
            api_key = "sk-file"
            request_timeout_secs = 120
        "#;

        let config = WebConfig::from_toml(toml, None).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.provider.base_url, "https://api.openai.com/v1");
        assert_eq!(config.provider.model, "gpt-4o");
        assert_eq!(config.provider.api_key, "sk-file");
        assert_eq!(config.provider.request_timeout_secs, 120);
    }

    #[test]
    fn test_defaults_applied() {
        let config = WebConfig::from_toml("", Some("sk-env".to_string())).unwrap();
        assert_eq!(config.bind_port, 8501);
        assert_eq!(config.provider.model, "openai/gpt-4-turbo");
        assert_eq!(config.provider.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.provider.api_key, "sk-env");
    }

    #[test]
    fn test_missing_api_key() {
        let result = WebConfig::from_toml("bind_port = 8000", None);
        assert!(matches!(result, Err(ConfigError::MissingField(f)) if f == "provider.api_key"));
    }

    #[test]
    fn test_file_key_wins_over_env() {
        let toml = "[provider]\napi_key = \"sk-file\"\n";
        let config = WebConfig::from_toml(toml, Some("sk-env".to_string())).unwrap();
        assert_eq!(config.provider.api_key, "sk-file");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("web.toml");
        std::fs::write(&path, "bind_port = 8600\n[provider]\napi_key = \"k\"\n").unwrap();

        let config = WebConfig::from_file(&path).unwrap();
        assert_eq!(config.bind_port, 8600);

        let missing = WebConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let result = WebConfig::from_toml("bind_port = \"not a number\"", Some("k".into()));
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}
