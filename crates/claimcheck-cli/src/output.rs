//! Output formatting for the CLI.

use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use claimcheck_verifier::{DisplayState, GUIDANCE_MESSAGE};
use colored::*;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a verification outcome.
    ///
    /// In text mode a completed result is returned exactly as the model
    /// produced it, without color.
    pub fn verification(&self, state: &DisplayState) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(match state {
                DisplayState::Pending => self.info(GUIDANCE_MESSAGE),
                DisplayState::Complete(result) => result.as_str().to_string(),
            }),
            OutputFormat::Json => {
                let value = match state {
                    DisplayState::Pending => serde_json::json!({
                        "status": "pending",
                        "message": GUIDANCE_MESSAGE,
                    }),
                    DisplayState::Complete(result) => serde_json::json!({
                        "status": "complete",
                        "result": result.as_str(),
                    }),
                };
                Ok(serde_json::to_string_pretty(&value)?)
            }
        }
    }

    /// Format a configuration for display; the API key is masked.
    pub fn config(&self, config: &Config) -> Result<String> {
        let redacted = config.redacted();
        match self.format {
            OutputFormat::Text => toml::to_string_pretty(&redacted)
                .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e))),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&redacted)?),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            _ => text.to_string(),
        }
    }
}
