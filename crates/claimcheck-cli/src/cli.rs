//! CLI command definitions and argument parsing.

use crate::error::{CliError, Result};
use claimcheck_domain::{FormInput, SectionInput, Upload};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

/// claimcheck - Verify claims against their reference sources.
#[derive(Debug, Parser)]
#[command(name = "claimcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CLAIMCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Plain text (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify Section A claims against Section B sources
    Verify(VerifyArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the verify command.
///
/// Text given directly wins over the matching file.
#[derive(Debug, Default, Parser)]
pub struct VerifyArgs {
    /// Section A (claims) text
    #[arg(long)]
    pub claims: Option<String>,

    /// Read Section A from a .txt file
    #[arg(long)]
    pub claims_file: Option<PathBuf>,

    /// Section B (sources) text
    #[arg(long)]
    pub sources: Option<String>,

    /// Read Section B from a .txt file
    #[arg(long)]
    pub sources_file: Option<PathBuf>,

    /// Model identifier, overriding the configured one
    #[arg(short, long)]
    pub model: Option<String>,
}

impl VerifyArgs {
    /// Collect both sections into a form, reading any files given
    pub fn to_form(&self) -> Result<FormInput> {
        Ok(FormInput::new(
            section(self.claims.as_deref(), self.claims_file.as_deref())?,
            section(self.sources.as_deref(), self.sources_file.as_deref())?,
        ))
    }
}

fn section(text: Option<&str>, file: Option<&Path>) -> Result<SectionInput> {
    // Non-empty text wins, so the file is not read at all
    let pasted = text.filter(|t| !t.is_empty());
    let upload = match file.filter(|_| pasted.is_none()) {
        Some(path) => {
            let bytes = fs::read(path).map_err(|e| {
                CliError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Some(Upload::named(name, bytes))
        }
        None => None,
    };

    Ok(SectionInput {
        pasted: text.map(str::to_string),
        upload,
    })
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration with the API key hidden
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
