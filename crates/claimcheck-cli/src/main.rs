//! claimcheck CLI - Verify claims against reference sources from the terminal.

use claimcheck_cli::commands;
use claimcheck_cli::{Cli, Command, Config, Formatter};
use claimcheck_llm::config::API_KEY_ENV;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> claimcheck_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&path)?.with_env_key(std::env::var(API_KEY_ENV).ok());

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Verify(args) => {
            commands::execute_verify(args, &config, &formatter).await?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &path, &formatter)?;
        }
    }

    Ok(())
}
