//! claimcheck web server
//!
//! Serves the claim verification form.

use clap::Parser;
use claimcheck_web::{config::WebConfig, start_server, WebError};
use std::path::PathBuf;
use std::process;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Serve the claim verification form over HTTP.
#[derive(Debug, Parser)]
#[command(name = "claimcheck-web")]
#[command(version, about, long_about = None)]
struct Args {
    /// Load configuration from a TOML file
    #[arg(short, long, env = "CLAIMCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), WebError> {
    let mut config = match &args.config {
        Some(path) => WebConfig::from_file(path)?,
        None => {
            warn!("No config file specified, using defaults and OPENAI_API_KEY");
            WebConfig::from_env()?
        }
    };

    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if let Some(port) = args.port {
        config.bind_port = port;
    }

    start_server(config).await
}
