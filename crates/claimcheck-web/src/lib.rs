//! claimcheck Web
//!
//! Browser front end for claim verification: a form with two text areas and
//! two `.txt` uploads that posts to the verifier and shows the model's reply.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod page;

use claimcheck_llm::{LlmError, OpenAiCompatClient};
use claimcheck_verifier::Verifier;
use config::WebConfig;
use handlers::{create_router, AppState, SharedClient};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Web server error
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Completion client could not be created
    #[error("Client error: {0}")]
    Client(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build application state from configuration
///
/// The API key travels from the config into the client constructor and
/// nowhere else.
pub fn build_state(config: &WebConfig) -> Result<AppState, WebError> {
    let client: Arc<SharedClient> = Arc::new(OpenAiCompatClient::new(&config.provider)?);
    let verifier = Verifier::from_arc(client).with_model(config.provider.model.clone());
    Ok(AppState { verifier })
}

/// Start the web server
///
/// Builds the completion client and serves the form until the process exits.
pub async fn start_server(config: WebConfig) -> Result<(), WebError> {
    info!("Starting claimcheck web server");
    info!("Bind address: {}", config.bind_addr());
    info!("Provider: {}", config.provider.base_url);
    info!("Model: {}", config.provider.model);

    let state = build_state(&config)?;
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on http://{}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| WebError::Server(e.to_string()))?;

    Ok(())
}
