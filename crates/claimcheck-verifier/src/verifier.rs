//! Core Verifier implementation
//!
//! The form is re-evaluated from scratch on every change: [`Verifier::evaluate`]
//! is the pure step from form state to the request that would be sent, and
//! [`Verifier::run`] performs the single call when there is one to make.

use crate::error::VerifyError;
use crate::prompt::PromptBuilder;
use claimcheck_domain::{
    CompletionClient, CompletionRequest, FormInput, InputError, VerificationResult, DEFAULT_MODEL,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Page title
pub const TITLE: &str = "Claim Verification Interface";

/// Shown while either section is still missing
pub const GUIDANCE_MESSAGE: &str = "Please provide both Section A and Section B using paste or upload.";

/// Shown while the request is in flight
pub const PROGRESS_MESSAGE: &str = "Verifying claims...";

/// Shown above a completed result
pub const SUCCESS_MESSAGE: &str = "Verification complete.";

/// What the user should see after an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// Inputs incomplete; show [`GUIDANCE_MESSAGE`]
    Pending,
    /// The model's reply, unmodified
    Complete(VerificationResult),
}

impl DisplayState {
    /// True while waiting for input
    pub fn is_pending(&self) -> bool {
        matches!(self, DisplayState::Pending)
    }

    /// The result, if the run completed
    pub fn result(&self) -> Option<&VerificationResult> {
        match self {
            DisplayState::Complete(result) => Some(result),
            DisplayState::Pending => None,
        }
    }

    /// Status line for this state
    pub fn status_message(&self) -> &'static str {
        match self {
            DisplayState::Pending => GUIDANCE_MESSAGE,
            DisplayState::Complete(_) => SUCCESS_MESSAGE,
        }
    }
}

/// Runs verifications against a completion client
///
/// `C` may be unsized, so a `Verifier<dyn CompletionClient<Error = E>>` can
/// be built with [`Verifier::from_arc`].
pub struct Verifier<C: ?Sized> {
    client: Arc<C>,
    model: String,
}

impl<C: ?Sized> Clone for Verifier<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            model: self.model.clone(),
        }
    }
}

impl<C> Verifier<C>
where
    C: CompletionClient,
{
    /// Create a new Verifier using the default model
    pub fn new(client: C) -> Self {
        Self::from_arc(Arc::new(client))
    }
}

impl<C> Verifier<C>
where
    C: CompletionClient + ?Sized,
{
    /// Create a new Verifier around a shared client
    pub fn from_arc(client: Arc<C>) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Use a specific model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Model identifier sent with each request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Work out the request the current form would send
    ///
    /// Returns `Ok(None)` while either section is missing. Makes no calls.
    pub fn evaluate(&self, form: &FormInput) -> Result<Option<CompletionRequest>, InputError> {
        let Some((claims, sources)) = form.resolve()? else {
            return Ok(None);
        };

        let request = PromptBuilder::new(claims, sources)
            .with_model(self.model.clone())
            .build();
        Ok(Some(request))
    }

    /// Evaluate the form and, if complete, issue exactly one completion call
    pub async fn run(&self, form: &FormInput) -> Result<DisplayState, VerifyError> {
        let Some(request) = self.evaluate(form)? else {
            debug!("Form incomplete, no request issued");
            return Ok(DisplayState::Pending);
        };

        info!(
            model = %request.model,
            user_message_len = request.messages.last().map_or(0, |m| m.content.len()),
            "Verifying claims"
        );

        let text = self.client.complete(&request).await.map_err(|e| {
            warn!("Completion failed: {}", e);
            VerifyError::Llm(Box::new(e))
        })?;

        info!(response_len = text.len(), "Verification complete");
        Ok(DisplayState::Complete(VerificationResult::new(text)))
    }
}
