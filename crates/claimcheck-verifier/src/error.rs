//! Error types for the Verifier

use claimcheck_domain::InputError;
use thiserror::Error;

/// Errors that can occur during a verification run
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The form input could not be resolved
    #[error(transparent)]
    Input(#[from] InputError),

    /// The completion client failed
    #[error("LLM error: {0}")]
    Llm(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl VerifyError {
    /// The client error as a concrete type, if it is one
    pub fn llm_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            VerifyError::Llm(e) => e.downcast_ref::<E>(),
            VerifyError::Input(_) => None,
        }
    }
}
