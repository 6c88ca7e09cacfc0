//! claimcheck Verifier
//!
//! Turns the two form sections into one completion request and runs it.
//!
//! # Architecture
//!
//! ```text
//! FormInput → resolve → PromptBuilder → CompletionClient → DisplayState
//! ```
//!
//! All judgement about the claims is left to the model. The verifier only
//! resolves inputs, assembles the fixed prompt, and hands back the reply.
//!
//! # Example Usage
//!
//! ```
//! use claimcheck_domain::FormInput;
//! use claimcheck_llm::MockClient;
//! use claimcheck_verifier::{DisplayState, Verifier};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let verifier = Verifier::new(MockClient::new("The response is fully factual"));
//!
//! let form = FormInput::from_text("The sky is blue.", "[1] The sky appears blue.");
//! let state = verifier.run(&form).await?;
//!
//! assert_eq!(state.result().unwrap().as_str(), "The response is fully factual");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod prompt;
mod verifier;


pub use error::VerifyError;
pub use prompt::{user_message, PromptBuilder, VERIFICATION_INSTRUCTIONS};
pub use verifier::{
    DisplayState, Verifier, GUIDANCE_MESSAGE, PROGRESS_MESSAGE, SUCCESS_MESSAGE, TITLE,
};
