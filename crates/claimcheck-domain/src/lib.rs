//! claimcheck Domain Layer
//!
//! Core types shared by every other crate: the two input sections and how
//! their effective text is resolved, the shape of a completion request, and
//! the trait boundary to the completion service.
//!
//! ## Key Concepts
//!
//! - **ClaimText** (Section A): the claims to verify
//! - **SourceText** (Section B): the reference material
//! - **CompletionRequest**: system instruction + user content + sampling
//! - **VerificationResult**: the model's text, displayed verbatim

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod input;
pub mod request;
pub mod traits;

// Re-exports for convenience
pub use input::{ClaimText, FormInput, InputError, Section, SectionInput, SourceText, Upload};
pub use request::{
    ChatMessage, CompletionRequest, Role, SamplingConfig, VerificationResult, DEFAULT_MODEL,
};
pub use traits::CompletionClient;
