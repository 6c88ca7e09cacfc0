//! Prompt assembly for claim verification

use claimcheck_domain::{
    ChatMessage, ClaimText, CompletionRequest, SamplingConfig, SourceText, DEFAULT_MODEL,
};

/// Builds the completion request for one verification
///
/// The output depends only on the two texts and the model name.
pub struct PromptBuilder {
    claims: ClaimText,
    sources: SourceText,
    model: String,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(claims: ClaimText, sources: SourceText) -> Self {
        Self {
            claims,
            sources,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The user message carrying both sections
    pub fn user_message(&self) -> String {
        user_message(&self.claims, &self.sources)
    }

    /// Build the complete request: fixed instructions, then both sections
    pub fn build(&self) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(VERIFICATION_INSTRUCTIONS),
                ChatMessage::user(self.user_message()),
            ],
            sampling: SamplingConfig::deterministic(),
        }
    }
}

/// Format the user message: `Section A:\n<claims>\n\nSection B:\n<sources>`
pub fn user_message(claims: &ClaimText, sources: &SourceText) -> String {
    format!("Section A:\n{}\n\nSection B:\n{}", claims.as_str(), sources.as_str())
}

/// Fixed system instruction sent with every request.
///
/// The last paragraph asks the model to police its own output. Nothing on
/// our side checks the reply against these rules.
pub const VERIFICATION_INSTRUCTIONS: &str = r#"You are a factual verification assistant. Your task is to evaluate an AI-generated response (Section A) by checking each claim against the provided reference sources (Section B).

Follow these instructions exactly:

1. Treat each line or bullet in Section A as a separate claim. If a sentence includes more than one factual statement, break it into multiple claims and evaluate each separately.

2. For each claim, determine if it is fully or partially supported:
- If fully supported by a direct quote from Section B, begin with:
The response is fully factual
- If the claim is only partially supported, overstated, or incorrectly sourced, begin with:
The response is partially factual

3. Use this exact structure for every claim:

The response is [fully/partially] factual

Claim X: [copy the exact claim from Section A]

Support for Claim X: [copy a single direct quote from Section B] (source N)

Optional:
Refutation for Claim X: [copy a single direct quote that contradicts the claim] (source N)

Optional:
Originality issue: Claim X cites source Y, but only source Z supports it. Source Y does not mention [missing element]

If no quote from Section B supports the claim, say:
Support for Claim X: No direct quote from Section B supports this claim.

4. Quoting and support rules:
- Use only exact quotes. Never summarize, describe, or paraphrase.
- Do not use more than one “Support for Claim X” line.
- If quoting from multiple sources, combine them using ellipses or include both in the same line.

5. Originality enforcement:
- If a source number is cited but does not support a key term or assertion, flag an originality issue.
- If a claim uses words like “significant,” “major,” or “widespread,” but the source does not support that degree of emphasis, you must flag an originality issue.
- If a refutation shows the issue was not a main cause, you must flag the citation as an originality problem—even if partial support exists.

6. Formatting:
- One blank line after each Support or Refutation line
- Two blank lines before the next claim
- Keep all malformed characters, broken formatting, and line breaks from Section B exactly as-is

If any of these rules are violated, discard the output and regenerate. If multiple failures happen, stop and ask the user for help.
"#;
