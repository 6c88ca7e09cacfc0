//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use claimcheck_domain::{CompletionClient, FormInput};
use claimcheck_llm::OpenAiCompatClient;
use claimcheck_verifier::{DisplayState, Verifier};
use tracing::debug;

/// Execute the verify command.
///
/// Incomplete input prints the guidance message without touching the
/// provider, so no API key is needed for that path.
pub async fn execute_verify(args: VerifyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let form = args.to_form()?;

    if !form.is_complete() {
        debug!("Input incomplete, skipping verification");
        println!("{}", formatter.verification(&DisplayState::Pending)?);
        return Ok(());
    }

    if !config.provider.has_api_key() {
        return Err(CliError::Config(
            "No API key configured. Set provider.api_key or OPENAI_API_KEY".to_string(),
        ));
    }

    let client = OpenAiCompatClient::new(&config.provider)?;
    let model = args.model.unwrap_or_else(|| config.provider.model.clone());
    let verifier = Verifier::new(client).with_model(model);

    let output = verify(&verifier, &form, formatter).await?;
    println!("{}", output);

    Ok(())
}

/// Run one verification and format the outcome.
pub async fn verify<C>(verifier: &Verifier<C>, form: &FormInput, formatter: &Formatter) -> Result<String>
where
    C: CompletionClient + ?Sized,
{
    let state = verifier.run(form).await?;
    formatter.verification(&state)
}
