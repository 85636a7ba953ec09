//! Command handlers: bridge CLI args to client calls and output formatting.

pub mod config_cmd;
pub mod monitor;
pub mod virt;

use secrecy::SecretString;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Print a response body in the selected format.
fn print_body(body: &str, global: &GlobalOpts) {
    output::print_output(&output::render_body(global.output, body), global.quiet);
}

/// Use the secret given on the command line, or prompt for one.
fn secret_or_prompt(given: Option<String>, prompt: &str) -> Result<SecretString, CliError> {
    let value = match given {
        Some(value) => value,
        None => rpassword::prompt_password(prompt)?,
    };
    if value.is_empty() {
        return Err(CliError::Validation {
            field: "secret".into(),
            reason: "value cannot be empty".into(),
        });
    }
    Ok(SecretString::from(value))
}
