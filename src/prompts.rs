//! Prompts sent to the text model.
//!
//! Callers that want the raw prompt (the `ask` subcommand) bypass these and call
//! [`crate::pipeline::summarize::Summarizer::generate`] directly.

/// Prefix of every summary request.
pub const SUMMARY_PROMPT_PREFIX: &str = "Write a summary of the text provided: ";

/// Build the summary prompt for extracted text.
pub fn summary_prompt(text: &str) -> String {
    format!("{}{}", SUMMARY_PROMPT_PREFIX, text)
}
