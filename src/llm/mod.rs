//! Commit message generation against a local Ollama server.

pub mod ollama;

use tracing::debug;

use crate::commit::{CommitMessage, Prompt, Style};
use crate::error::GenerateError;

pub use ollama::{DEFAULT_ENDPOINT, DEFAULT_MODEL, OllamaClient};

/// Generate a commit message for `prompt` and normalize it for `style`.
///
/// Blank output (after normalization) is an error.
pub async fn generate_commit_message(
    client: &OllamaClient,
    prompt: &Prompt,
    model: &str,
    style: Style,
) -> Result<CommitMessage, GenerateError> {
    let raw = client.generate(&prompt.text, model).await?;
    debug!("Raw model response: {:?}", raw);

    CommitMessage::from_response(&raw, style).ok_or(GenerateError::EmptyResponse)
}
