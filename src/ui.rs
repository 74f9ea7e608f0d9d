//! Terminal presentation: colored status lines and yes/no confirmations.

use std::io;

use colored::Colorize;
use dialoguer::Confirm;

use crate::error::WorkflowError;

/// Progress note (blue).
pub fn info(text: impl AsRef<str>) {
    println!("{}", text.as_ref().blue());
}

/// Completed step (green).
pub fn success(text: impl AsRef<str>) {
    println!("{}", text.as_ref().green());
}

/// Non-fatal notice (yellow).
pub fn warn(text: impl AsRef<str>) {
    println!("{}", text.as_ref().yellow());
}

/// Fatal diagnostic (red, stderr).
pub fn error(text: impl AsRef<str>) {
    eprintln!("{}", text.as_ref().red());
}

/// A commit message or other value the user should read carefully.
pub fn highlight(text: impl AsRef<str>) {
    println!("{}", text.as_ref().bold());
}

/// Source of answers for yes/no questions.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Ask `prompt`; an empty answer means `default`.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, WorkflowError>;
}

/// Asks on the terminal via dialoguer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, WorkflowError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }
}

/// Ctrl-C while a prompt is reading keys surfaces as an `Interrupted` read.
fn prompt_error(err: dialoguer::Error) -> WorkflowError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
            WorkflowError::Interrupted
        }
        other => WorkflowError::PromptFailed(other.to_string()),
    }
}
