//! llm-commit - A CLI tool that drafts git commit messages with a local Ollama model.
//!
//! # Overview
//!
//! llm-commit reads the staged diff, asks a locally hosted model for a commit
//! message in one of several styles, lets the user review or edit it, and then
//! commits, optionally pushing and handing off to `llm_pr` for a pull request.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod llm;
pub mod ui;
pub mod workflow;

// Re-export commonly used types
pub use commit::{CommitMessage, Style};
pub use config::{RunOptions, Settings};
pub use error::{EditorError, GenerateError, GitError, PrError, ProcessError, WorkflowError};
pub use git::TicketId;
pub use workflow::{CommitWorkflow, RunOutcome};
