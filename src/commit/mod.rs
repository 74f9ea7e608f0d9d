//! Commit message construction: prompt templates, post-processing, editing.

pub mod editor;
pub mod message;
pub mod prompt;

pub use editor::{DEFAULT_EDITOR, edit_message, editor_from_env};
pub use message::CommitMessage;
pub use prompt::{Prompt, Style, build_commit_prompt};
