//! Hands the generated message to the user's editor.

use std::env;
use std::io::Write;

use tokio::process::Command;
use tracing::debug;

use crate::error::EditorError;

/// Editor used when `EDITOR` is unset or empty.
pub const DEFAULT_EDITOR: &str = "vim";

/// `$EDITOR`, falling back to [`DEFAULT_EDITOR`].
pub fn editor_from_env() -> String {
    match env::var("EDITOR") {
        Ok(editor) if !editor.trim().is_empty() => editor,
        _ => DEFAULT_EDITOR.to_string(),
    }
}

/// Open `message` in `editor` and return the saved contents verbatim.
///
/// `editor` may carry arguments (`code --wait`); the temp file path is
/// appended last. The temp file is deleted when this future completes or
/// is dropped, and the editor is killed if the future is dropped first.
pub async fn edit_message(message: &str, editor: &str) -> Result<String, EditorError> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(EditorError::EmptyCommand)?;
    let args: Vec<&str> = parts.collect();

    let mut file = tempfile::Builder::new()
        .prefix("llm-commit-")
        .suffix(".tmp")
        .tempfile()
        .map_err(EditorError::TempFile)?;
    file.write_all(message.as_bytes())
        .and_then(|_| file.flush())
        .map_err(EditorError::TempFile)?;

    debug!("Opening {} in {}", file.path().display(), editor);

    let status = Command::new(program)
        .args(&args)
        .arg(file.path())
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|source| EditorError::LaunchFailed {
            editor: editor.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(EditorError::EditorFailed {
            editor: editor.to_string(),
            code: status.code(),
        });
    }

    // Editors often replace the file rather than writing in place, so reread by path.
    tokio::fs::read_to_string(file.path())
        .await
        .map_err(EditorError::ReadFailed)
}
