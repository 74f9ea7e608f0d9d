//! Error types for llm-commit modules using thiserror.

use thiserror::Error;

/// Errors from spawning an external process.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git is not installed or not available in PATH")]
    NotInstalled,

    #[error("Not a git repository. Run llm-commit from within a git repository: {0}")]
    NotARepository(#[source] git2::Error),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },
}

/// Errors from the Ollama generation endpoint.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(
        "Cannot connect to Ollama server at {url}. \
         Make sure Ollama is installed and running with 'ollama serve'"
    )]
    ServerUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Ollama server is not running (HTTP {status}). Start it with 'ollama serve'")]
    ServerNotRunning { status: u16 },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Error communicating with Ollama API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Model '{model}' not found")]
    ModelNotFound { model: String },

    #[error("Ollama API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Ollama returned an unreadable response: {0}")]
    InvalidResponse(String),

    #[error("Ollama returned an empty commit message")]
    EmptyResponse,
}

/// Errors from the interactive message editor.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Failed to prepare temporary message file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("EDITOR is set to an empty command")]
    EmptyCommand,

    #[error("Failed to launch editor '{editor}': {source}")]
    LaunchFailed {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Editor '{editor}' exited with {}",
        code.map_or("a signal".to_string(), |c| format!("code {c}"))
    )]
    EditorFailed { editor: String, code: Option<i32> },

    #[error("Failed to read edited message: {0}")]
    ReadFailed(#[source] std::io::Error),
}

/// Errors from handing off to the PR-creation tool.
#[derive(Error, Debug)]
pub enum PrError {
    #[error("Could not locate the PR tool next to this executable: {0}")]
    ToolPath(#[source] std::io::Error),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(
        "PR creation failed with {}",
        code.map_or("a signal".to_string(), |c| format!("exit code {c}"))
    )]
    Failed { code: Option<i32> },
}

/// Errors that end the commit workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Pr(#[from] PrError),

    #[error("Failed to create or switch to branch '{branch}': {source}")]
    Branch {
        branch: String,
        #[source]
        source: GitError,
    },

    #[error("Commit message is empty")]
    EmptyMessage,

    #[error("Prompt failed: {0}")]
    PromptFailed(String),

    #[error("Operation cancelled by user")]
    Interrupted,
}
