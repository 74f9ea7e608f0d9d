//! External command execution.
//!
//! Every git call (and the PR tool hand-off) goes through [`CommandRunner`]
//! so the rest of the crate can be exercised against scripted outputs.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::ProcessError;

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a program to completion and captures its output.
///
/// The argument lifetime is named so the trait can be automocked.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run with stdin closed.
    async fn run<'a>(&self, program: &str, args: &[&'a str]) -> Result<CommandOutput, ProcessError>;

    /// Run with the terminal's stdin attached, for tools that prompt the user.
    async fn run_interactive<'a>(
        &self,
        program: &str,
        args: &[&'a str],
    ) -> Result<CommandOutput, ProcessError>;
}

/// Runner backed by real subprocesses.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    workdir: Option<PathBuf>,
}

impl SystemRunner {
    /// Runner that executes in the current process directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that executes every command inside `workdir`.
    pub fn in_dir(workdir: impl AsRef<Path>) -> Self {
        Self {
            workdir: Some(workdir.as_ref().to_path_buf()),
        }
    }

    async fn execute(
        &self,
        program: &str,
        args: &[&str],
        stdin: Stdio,
    ) -> Result<CommandOutput, ProcessError> {
        debug!("Running: {} {}", program, args.join(" "));

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .await
            .map_err(|source| ProcessError::SpawnFailed {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run<'a>(
        &self,
        program: &str,
        args: &[&'a str],
    ) -> Result<CommandOutput, ProcessError> {
        self.execute(program, args, Stdio::null()).await
    }

    async fn run_interactive<'a>(
        &self,
        program: &str,
        args: &[&'a str],
    ) -> Result<CommandOutput, ProcessError> {
        self.execute(program, args, Stdio::inherit()).await
    }
}
