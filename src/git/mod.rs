//! Git operations through the system `git` binary.
//!
//! `git2` is only used to discover the enclosing repository.

pub mod branch;
pub mod diff;
pub mod runner;
pub mod ticket;

use std::path::Path;

use git2::Repository;

use crate::error::GitError;

pub use branch::{BranchOutcome, branch_exists, current_branch, ensure_branch, push_current_branch};
pub use diff::{DiffBundle, DiffOutcome, collect_diff};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use ticket::{NOJIRA, TicketId, extract_ticket, ticket_from_branch};

/// Run `git <args>` and return its output whatever the exit status.
pub(crate) async fn git(
    runner: &dyn CommandRunner,
    args: &[&str],
) -> Result<CommandOutput, GitError> {
    Ok(runner.run("git", args).await?)
}

/// Run `git <args>`, failing with the captured stderr on a non-zero exit.
pub(crate) async fn git_checked(
    runner: &dyn CommandRunner,
    args: &[&str],
    operation: &str,
) -> Result<CommandOutput, GitError> {
    let output = git(runner, args).await?;
    if !output.success() {
        return Err(GitError::CommandFailed {
            operation: operation.to_string(),
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output)
}

/// Check that git is on PATH and actually runs.
pub async fn check_git_installed(runner: &dyn CommandRunner) -> Result<(), GitError> {
    if which::which("git").is_err() {
        return Err(GitError::NotInstalled);
    }

    let version = git(runner, &["--version"])
        .await
        .map_err(|_| GitError::NotInstalled)?;
    if !version.success() {
        return Err(GitError::NotInstalled);
    }

    Ok(())
}

/// Confirm `path` is inside a git work tree.
pub fn ensure_repository(path: &Path) -> Result<(), GitError> {
    let repo = Repository::discover(path).map_err(GitError::NotARepository)?;
    if repo.is_bare() {
        return Err(GitError::NotARepository(git2::Error::from_str(
            "bare repositories have no working tree",
        )));
    }
    Ok(())
}

/// Create a commit from the staged changes; returns git's stdout.
pub async fn commit(runner: &dyn CommandRunner, message: &str) -> Result<String, GitError> {
    let output = git_checked(runner, &["commit", "-m", message], "commit").await?;
    Ok(output.stdout)
}
