//! Branch creation/switching and pushing the current branch.

use crate::error::{GitError, WorkflowError};
use crate::ui::{self, Prompter};

use super::{CommandRunner, git, git_checked};

/// Remote that `push_current_branch` sets as upstream.
const PUSH_REMOTE: &str = "origin";

/// Result of [`ensure_branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOutcome {
    /// The branch did not exist and was created from HEAD.
    Created,
    /// The branch already existed and is now checked out.
    Switched,
    /// The branch exists but the user declined to switch to it.
    Declined,
}

/// Name of the checked-out branch (`git rev-parse --abbrev-ref HEAD`).
pub async fn current_branch(runner: &dyn CommandRunner) -> Result<String, GitError> {
    let output = git_checked(
        runner,
        &["rev-parse", "--abbrev-ref", "HEAD"],
        "rev-parse --abbrev-ref HEAD",
    )
    .await?;
    Ok(output.stdout.trim().to_string())
}

/// Whether a local branch called `name` exists.
pub async fn branch_exists(runner: &dyn CommandRunner, name: &str) -> Result<bool, GitError> {
    let reference = format!("refs/heads/{name}");
    let output = git(runner, &["show-ref", "--verify", "--quiet", &reference]).await?;
    Ok(output.success())
}

/// Switch to `name`, creating it if needed.
///
/// An existing branch is only checked out after the user confirms
/// (default yes).
pub async fn ensure_branch(
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
    name: &str,
) -> Result<BranchOutcome, WorkflowError> {
    let branch_error = |source| WorkflowError::Branch {
        branch: name.to_string(),
        source,
    };

    if branch_exists(runner, name).await.map_err(branch_error)? {
        ui::warn(format!("Branch '{name}' already exists."));

        let switch = prompter.confirm(&format!("Switch to existing branch '{name}'?"), true)?;
        if !switch {
            return Ok(BranchOutcome::Declined);
        }

        git_checked(runner, &["checkout", name], "checkout")
            .await
            .map_err(branch_error)?;
        return Ok(BranchOutcome::Switched);
    }

    git_checked(runner, &["checkout", "-b", name], "checkout -b")
        .await
        .map_err(branch_error)?;
    Ok(BranchOutcome::Created)
}

/// `git push -u origin <current branch>`; returns git's stdout.
pub async fn push_current_branch(runner: &dyn CommandRunner) -> Result<String, GitError> {
    let branch = current_branch(runner).await?;
    let output = git_checked(runner, &["push", "-u", PUSH_REMOTE, &branch], "push").await?;
    Ok(output.stdout)
}
