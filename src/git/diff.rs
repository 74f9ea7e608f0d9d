//! Staged diff collection, with an offer to stage everything when nothing is staged.

use tracing::debug;

use crate::error::WorkflowError;
use crate::ui::{self, Prompter};

use super::{CommandRunner, git_checked};

/// Staged changes the commit message is generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBundle {
    pub diff_text: String,
    pub changed_files: Vec<String>,
}

/// Result of [`collect_diff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    Ready(DiffBundle),
    /// Neither staged nor unstaged changes exist.
    NoChanges,
    /// Only unstaged changes exist and the user chose not to stage them.
    Declined,
}

/// Collect the staged diff.
///
/// Falls back to `git diff` when nothing is staged and offers to `git add .`.
/// Staging is attempted at most once; if the staged diff is still empty
/// afterwards the result is [`DiffOutcome::NoChanges`].
pub async fn collect_diff(
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
) -> Result<DiffOutcome, WorkflowError> {
    let mut restaged = false;

    loop {
        let staged = git_checked(runner, &["diff", "--staged"], "diff --staged").await?;
        if !staged.stdout.trim().is_empty() {
            let names = git_checked(
                runner,
                &["diff", "--staged", "--name-only"],
                "diff --staged --name-only",
            )
            .await?;

            let changed_files: Vec<String> = names
                .stdout
                .trim()
                .lines()
                .map(String::from)
                .collect();
            debug!(
                "Collected staged diff: {} files, {} bytes",
                changed_files.len(),
                staged.stdout.len()
            );

            return Ok(DiffOutcome::Ready(DiffBundle {
                diff_text: staged.stdout,
                changed_files,
            }));
        }

        if restaged {
            debug!("Staged diff still empty after git add");
            return Ok(DiffOutcome::NoChanges);
        }

        let unstaged = git_checked(runner, &["diff"], "diff").await?;
        if unstaged.stdout.trim().is_empty() {
            return Ok(DiffOutcome::NoChanges);
        }

        ui::warn("No staged changes found. There are unstaged changes available.");
        if !prompter.confirm("Would you like to stage all changes?", false)? {
            return Ok(DiffOutcome::Declined);
        }

        git_checked(runner, &["add", "."], "add").await?;
        restaged = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitError;
    use crate::git::runner::script::CommandScript;
    use crate::ui::MockPrompter;

    const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n+pub fn added() {}\n";

    fn never_asked() -> MockPrompter {
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().never();
        prompter
    }

    #[tokio::test]
    async fn test_staged_changes_never_prompt() {
        let runner = CommandScript::new()
            .expect("git diff --staged", 0, DIFF, "")
            .expect("git diff --staged --name-only", 0, "src/lib.rs\nREADME.md\n", "")
            .build();

        let outcome = collect_diff(&runner, &never_asked()).await.unwrap();

        assert_eq!(
            outcome,
            DiffOutcome::Ready(DiffBundle {
                diff_text: DIFF.to_string(),
                changed_files: vec!["src/lib.rs".to_string(), "README.md".to_string()],
            })
        );
    }

    #[tokio::test]
    async fn test_clean_tree_reports_no_changes() {
        let runner = CommandScript::new()
            .expect("git diff --staged", 0, "", "")
            .expect("git diff", 0, "\n", "")
            .build();

        let outcome = collect_diff(&runner, &never_asked()).await.unwrap();
        assert_eq!(outcome, DiffOutcome::NoChanges);
    }

    #[tokio::test]
    async fn test_declining_to_stage() {
        let runner = CommandScript::new()
            .expect("git diff --staged", 0, "", "")
            .expect("git diff", 0, DIFF, "")
            .build();

        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .withf(|_, default| !*default)
            .times(1)
            .returning(|_, _| Ok(false));

        let outcome = collect_diff(&runner, &prompter).await.unwrap();
        assert_eq!(outcome, DiffOutcome::Declined);
    }

    #[tokio::test]
    async fn test_accepting_stages_and_retries_once() {
        let runner = CommandScript::new()
            .expect("git diff --staged", 0, "", "")
            .expect("git diff", 0, DIFF, "")
            .expect("git add .", 0, "", "")
            .expect("git diff --staged", 0, DIFF, "")
            .expect("git diff --staged --name-only", 0, "src/lib.rs\n", "")
            .build();

        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().times(1).returning(|_, _| Ok(true));

        let outcome = collect_diff(&runner, &prompter).await.unwrap();
        match outcome {
            DiffOutcome::Ready(bundle) => assert_eq!(bundle.changed_files, vec!["src/lib.rs"]),
            other => panic!("Expected Ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_restage_that_stages_nothing_terminates() {
        let runner = CommandScript::new()
            .expect("git diff --staged", 0, "", "")
            .expect("git diff", 0, DIFF, "")
            .expect("git add .", 0, "", "")
            .expect("git diff --staged", 0, "", "")
            .build();

        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().times(1).returning(|_, _| Ok(true));

        let outcome = collect_diff(&runner, &prompter).await.unwrap();
        assert_eq!(outcome, DiffOutcome::NoChanges);
    }

    #[tokio::test]
    async fn test_failing_diff_is_fatal() {
        let runner = CommandScript::new()
            .expect("git diff --staged", 128, "", "fatal: not a git repository\n")
            .build();

        let err = collect_diff(&runner, &never_asked()).await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Git(GitError::CommandFailed { .. })
        ));
    }
}
