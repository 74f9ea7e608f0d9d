//! The commit workflow: dependency check, branch, diff, generate, commit,
//! push, and PR hand-off, with confirmations in between.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::commit::{CommitMessage, build_commit_prompt, edit_message};
use crate::config::{RunOptions, Settings};
use crate::error::{GenerateError, WorkflowError};
use crate::git::{
    self, BranchOutcome, CommandRunner, DiffBundle, DiffOutcome, SystemRunner, collect_diff,
    ensure_branch, extract_ticket, push_current_branch,
};
use crate::github::{create_pr, default_pr_tool_path};
use crate::llm::{OllamaClient, generate_commit_message};
use crate::ui::{self, Prompter, TerminalPrompter};

/// How a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A commit was created (and pushed / PR'd if requested).
    Completed,
    /// A message was generated but `--dry-run` skipped the commit.
    DryRun,
    /// The working tree had no changes.
    NothingToCommit,
    /// The user said no at a confirmation.
    Declined,
}

/// One configured run of the commit workflow.
pub struct CommitWorkflow {
    options: RunOptions,
    settings: Settings,
    workdir: PathBuf,
    runner: Box<dyn CommandRunner>,
    prompter: Box<dyn Prompter>,
    ollama: OllamaClient,
}

impl CommitWorkflow {
    /// Workflow for the repository containing `workdir`, using real git and
    /// terminal prompts.
    pub fn new(
        options: RunOptions,
        settings: Settings,
        workdir: impl AsRef<Path>,
    ) -> Result<Self, WorkflowError> {
        let workdir = workdir.as_ref().to_path_buf();
        let ollama = OllamaClient::new(settings.ollama_url.clone(), settings.timeout)?;
        Ok(Self {
            runner: Box::new(SystemRunner::in_dir(&workdir)),
            prompter: Box::new(TerminalPrompter),
            options,
            settings,
            workdir,
            ollama,
        })
    }

    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_prompter(mut self, prompter: Box<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    /// Run every step in order, stopping at the first decline or error.
    ///
    /// `--yes` skips the commit, push and PR confirmations. Staging unstaged
    /// changes and switching to an existing branch are always asked.
    pub async fn run(&self) -> Result<RunOutcome, WorkflowError> {
        let runner = self.runner.as_ref();
        let prompter = self.prompter.as_ref();

        self.check_dependencies().await?;

        if let Some(branch) = &self.options.branch {
            match ensure_branch(runner, prompter, branch).await? {
                BranchOutcome::Created => {
                    ui::success(format!("Created and switched to new branch '{branch}'"))
                }
                BranchOutcome::Switched => ui::success(format!("Switched to branch '{branch}'")),
                BranchOutcome::Declined => {
                    ui::warn("Branch switch cancelled.");
                    return Ok(RunOutcome::Declined);
                }
            }
        }

        let bundle = match collect_diff(runner, prompter).await? {
            DiffOutcome::Ready(bundle) => bundle,
            DiffOutcome::NoChanges => {
                ui::warn("No changes to commit.");
                return Ok(RunOutcome::NothingToCommit);
            }
            DiffOutcome::Declined => {
                ui::warn("No changes staged. Nothing to commit.");
                return Ok(RunOutcome::Declined);
            }
        };

        let mut message = self.generate(&bundle).await?;

        if self.options.prefix {
            match extract_ticket(runner).await {
                Some(ticket) => {
                    if message.apply_ticket_prefix(&ticket) {
                        debug!("Prefixed commit message with {}", ticket);
                    }
                }
                None => ui::warn("No ticket ID found in branch name; leaving message unprefixed."),
            }
        }

        ui::success("Generated commit message:");
        ui::highlight(message.as_str());

        if self.options.edit {
            ui::info("Opening editor for you to modify the commit message...");
            let edited = edit_message(message.as_str(), &self.settings.editor).await?;
            message = CommitMessage::new(edited).ok_or(WorkflowError::EmptyMessage)?;
            ui::success("Updated commit message:");
            ui::highlight(message.as_str());
        }

        if self.options.dry_run {
            ui::warn("Dry run - no commit created");
            return Ok(RunOutcome::DryRun);
        }

        if !self.options.yes {
            ui::success("Ready to commit with message:");
            ui::highlight(message.as_str());
            if !prompter.confirm("Create commit?", true)? {
                ui::warn("Commit cancelled.");
                return Ok(RunOutcome::Declined);
            }
        }

        ui::info("Creating commit...");
        let stdout = git::commit(runner, message.as_str()).await?;
        ui::success("Commit created successfully:");
        println!("{}", stdout.trim_end());

        self.push_and_open_pr().await?;
        Ok(RunOutcome::Completed)
    }

    /// git on PATH, inside a work tree, Ollama answering.
    async fn check_dependencies(&self) -> Result<(), WorkflowError> {
        git::check_git_installed(self.runner.as_ref()).await?;
        git::ensure_repository(&self.workdir)?;
        self.ollama.check_server().await?;
        Ok(())
    }

    async fn generate(&self, bundle: &DiffBundle) -> Result<CommitMessage, WorkflowError> {
        let model = &self.options.model;
        let style = self.options.style;

        if self.options.verbose {
            ui::info("Changed files:");
            for file in &bundle.changed_files {
                println!("  {file}");
            }
            ui::info("Diff:");
            println!("{}", bundle.diff_text);
        }

        let prompt = build_commit_prompt(&bundle.diff_text, style, &bundle.changed_files);
        if self.options.verbose {
            ui::info("Prompt:");
            println!("{}", prompt.text);
        }

        ui::info(format!("Generating commit message using Ollama ({model})..."));
        let message = generate_commit_message(&self.ollama, &prompt, model, style)
            .await
            .inspect_err(|e| {
                if let GenerateError::ModelNotFound { model } = e {
                    ui::warn(format!("Try pulling it with: ollama pull {model}"));
                }
            })?;
        Ok(message)
    }

    /// With `--yes` nothing is asked: push only when `auto_push` says so.
    async fn push_and_open_pr(&self) -> Result<(), WorkflowError> {
        let runner = self.runner.as_ref();
        let prompter = self.prompter.as_ref();
        let ask = !self.options.yes;
        let auto_push = self.options.auto_push();

        let mut pushed = false;
        if auto_push || (ask && prompter.confirm("Push changes to remote?", false)?) {
            self.push(runner).await?;
            pushed = true;
        }

        if !self.options.pr {
            return Ok(());
        }
        if !auto_push && !prompter.confirm("Create PR?", false)? {
            return Ok(());
        }
        if !pushed {
            self.push(runner).await?;
        }

        let tool = match &self.settings.pr_tool {
            Some(path) => path.clone(),
            None => default_pr_tool_path()?,
        };
        create_pr(runner, &tool, &self.options.pr_options()).await?;
        Ok(())
    }

    async fn push(&self, runner: &dyn CommandRunner) -> Result<(), WorkflowError> {
        ui::info("Pushing changes...");
        let stdout = push_current_branch(runner).await?;
        ui::success("Changes pushed successfully:");
        if !stdout.trim().is_empty() {
            println!("{}", stdout.trim_end());
        }
        Ok(())
    }
}
