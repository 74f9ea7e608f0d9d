//! llm-commit - CLI entry point.

use std::env;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use llm_commit::commit::Style;
use llm_commit::config::{RunOptions, Settings};
use llm_commit::github::DEFAULT_BASE;
use llm_commit::llm::DEFAULT_MODEL;
use llm_commit::ui;
use llm_commit::{CommitWorkflow, WorkflowError};

/// How long an interrupted run gets to clean up (temp file, editor child).
const INTERRUPT_GRACE: Duration = Duration::from_secs(2);

/// Generate git commit messages with a local Ollama model.
#[derive(Parser, Debug)]
#[command(name = "llm-commit")]
#[command(about = "Generate git commit messages using a local Ollama model")]
#[command(version)]
struct Cli {
    /// Ollama model to use
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Edit the generated message before committing
    #[arg(short, long)]
    edit: bool,

    /// Generate a message but do not commit
    #[arg(short, long)]
    dry_run: bool,

    /// Show the changed files, diff and prompt
    #[arg(short, long)]
    verbose: bool,

    /// Commit message style
    #[arg(short, long, value_enum, default_value_t = Style::Conventional)]
    style: Style,

    /// Prefix the message with the ticket ID from the branch name
    #[arg(short, long)]
    prefix: bool,

    /// Push after committing
    #[arg(long)]
    push: bool,

    /// Skip the commit, push and PR confirmations
    #[arg(short, long)]
    yes: bool,

    /// Create or switch to this branch before committing
    #[arg(short, long, value_name = "NAME")]
    branch: Option<String>,

    /// Create a PR after committing and pushing
    #[arg(long)]
    pr: bool,

    /// Base branch for the PR
    #[arg(long, default_value = DEFAULT_BASE)]
    base: String,

    /// Edit the PR description before creating it
    #[arg(long)]
    pr_edit: bool,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        RunOptions {
            model: cli.model,
            style: cli.style,
            edit: cli.edit,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
            prefix: cli.prefix,
            push: cli.push,
            yes: cli.yes,
            branch: cli.branch,
            pr: cli.pr,
            base: cli.base,
            pr_edit: cli.pr_edit,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {err:#}", "Error:".red());
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workdir = env::current_dir().context("Failed to read the current directory")?;
    let workflow = CommitWorkflow::new(cli.into(), Settings::from_env(), workdir)
        .context("Failed to set up llm-commit")?;

    let mut task = tokio::spawn(async move { workflow.run().await });
    let finished = tokio::select! {
        joined = &mut task => Some(joined),
        _ = tokio::signal::ctrl_c() => None,
    };

    let result = match finished {
        Some(joined) => joined.context("Commit workflow stopped unexpectedly")?,
        None => {
            task.abort();
            if tokio::time::timeout(INTERRUPT_GRACE, &mut task).await.is_err() {
                debug!("Workflow did not stop within {:?}", INTERRUPT_GRACE);
            }
            Err(WorkflowError::Interrupted)
        }
    };

    match result {
        Ok(outcome) => {
            debug!("Run finished: {:?}", outcome);
            Ok(())
        }
        Err(WorkflowError::Interrupted) => {
            println!();
            ui::warn("Operation cancelled by user");
            // A prompt blocked on the terminal can outlive the runtime; leave now.
            process::exit(0);
        }
        Err(err) => Err(err.into()),
    }
}

/// stderr logging: `warn` by default, `debug` for this crate with `-v`,
/// `RUST_LOG` wins when set.
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,llm_commit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
