//! Pull request hand-off to the external `llm_pr` tool.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PrError;
use crate::git::{CommandRunner, git};
use crate::llm::DEFAULT_MODEL;
use crate::ui;

/// Base branch PRs target unless `--base` says otherwise.
pub const DEFAULT_BASE: &str = "main";

/// File name of the PR tool installed alongside this binary.
pub const PR_TOOL_NAME: &str = "llm_pr";

/// What to forward to the PR tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrOptions {
    pub model: String,
    pub edit: bool,
    pub base: String,
}

impl Default for PrOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            edit: false,
            base: DEFAULT_BASE.to_string(),
        }
    }
}

/// Arguments for the PR tool. Defaults are left implicit.
pub fn pr_tool_args(options: &PrOptions) -> Vec<String> {
    let mut args = Vec::new();
    if options.model != DEFAULT_MODEL {
        args.push("-m".to_string());
        args.push(options.model.clone());
    }
    if options.edit {
        args.push("-e".to_string());
    }
    if options.base != DEFAULT_BASE {
        args.push("-b".to_string());
        args.push(options.base.clone());
    }
    args
}

/// `llm_pr` in the directory of the running executable.
pub fn default_pr_tool_path() -> Result<PathBuf, PrError> {
    let exe = env::current_exe().map_err(PrError::ToolPath)?;
    let dir = exe.parent().ok_or_else(|| {
        PrError::ToolPath(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "executable has no parent directory",
        ))
    })?;
    Ok(dir.join(format!("{}{}", PR_TOOL_NAME, env::consts::EXE_SUFFIX)))
}

/// Make sure `base` exists locally, fetching it from the first remote if not.
///
/// Returns false (after a warning) when the branch could not be made
/// available. Never fails: PR creation goes ahead regardless.
pub async fn ensure_base_branch(runner: &dyn CommandRunner, base: &str) -> bool {
    match git(runner, &["rev-parse", "--verify", "--quiet", base]).await {
        Ok(output) if output.success() => return true,
        Ok(_) => {}
        Err(e) => {
            ui::warn(format!("Could not check base branch '{base}': {e}"));
            return false;
        }
    }

    let remote = match git(runner, &["remote"]).await {
        Ok(output) if output.success() => {
            output.stdout.lines().next().map(|l| l.trim().to_string())
        }
        Ok(output) => {
            debug!("git remote failed: {}", output.stderr.trim());
            None
        }
        Err(e) => {
            debug!("git remote failed: {}", e);
            None
        }
    };
    let Some(remote) = remote.filter(|r| !r.is_empty()) else {
        ui::warn(format!(
            "Base branch '{base}' not found locally and no remote is configured."
        ));
        return false;
    };

    ui::info(format!("Fetching base branch '{base}' from {remote}..."));
    let refspec = format!("{base}:{base}");
    match git(runner, &["fetch", &remote, &refspec]).await {
        Ok(output) if output.success() => true,
        Ok(output) => {
            ui::warn(format!(
                "Could not fetch base branch '{base}' from {remote}: {}",
                output.stderr.trim()
            ));
            false
        }
        Err(e) => {
            ui::warn(format!("Could not fetch base branch '{base}' from {remote}: {e}"));
            false
        }
    }
}

/// Run the PR tool at `tool` on the terminal's stdin, relaying its output.
pub async fn create_pr(
    runner: &dyn CommandRunner,
    tool: &Path,
    options: &PrOptions,
) -> Result<(), PrError> {
    ui::info("Creating PR...");
    ensure_base_branch(runner, &options.base).await;

    let tool = tool.to_string_lossy();
    let args = pr_tool_args(options);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

    let command_line = std::iter::once(&*tool)
        .chain(arg_refs.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    ui::info(format!("Running: {command_line}"));

    let output = runner.run_interactive(&tool, &arg_refs).await?;
    if !output.stdout.is_empty() {
        print!("{}", output.stdout);
    }
    if !output.stderr.is_empty() {
        eprint!("{}", output.stderr);
    }

    if !output.success() {
        ui::error("Error creating PR. See details above.");
        return Err(PrError::Failed { code: output.code });
    }
    Ok(())
}
