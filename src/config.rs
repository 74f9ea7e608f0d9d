//! Run options and environment-derived settings.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::commit::{Style, editor_from_env};
use crate::github::{DEFAULT_BASE, PrOptions};
use crate::llm::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Overrides the Ollama base URL.
pub const OLLAMA_URL_ENV_VAR: &str = "LLM_COMMIT_OLLAMA_URL";

/// HTTP timeout for the generation call, in seconds.
pub const TIMEOUT_ENV_VAR: &str = "LLM_COMMIT_TIMEOUT";

/// Overrides the location of the PR tool.
pub const PR_TOOL_ENV_VAR: &str = "LLM_COMMIT_PR_TOOL";

/// Options chosen on the command line for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub model: String,
    pub style: Style,
    pub edit: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub prefix: bool,
    pub push: bool,
    pub yes: bool,
    pub branch: Option<String>,
    pub pr: bool,
    pub base: String,
    pub pr_edit: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            style: Style::default(),
            edit: false,
            dry_run: false,
            verbose: false,
            prefix: false,
            push: false,
            yes: false,
            branch: None,
            pr: false,
            base: DEFAULT_BASE.to_string(),
            pr_edit: false,
        }
    }
}

impl RunOptions {
    /// Push without asking: `--push`, or `--pr` in `--yes` mode.
    pub fn auto_push(&self) -> bool {
        self.push || (self.yes && self.pr)
    }

    pub fn pr_options(&self) -> PrOptions {
        PrOptions {
            model: self.model.clone(),
            edit: self.pr_edit,
            base: self.base.clone(),
        }
    }
}

/// Settings read from the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub ollama_url: String,
    /// `None` waits for the model indefinitely.
    pub timeout: Option<Duration>,
    pub editor: String,
    /// `None` means `llm_pr` next to the running executable.
    pub pr_tool: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            editor: crate::commit::DEFAULT_EDITOR.to_string(),
            pr_tool: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            ollama_url: non_empty_var(OLLAMA_URL_ENV_VAR)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: get_timeout(),
            editor: editor_from_env(),
            pr_tool: non_empty_var(PR_TOOL_ENV_VAR).map(PathBuf::from),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read the generation timeout.
///
/// Unset or empty means no timeout. Logs a warning and ignores the value if
/// it is not a positive whole number of seconds.
fn get_timeout() -> Option<Duration> {
    let value = non_empty_var(TIMEOUT_ENV_VAR)?;
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            warn!(
                "Invalid {} value '{}', waiting without a timeout",
                TIMEOUT_ENV_VAR, value
            );
            None
        }
    }
}
