//! Pull request creation via the companion `llm_pr` tool.

pub mod pr;

pub use pr::{
    DEFAULT_BASE, PR_TOOL_NAME, PrOptions, create_pr, default_pr_tool_path, ensure_base_branch,
    pr_tool_args,
};
