//! Ticket ID extraction from branch names (e.g. `feature/SI-1234-description`).

use std::fmt;

use regex_lite::Regex;
use tracing::debug;

use super::CommandRunner;
use super::branch::current_branch;

/// Marker used for branches that intentionally have no ticket.
pub const NOJIRA: &str = "NOJIRA";

/// An issue-tracker identifier such as `SI-1234`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketId(String);

impl TicketId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive a ticket from a branch name.
///
/// Matches an uppercase key, a hyphen and digits, starting at the beginning
/// of the name or right after a `/` or `-`. Branches mentioning `nojira`
/// (any case) map to [`NOJIRA`].
pub fn ticket_from_branch(branch: &str) -> Option<TicketId> {
    let re = Regex::new(r"(?:^|[/-])([A-Z]+-\d+)").expect("Invalid regex");

    if let Some(ticket) = re.captures(branch).and_then(|caps| caps.get(1)) {
        return Some(TicketId(ticket.as_str().to_string()));
    }

    if branch.to_lowercase().contains("nojira") {
        return Some(TicketId(NOJIRA.to_string()));
    }

    None
}

/// Ticket for the currently checked-out branch. Git failures yield `None`.
pub async fn extract_ticket(runner: &dyn CommandRunner) -> Option<TicketId> {
    match current_branch(runner).await {
        Ok(branch) => ticket_from_branch(&branch),
        Err(e) => {
            debug!("Could not read current branch for ticket prefix: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::runner::script::CommandScript;

    fn ticket(branch: &str) -> Option<String> {
        ticket_from_branch(branch).map(|t| t.to_string())
    }

    #[test]
    fn test_ticket_after_slash() {
        assert_eq!(ticket("feature/SI-1234-desc"), Some("SI-1234".to_string()));
    }

    #[test]
    fn test_ticket_at_start() {
        assert_eq!(ticket("JIRA-5678-fix-login"), Some("JIRA-5678".to_string()));
    }

    #[test]
    fn test_ticket_after_hyphen() {
        assert_eq!(ticket("hotfix-ABC-901"), Some("ABC-901".to_string()));
    }

    #[test]
    fn test_ticket_requires_separator_before_key() {
        // "xSI-12" has no separator before the uppercase key
        assert_eq!(ticket("featurexSI-12"), None);
    }

    #[test]
    fn test_lowercase_key_is_not_a_ticket() {
        assert_eq!(ticket("feature/si-1234"), None);
    }

    #[test]
    fn test_nojira_any_case() {
        assert_eq!(ticket("chore/nojira-cleanup"), Some(NOJIRA.to_string()));
        assert_eq!(ticket("chore/NoJira"), Some(NOJIRA.to_string()));
    }

    #[test]
    fn test_ticket_wins_over_nojira() {
        assert_eq!(ticket("nojira/SI-42"), Some("SI-42".to_string()));
    }

    #[test]
    fn test_plain_branch_has_no_ticket() {
        assert_eq!(ticket("main"), None);
    }

    #[tokio::test]
    async fn test_extract_ticket_reads_current_branch() {
        let runner = CommandScript::new()
            .expect("git rev-parse --abbrev-ref HEAD", 0, "feature/SI-1234-desc\n", "")
            .build();
        assert_eq!(
            extract_ticket(&runner).await,
            Some(TicketId("SI-1234".to_string()))
        );
    }

    #[tokio::test]
    async fn test_extract_ticket_swallows_git_failure() {
        let runner = CommandScript::new()
            .expect(
                "git rev-parse --abbrev-ref HEAD",
                128,
                "",
                "fatal: ambiguous argument 'HEAD'\n",
            )
            .build();
        assert_eq!(extract_ticket(&runner).await, None);
    }
}
