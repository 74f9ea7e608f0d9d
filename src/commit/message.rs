//! The commit message and the clean-up applied to raw model output.

use std::fmt;

use regex_lite::Regex;

use crate::commit::prompt::Style;
use crate::git::TicketId;

/// Characters stripped from the end of single-line messages.
const TRAILING_PUNCTUATION: &[char] = &['.', '!', '?', ',', ';', ':'];

/// A commit message. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    text: String,
}

impl CommitMessage {
    /// Wrap `text`, rejecting messages that are blank after trimming.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { text })
    }

    /// Clean up a raw model response for `style`.
    ///
    /// The response is trimmed. For single-line styles only the first line is
    /// kept and trailing `. ! ? , ; :` are removed; `Detailed` keeps the full
    /// text and its punctuation. Returns `None` if nothing is left.
    pub fn from_response(raw: &str, style: Style) -> Option<Self> {
        let trimmed = raw.trim();
        if !style.is_single_line() {
            return Self::new(trimmed);
        }

        let first_line = trimmed.lines().next().unwrap_or("").trim();
        let stripped = first_line.trim_end_matches(TRAILING_PUNCTUATION).trim_end();
        Self::new(stripped)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the message already mentions `ticket` as a whole word.
    pub fn mentions_ticket(&self, ticket: &TicketId) -> bool {
        let pattern = format!(r"\b{}\b", regex_lite::escape(ticket.as_str()));
        match Regex::new(&pattern) {
            Ok(re) => re.is_match(&self.text),
            Err(_) => self.text.contains(ticket.as_str()),
        }
    }

    /// Prefix `"<ticket>: "` unless the ticket is already present.
    ///
    /// Returns whether the message changed.
    pub fn apply_ticket_prefix(&mut self, ticket: &TicketId) -> bool {
        if self.mentions_ticket(ticket) {
            return false;
        }
        self.text = format!("{}: {}", ticket, self.text);
        true
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
