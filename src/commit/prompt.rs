//! Prompt construction for commit message generation.

use std::fmt;

use clap::ValueEnum;

/// Shape of the generated commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Style {
    /// `<type>(<scope>): <description>`, under 50 characters.
    #[default]
    Conventional,
    /// Ultra-short, at most 30 characters.
    Compact,
    /// Summary line plus an explanatory body.
    Detailed,
    /// One brief line under 60 characters.
    Concise,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Conventional => "conventional",
            Style::Compact => "compact",
            Style::Detailed => "detailed",
            Style::Concise => "concise",
        }
    }

    /// Whether the model's answer is cut to its first line and stripped of
    /// trailing punctuation. `Detailed` keeps the body intact.
    pub fn is_single_line(&self) -> bool {
        !matches!(self, Style::Detailed)
    }

    fn instructions(&self) -> &'static str {
        match self {
            Style::Conventional => CONVENTIONAL_INSTRUCTIONS,
            Style::Compact => COMPACT_INSTRUCTIONS,
            Style::Detailed => DETAILED_INSTRUCTIONS,
            Style::Concise => CONCISE_INSTRUCTIONS,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully substituted prompt, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
}

const CONVENTIONAL_INSTRUCTIONS: &str = "
You are a helpful assistant that generates high-quality git commit messages in the \
Conventional Commits format.

Based on the diff below, write a VERY CONCISE and informative commit message in the format:
<type>(<scope>): <description>

Where:
- type: feat, fix, docs, style, refactor, test, chore, etc.
- scope: optional area affected (e.g., component name, file type)
- description: concise description of the change in imperative mood (UNDER 50 CHARACTERS TOTAL)

Do not include a body or footer section. Focus on WHY the change was made, not WHAT was changed.
BE EXTREMELY BRIEF - the entire message should be under 50 characters if possible.
Return ONLY the commit message, nothing else.
";

const COMPACT_INSTRUCTIONS: &str = "
You are a helpful assistant that generates extremely short git commit messages.

Based on the diff below, write an ULTRA-COMPACT commit message:
- MAXIMUM 30 CHARACTERS TOTAL
- Use imperative mood (e.g., \"Add\", \"Fix\", \"Update\", \"Remove\")
- Focus on the core purpose of the change
- Be specific but extremely brief
- No punctuation at the end

Return ONLY the commit message, nothing else.
";

const DETAILED_INSTRUCTIONS: &str = "
You are a helpful assistant that generates high-quality git commit messages with \
detailed explanations.

Based on the diff below, write an informative commit message with:
1. A short, specific summary line (50-72 chars)
2. A detailed description explaining WHY the change was made
3. Any important context or implications

Return ONLY the commit message, nothing else.
";

const CONCISE_INSTRUCTIONS: &str = "
You are a helpful assistant that generates concise git commit messages.

Based on the diff below, write a single line, concise and informative commit message.
- Keep the message under 60 characters
- Focus on WHY the change was made, not WHAT was changed
- Use imperative mood, as if giving a command
- No description or body text

Return ONLY the commit message, nothing else.
";

/// Build the generation prompt for `style`.
///
/// The file list (newline-joined) and the diff are inserted verbatim after
/// the style's instructions.
pub fn build_commit_prompt(diff: &str, style: Style, files: &[String]) -> Prompt {
    let files_text = files.join("\n");
    Prompt {
        text: format!(
            "{}\nChanged files:\n{}\n\nDiff:\n{}\n",
            style.instructions(),
            files_text,
            diff
        ),
    }
}
