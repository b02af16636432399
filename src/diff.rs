//! Diff generation for previewing rewrites.

use similar::{ChangeTag, TextDiff};
use std::path::Path;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// How a diff is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiffStyle {
    #[default]
    Plain,
    /// ANSI-colored for terminal display.
    Colorized,
}

impl DiffStyle {
    fn paint(self, color: &'static str) -> (&'static str, &'static str) {
        match self {
            DiffStyle::Plain => ("", ""),
            DiffStyle::Colorized => (color, RESET),
        }
    }
}

/// Generates a unified diff between two strings.
pub fn unified_diff(original: &str, modified: &str, path: &Path, style: DiffStyle) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let mut output = String::new();

    let (open, close) = style.paint(CYAN);
    output.push_str(&format!("{open}--- a/{}{close}\n", path.display()));
    output.push_str(&format!("{open}+++ b/{}{close}\n", path.display()));

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 && style == DiffStyle::Plain {
            output.push('\n');
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, (open, close)) = match change.tag() {
                    ChangeTag::Delete => ("-", style.paint(RED)),
                    ChangeTag::Insert => ("+", style.paint(GREEN)),
                    ChangeTag::Equal => (" ", ("", "")),
                };
                output.push_str(&format!("{open}{sign}{}{close}", change.value()));
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    output
}

/// Represents a summary of changes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffSummary {
    pub files_changed: usize,
    pub chains_rewritten: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffSummary {
    /// Creates a summary from original and modified content.
    pub fn from_diff(original: &str, modified: &str, chains: usize) -> Self {
        let diff = TextDiff::from_lines(original, modified);
        let mut insertions = 0;
        let mut deletions = 0;

        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => insertions += 1,
                ChangeTag::Delete => deletions += 1,
                ChangeTag::Equal => {}
            }
        }

        Self {
            files_changed: usize::from(insertions > 0 || deletions > 0),
            chains_rewritten: chains,
            insertions,
            deletions,
        }
    }

    /// Combines two summaries.
    pub fn merge(&mut self, other: &DiffSummary) {
        self.files_changed += other.files_changed;
        self.chains_rewritten += other.chains_rewritten;
        self.insertions += other.insertions;
        self.deletions += other.deletions;
    }
}

impl std::fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} file(s) changed, {} chain(s) rewritten, {} insertions(+), {} deletions(-)",
            self.files_changed, self.chains_rewritten, self.insertions, self.deletions
        )
    }
}
