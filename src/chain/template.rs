//! Message templates built from literal text and placeholders.

use super::literal;
use std::fmt;

/// The placeholder marker understood by the logging API.
pub const PLACEHOLDER: &str = "{}";

const ESCAPED_PLACEHOLDER: &str = r"\{}";

/// One piece of a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder,
}

/// An ordered sequence of literal text and placeholders.
///
/// Literal segments hold decoded text; escaping happens only when the
/// template is rendered back into a string literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw text, merging with a preceding literal segment.
    pub fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Literal(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Literal(text.to_string()));
        }
    }

    pub fn push_placeholder(&mut self) {
        self.segments.push(Segment::Placeholder);
    }

    /// Appends all segments of `other`.
    pub fn append(&mut self, other: Template) {
        for segment in other.segments {
            match segment {
                Segment::Literal(text) => self.push_literal(&text),
                Segment::Placeholder => self.push_placeholder(),
            }
        }
    }

    /// Appends a single space unless the template is empty or already ends in whitespace.
    pub fn separate(&mut self) {
        if !self.is_empty() && !self.ends_with_whitespace() {
            self.push_literal(" ");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn ends_with_whitespace(&self) -> bool {
        match self.segments.last() {
            Some(Segment::Literal(text)) => text.chars().last().is_some_and(char::is_whitespace),
            _ => false,
        }
    }

    /// Number of placeholder segments.
    pub fn placeholders(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder))
            .count()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Renders the template as an SLF4J message pattern.
    ///
    /// The formatter reads `\{}` as literal braces and `\\{}` as a backslash
    /// followed by a placeholder, and copies text after the last consumed
    /// placeholder verbatim. So literal `{}` before the last placeholder is
    /// escaped, and a backslash in front of a placeholder is doubled.
    ///
    /// Returns `None` when literal `\{}` text precedes a placeholder: no
    /// pattern prints it unchanged.
    pub fn to_pattern(&self) -> Option<String> {
        let last = self
            .segments
            .iter()
            .rposition(|s| matches!(s, Segment::Placeholder));
        let mut out = String::new();

        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Placeholder => out.push_str(PLACEHOLDER),
                Segment::Literal(text) if last.is_some_and(|last| idx < last) => {
                    if text.contains(ESCAPED_PLACEHOLDER) {
                        return None;
                    }
                    out.push_str(&text.replace(PLACEHOLDER, ESCAPED_PLACEHOLDER));
                    if text.ends_with('\\') {
                        out.push('\\');
                    }
                }
                Segment::Literal(text) => out.push_str(text),
            }
        }

        Some(out)
    }

    /// Renders the message pattern as a double-quoted, escaped string literal.
    pub fn to_literal(&self) -> Option<String> {
        self.to_pattern().map(|pattern| literal::quote(&pattern))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Placeholder => f.write_str(PLACEHOLDER)?,
            }
        }
        Ok(())
    }
}
