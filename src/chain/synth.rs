//! Turns one supplier expression into a template fragment and its arguments.

use super::cursor::BalancedCursor;
use super::literal;
use super::split::split_top_level;
use super::template::Template;

/// One top-level operand of a concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A string or char literal, escapes resolved.
    StringLiteral { content: String },
    /// Anything else, code whitespace collapsed to single spaces.
    Expression { text: String },
}

impl Token {
    /// Classifies one operand.
    pub fn classify(operand: &str) -> Self {
        match literal::decode(operand) {
            Some(content) => Token::StringLiteral { content },
            None => Token::Expression {
                text: collapse_whitespace(operand.trim()),
            },
        }
    }
}

/// Collapses whitespace runs outside literals to one space.
fn collapse_whitespace(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut cursor = BalancedCursor::new();
    let mut pending_space = false;

    for ch in code.chars() {
        if ch.is_whitespace() && !cursor.in_literal() {
            pending_space = true;
            continue;
        }
        if std::mem::take(&mut pending_space) {
            out.push(' ');
        }
        let mut buf = [0; 4];
        for byte in ch.encode_utf8(&mut buf).bytes() {
            cursor.step(byte);
        }
        out.push(ch);
    }
    out
}

/// Splits a concatenation expression into classified operands.
pub fn tokenize(expr: &str) -> Vec<Token> {
    split_top_level(expr, b'+')
        .into_iter()
        .map(Token::classify)
        .collect()
}

/// Template text and dynamic arguments derived from one closure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub template: Template,
    pub arguments: Vec<String>,
}

impl Fragment {
    /// Appends one placeholder per extra argument, space separated.
    pub fn push_extras<'a>(&mut self, extras: impl IntoIterator<Item = &'a str>) {
        let mut extras = extras.into_iter().peekable();
        if extras.peek().is_none() {
            return;
        }
        self.template.separate();
        for (idx, extra) in extras.enumerate() {
            if idx > 0 {
                self.template.push_literal(" ");
            }
            self.template.push_placeholder();
            self.arguments.push(extra.to_string());
        }
    }
}

/// Builds the fragment for a normalized closure expression.
///
/// Literal operands are inlined; every other operand becomes one placeholder
/// and one argument, in source order.
pub fn synthesize(expr: &str) -> Fragment {
    let mut fragment = Fragment::default();
    for token in tokenize(expr) {
        match token {
            Token::StringLiteral { content } => fragment.template.push_literal(&content),
            Token::Expression { text } => {
                fragment.template.push_placeholder();
                fragment.arguments.push(text);
            }
        }
    }
    fragment
}
