//! Fixed-shape token matchers for the chain calls.
//!
//! Each matcher checks whether one call of the chain grammar starts at a given
//! code position and reports where it ends. Whitespace (including newlines)
//! is allowed between every token.

use super::dialect::ChainDialect;
use std::ops::Range;

/// Returns true for bytes that can continue a Java identifier.
pub fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$' || byte >= 0x80
}

#[derive(Clone, Copy)]
struct Scan<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scan<'a> {
    fn at(text: &'a str, pos: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos,
        }
    }

    fn skip_ws(mut self) -> Self {
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }
        self
    }

    fn eat(self, token: &str) -> Option<Self> {
        self.bytes[self.pos..]
            .starts_with(token.as_bytes())
            .then_some(Self {
                pos: self.pos + token.len(),
                ..self
            })
    }

    /// Like [`Scan::eat`] but refuses to stop in the middle of an identifier.
    fn word(self, word: &str) -> Option<Self> {
        let next = self.eat(word)?;
        match next.bytes.get(next.pos) {
            Some(&byte) if is_ident_byte(byte) => None,
            _ => Some(next),
        }
    }

    fn empty_parens(self) -> Option<Self> {
        self.skip_ws().eat("(")?.skip_ws().eat(")")
    }
}

/// A matched `receiver.atLevel()` call. Ranges are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialCall {
    pub end: usize,
    pub receiver: Range<usize>,
    pub level: Range<usize>,
}

/// Matches `receiver . atLevel ( )` at `pos`.
///
/// The caller is responsible for the word boundary in front of `pos`.
pub fn initial_call(dialect: &ChainDialect, text: &str, pos: usize) -> Option<InitialCall> {
    let start = Scan::at(text, pos);
    dialect.receivers.iter().find_map(|receiver| {
        let after_prefix = start
            .word(receiver)?
            .skip_ws()
            .eat(".")?
            .skip_ws()
            .eat(&dialect.level_prefix)?;
        dialect.levels.iter().find_map(|level| {
            let end = after_prefix.word(level)?.empty_parens()?;
            Some(InitialCall {
                end: end.pos,
                receiver: pos..pos + receiver.len(),
                level: after_prefix.pos..after_prefix.pos + level.len(),
            })
        })
    })
}

/// A matched `.setMessage("{}")` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCall {
    pub end: usize,
    /// Everything between the call's parentheses.
    pub argument: Range<usize>,
}

/// Matches `. setMessage ( "{}" )` at `pos`, whitespace allowed inside the quotes.
pub fn message_call(dialect: &ChainDialect, text: &str, pos: usize) -> Option<MessageCall> {
    let open = Scan::at(text, pos)
        .eat(".")?
        .skip_ws()
        .word(&dialect.message_method)?
        .skip_ws()
        .eat("(")?;
    let close = open
        .skip_ws()
        .eat("\"")?
        .skip_ws()
        .eat("{}")?
        .skip_ws()
        .eat("\"")?
        .skip_ws();
    let end = close.eat(")")?;
    Some(MessageCall {
        end: end.pos,
        argument: open.pos..close.pos,
    })
}

/// Matches `. log ( )` at `pos` and returns the end of the call.
pub fn terminal_call(dialect: &ChainDialect, text: &str, pos: usize) -> Option<usize> {
    Scan::at(text, pos)
        .eat(".")?
        .skip_ws()
        .word(&dialect.terminal_method)?
        .empty_parens()
        .map(|scan| scan.pos)
}

/// Matches `. addArgument (` at `pos` and returns the offset just past the `(`.
pub fn argument_call_open(dialect: &ChainDialect, text: &str, pos: usize) -> Option<usize> {
    Scan::at(text, pos)
        .eat(".")?
        .skip_ws()
        .word(&dialect.argument_method)?
        .skip_ws()
        .eat("(")
        .map(|scan| scan.pos)
}
