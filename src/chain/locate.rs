//! Locating candidate chains in a source buffer.
//!
//! A chain is found by a small state machine over the code bytes of the
//! buffer (string literals and comments are skipped):
//!
//! 1. *before initial call*: look for `receiver.atLevel()` on a word boundary;
//! 2. *awaiting message call*: look for `.setMessage("{}")`;
//! 3. *awaiting terminal call*: look for `.log()`; the chain ends there.
//!
//! Steps 2 and 3 only accept calls at the chain's own nesting level. A
//! candidate is dropped when its expression ends (`;`, `,`, a brace or an
//! unmatched `)`), when a terminal call arrives before any qualifying message
//! call, or when it grows past the dialect's length bound. Scanning then
//! resumes right after the dropped candidate's initial call, so chains never
//! conflate.

use super::cursor::CodeWalk;
use super::dialect::ChainDialect;
use super::calls::{self, InitialCall, is_ident_byte};
use std::ops::Range;

/// One complete candidate chain, borrowed from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
    pub receiver: &'a str,
    pub level: &'a str,
    /// Absolute range of the first qualifying message call's argument.
    pub message: Range<usize>,
}

impl ChainSpan<'_> {
    /// One-based line number of the chain start in `source`.
    pub fn line(&self, source: &str) -> usize {
        source[..self.start].matches('\n').count() + 1
    }
}

/// Finds chains in source text.
pub struct ChainLocator<'d> {
    dialect: &'d ChainDialect,
}

impl<'d> ChainLocator<'d> {
    pub fn new(dialect: &'d ChainDialect) -> Self {
        Self { dialect }
    }

    /// Returns a lazy iterator over the non-overlapping chains of `source`.
    pub fn locate<'a>(&self, source: &'a str) -> Chains<'a, 'd> {
        Chains {
            source,
            dialect: self.dialect,
            pos: 0,
        }
    }
}

/// Iterator returned by [`ChainLocator::locate`].
pub struct Chains<'a, 'd> {
    source: &'a str,
    dialect: &'d ChainDialect,
    pos: usize,
}

#[derive(Debug, Clone)]
enum State {
    AwaitingMessage,
    AwaitingTerminal { message: Range<usize> },
}

impl Chains<'_, '_> {
    /// Finds the next `receiver.atLevel()` at or after `self.pos`.
    fn next_initial_call(&mut self) -> Option<(usize, InitialCall)> {
        let bytes = self.source.as_bytes();
        let found = CodeWalk::new(self.source, self.pos).find_map(|point| {
            let boundary = point.index == 0 || !is_ident_byte(bytes[point.index - 1]);
            if !boundary {
                return None;
            }
            calls::initial_call(self.dialect, self.source, point.index)
                .map(|call| (point.index, call))
        });
        if found.is_none() {
            self.pos = self.source.len();
        }
        found
    }

    /// Completes a candidate whose initial call ends at `from`.
    ///
    /// Returns the end of the chain and the message argument range.
    fn complete(&self, start: usize, from: usize) -> Option<(usize, Range<usize>)> {
        let limit = start.saturating_add(self.dialect.max_chain_len);
        let mut state = State::AwaitingMessage;
        let mut walk = CodeWalk::new(self.source, from).bounded(limit);

        while let Some(point) = walk.next() {
            if point.depth > 0 {
                continue;
            }
            match point.byte {
                b'.' => {}
                b';' | b',' | b')' | b'{' | b'}' => return None,
                _ => continue,
            }

            match &state {
                State::AwaitingMessage => {
                    if let Some(call) = calls::message_call(self.dialect, self.source, point.index)
                    {
                        walk.jump_to(call.end);
                        state = State::AwaitingTerminal {
                            message: call.argument,
                        };
                    } else if calls::terminal_call(self.dialect, self.source, point.index).is_some()
                    {
                        return None;
                    }
                }
                State::AwaitingTerminal { message } => {
                    if let Some(end) = calls::terminal_call(self.dialect, self.source, point.index) {
                        return Some((end, message.clone()));
                    }
                }
            }
        }

        if limit < self.source.len() {
            tracing::trace!(start, "candidate chain exceeds length bound");
        }
        None
    }
}

impl<'a> Iterator for Chains<'a, '_> {
    type Item = ChainSpan<'a>;

    fn next(&mut self) -> Option<ChainSpan<'a>> {
        let source = self.source;
        loop {
            let (start, initial) = self.next_initial_call()?;
            match self.complete(start, initial.end) {
                Some((end, message)) => {
                    self.pos = end;
                    return Some(ChainSpan {
                        start,
                        end,
                        text: &source[start..end],
                        receiver: &source[initial.receiver],
                        level: &source[initial.level],
                        message,
                    });
                }
                None => self.pos = initial.end,
            }
        }
    }
}
