//! Balanced cursor: the literal- and nesting-aware scanning primitive.
//!
//! Every scan in the engine (top-level splitting, call-boundary matching and
//! chain location) feeds bytes through a [`BalancedCursor`]. Keeping one state
//! machine guarantees that escapes, quotes and parentheses are treated the same
//! way everywhere.
//!
//! All delimiters are ASCII, so the cursor works on bytes. Positions it reports
//! are always valid `str` slice boundaries.

/// How a byte was interpreted by [`BalancedCursor::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Part of a string or char literal, including both quotes.
    Literal,
    /// An opening parenthesis outside any literal.
    Open,
    /// A closing parenthesis outside any literal.
    Close,
    /// Any other byte outside a literal.
    Code,
}

/// Tracks parenthesis depth and string-literal/escape state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalancedCursor {
    depth: usize,
    quote: Option<u8>,
    escaped: bool,
}

impl BalancedCursor {
    /// Creates a cursor at depth zero outside any literal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current parenthesis depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True while inside a string or char literal.
    pub fn in_literal(&self) -> bool {
        self.quote.is_some()
    }

    /// True when neither nested nor inside a literal.
    pub fn at_top_level(&self) -> bool {
        self.depth == 0 && self.quote.is_none()
    }

    /// Advances the state machine by one byte.
    pub fn step(&mut self, byte: u8) -> Step {
        if let Some(quote) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if byte == b'\\' {
                self.escaped = true;
            } else if byte == quote {
                self.quote = None;
            }
            return Step::Literal;
        }

        match byte {
            b'"' | b'\'' => {
                self.quote = Some(byte);
                Step::Literal
            }
            b'(' => {
                self.depth += 1;
                Step::Open
            }
            b')' => {
                self.depth = self.depth.saturating_sub(1);
                Step::Close
            }
            _ => Step::Code,
        }
    }

    /// Drops any open literal at a line break.
    ///
    /// Java string and char literals cannot contain a raw newline, so a quote
    /// still open here came from something that is not a literal at all.
    pub fn break_line(&mut self) {
        self.quote = None;
        self.escaped = false;
    }
}

/// Returns the offset of the `)` that closes an already-consumed `(`.
///
/// `text` starts immediately after the opening parenthesis. Parentheses in
/// literals and comments are ignored.
pub fn matching_paren(text: &str) -> Option<usize> {
    CodeWalk::new(text, 0)
        .find(|point| point.byte == b')' && point.depth == 0)
        .map(|point| point.index)
}

/// Returns true if `text` contains a `//` or `/*` comment outside literals.
pub fn contains_comment(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut cursor = BalancedCursor::new();
    bytes.iter().enumerate().any(|(idx, &byte)| {
        if byte == b'\n' {
            cursor.break_line();
            return false;
        }
        if !cursor.in_literal() && byte == b'/' && matches!(bytes.get(idx + 1), Some(b'/' | b'*')) {
            return true;
        }
        cursor.step(byte);
        false
    })
}

/// A code byte reported by [`CodeWalk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePoint {
    pub index: usize,
    pub byte: u8,
    /// Parenthesis depth before this byte was consumed.
    pub depth: usize,
}

/// Walks the code bytes of a text, skipping literals and comments.
///
/// Comments are recognized only here; the splitter never sees them because it
/// operates on argument lists and expressions already cut out of the code.
pub struct CodeWalk<'a> {
    bytes: &'a [u8],
    pos: usize,
    end: usize,
    cursor: BalancedCursor,
}

impl<'a> CodeWalk<'a> {
    /// Starts walking `text` at byte offset `from`, which must be a code position.
    pub fn new(text: &'a str, from: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: from,
            end: text.len(),
            cursor: BalancedCursor::new(),
        }
    }

    /// Stops the walk at byte offset `end`.
    pub fn bounded(mut self, end: usize) -> Self {
        self.end = end.min(self.bytes.len());
        self
    }

    /// Resumes the walk at `pos` without feeding the skipped bytes to the cursor.
    ///
    /// The skipped region must be balanced and literal-free at its end.
    pub fn jump_to(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn skip_comment(&mut self) -> bool {
        if self.cursor.in_literal() || self.bytes[self.pos] != b'/' {
            return false;
        }
        let rest = &self.bytes[self.pos..];
        if rest.starts_with(b"//") {
            self.pos = find_from(self.bytes, self.pos + 2, b"\n").unwrap_or(self.bytes.len());
            true
        } else if rest.starts_with(b"/*") {
            self.pos = find_from(self.bytes, self.pos + 2, b"*/")
                .map(|end| end + 2)
                .unwrap_or(self.bytes.len());
            true
        } else {
            false
        }
    }
}

impl Iterator for CodeWalk<'_> {
    type Item = CodePoint;

    fn next(&mut self) -> Option<CodePoint> {
        while self.pos < self.end {
            if self.skip_comment() {
                continue;
            }

            let index = self.pos;
            let byte = self.bytes[index];
            self.pos += 1;

            if byte == b'\n' {
                self.cursor.break_line();
                continue;
            }

            let depth = self.cursor.depth();
            if self.cursor.step(byte) != Step::Literal {
                return Some(CodePoint { index, byte, depth });
            }
        }
        None
    }
}

fn find_from(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}
