//! Java string and char literal grammar: recognition, decoding and encoding.

use regex::Regex;
use std::sync::LazyLock;

static LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*("(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')\s*$"#).expect("literal grammar")
});

/// Returns true if `token` is exactly one quote-delimited literal.
pub fn is_literal(token: &str) -> bool {
    LITERAL.is_match(token)
}

/// Returns the raw text of a literal token with escapes resolved.
///
/// Returns `None` if the token is not a literal.
pub fn decode(token: &str) -> Option<String> {
    let captures = LITERAL.captures(token)?;
    let quoted = captures.get(1)?.as_str();
    Some(unescape(&quoted[1..quoted.len() - 1]))
}

/// Resolves Java escape sequences.
///
/// Unknown escapes are kept verbatim, backslash included.
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(&next) = chars.peek() else {
            out.push('\\');
            break;
        };
        let simple = match next {
            'b' => Some('\u{8}'),
            't' => Some('\t'),
            'n' => Some('\n'),
            'f' => Some('\u{c}'),
            'r' => Some('\r'),
            's' => Some(' '),
            '"' | '\'' | '\\' => Some(next),
            _ => None,
        };
        if let Some(resolved) = simple {
            chars.next();
            out.push(resolved);
        } else if next.is_digit(8) {
            out.push(octal_escape(&mut chars));
        } else if next == 'u' {
            match unicode_escape(&mut chars) {
                Some(resolved) => out.push(resolved),
                None => out.push('\\'),
            }
        } else {
            out.push('\\');
        }
    }

    out
}

/// Consumes up to three octal digits (two if the first is above `3`).
fn octal_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> char {
    let mut value = 0u32;
    let mut max_digits = 3;
    let mut taken = 0;
    while taken < max_digits {
        let Some(digit) = chars.peek().and_then(|c| c.to_digit(8)) else {
            break;
        };
        if taken == 0 && digit > 3 {
            max_digits = 2;
        }
        value = value * 8 + digit;
        taken += 1;
        chars.next();
    }
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Consumes `u+XXXX`, joining a following low surrogate escape if present.
///
/// On malformed input nothing is consumed and `None` is returned.
fn unicode_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<char> {
    let mut lookahead = chars.clone();
    let high = hex_unit(&mut lookahead)?;

    let resolved = if (0xD800..0xDC00).contains(&high) {
        let mut pair = lookahead.clone();
        let low = (pair.next() == Some('\\'))
            .then(|| hex_unit(&mut pair))
            .flatten()
            .filter(|low| (0xDC00..0xE000).contains(low))?;
        lookahead = pair;
        char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))?
    } else {
        char::from_u32(high)?
    };

    *chars = lookahead;
    Some(resolved)
}

fn hex_unit(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<u32> {
    if chars.next() != Some('u') {
        return None;
    }
    while chars.peek() == Some(&'u') {
        chars.next();
    }
    (0..4).try_fold(0u32, |acc, _| Some(acc * 16 + chars.next()?.to_digit(16)?))
}

/// Encodes raw text as the body of a double-quoted Java string literal.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Wraps raw text in double quotes, escaped.
pub fn quote(raw: &str) -> String {
    format!("\"{}\"", escape(raw))
}
