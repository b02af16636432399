//! Top-level splitting of argument lists and concatenations.

use super::cursor::BalancedCursor;

/// Splits `text` at every `separator` found at depth zero outside literals.
///
/// Parts are trimmed and empty parts are dropped. The same routine splits
/// call arguments (`b','`) and string concatenations (`b'+'`).
///
/// A run of `+` is paired off from the left the way a Java lexer reads
/// `++`: only an odd one out, the last of the run, splits. So `i++`,
/// `++i` and `a+++b` keep their increments.
pub fn split_top_level(text: &str, separator: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut cursor = BalancedCursor::new();
    let mut start = 0;
    let mut idx = 0;

    while idx < bytes.len() {
        let byte = bytes[idx];
        if byte == separator && cursor.at_top_level() {
            let run = if separator == b'+' {
                bytes[idx..].iter().take_while(|&&b| b == b'+').count()
            } else {
                1
            };
            if run % 2 == 1 {
                let at = idx + run - 1;
                push_part(&mut parts, &text[start..at]);
                start = at + 1;
            }
            idx += run;
            continue;
        }
        cursor.step(byte);
        idx += 1;
    }
    push_part(&mut parts, &text[start..]);

    parts
}

fn push_part<'a>(parts: &mut Vec<&'a str>, part: &'a str) {
    let part = part.trim();
    if !part.is_empty() {
        parts.push(part);
    }
}
