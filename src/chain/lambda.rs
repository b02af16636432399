//! Supplier closure recognition and body normalization.

use regex::Regex;
use std::sync::LazyLock;

static SUPPLIER_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\s*\)\s*->").expect("supplier head"));

static BLOCK_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*\{\s*return\s+(?P<expr>.*?);\s*\}\s*$").expect("block body")
});

/// Returns the body of a zero-parameter closure, or `None` for any other argument.
pub fn supplier_body(argument: &str) -> Option<&str> {
    let head = SUPPLIER_HEAD.find(argument.trim_start())?;
    Some(argument.trim_start()[head.end()..].trim())
}

/// Unwraps `{ return EXPR; }` to `EXPR`; any other body is returned trimmed.
pub fn normalize(body: &str) -> &str {
    match BLOCK_BODY.captures(body).and_then(|c| c.name("expr")) {
        Some(expr) => expr.as_str().trim(),
        None => body.trim(),
    }
}
