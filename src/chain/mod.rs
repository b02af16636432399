//! Supplier-to-parameter rewriting of fluent logging chains.
//!
//! Turns
//!
//! ```text
//! log.atInfo()
//!    .setMessage("{}")
//!    .addArgument(() -> "My Error: "+e+", the parameter="+param)
//!    .log();
//! ```
//!
//! into
//!
//! ```text
//! log.atInfo()
//!    .setMessage("My Error: {}, the parameter={}")
//!    .addArgument(e).addArgument(param)
//!    .log();
//! ```
//!
//! Only chains whose message is exactly `"{}"` are touched, and only
//! `addArgument` calls whose first argument is a zero-parameter closure are
//! inlined. Everything outside the rewritten calls is copied byte for byte.

mod calls;
pub mod cursor;
pub mod dialect;
pub mod lambda;
pub mod literal;
pub mod locate;
pub mod rewrite;
pub mod split;
pub mod synth;
pub mod template;

pub use dialect::ChainDialect;
pub use locate::{ChainLocator, ChainSpan};
pub use rewrite::{ArgumentCall, ChainRewriter, RewritePlan, RewrittenChain};
pub use split::split_top_level;
pub use synth::{Fragment, Token};
pub use template::{Segment, Template};

use std::path::Path;

/// Result of rewriting one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    Unchanged,
    Rewritten { text: String, chains: usize },
}

impl Rewrite {
    /// Returns the new text, if anything changed.
    pub fn text(&self) -> Option<&str> {
        match self {
            Rewrite::Unchanged => None,
            Rewrite::Rewritten { text, .. } => Some(text),
        }
    }

    /// Number of chains that were rewritten.
    pub fn chains(&self) -> usize {
        match self {
            Rewrite::Unchanged => 0,
            Rewrite::Rewritten { chains, .. } => *chains,
        }
    }

    /// Returns the rewritten text, or `original` when nothing changed.
    pub fn into_text(self, original: &str) -> String {
        match self {
            Rewrite::Unchanged => original.to_string(),
            Rewrite::Rewritten { text, .. } => text,
        }
    }
}

/// Rewrites every supplier chain in `source` using the SLF4J dialect.
///
/// `path` is only used for diagnostics.
pub fn rewrite_source(source: &str, path: &Path) -> Rewrite {
    rewrite_with(ChainDialect::slf4j(), source, path)
}

/// Rewrites every supplier chain in `source` using `dialect`.
pub fn rewrite_with(dialect: &ChainDialect, source: &str, path: &Path) -> Rewrite {
    let rewriter = ChainRewriter::new(dialect);
    let mut out = String::new();
    let mut copied = 0;
    let mut chains = 0;

    for span in ChainLocator::new(dialect).locate(source) {
        let Some(chain) = rewriter.rewrite(&span) else {
            tracing::trace!(
                path = %path.display(),
                line = span.line(source),
                "chain has no supplier arguments"
            );
            continue;
        };
        tracing::debug!(
            path = %path.display(),
            line = span.line(source),
            receiver = span.receiver,
            level = span.level,
            arguments = chain.arguments.len(),
            "rewrote supplier chain"
        );
        out.push_str(&source[copied..span.start]);
        out.push_str(&chain.text);
        copied = span.end;
        chains += 1;
    }

    if chains == 0 {
        return Rewrite::Unchanged;
    }
    out.push_str(&source[copied..]);
    Rewrite::Rewritten { text: out, chains }
}
