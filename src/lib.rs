//! # Log Unsupplier
//!
//! Rewrites SLF4J fluent logging chains so that supplier closures passed to
//! `addArgument` are folded into the `setMessage` template.
//!
//! ```java
//! log.atInfo().setMessage("{}").addArgument(() -> "user=" + id).log();
//! // becomes
//! log.atInfo().setMessage("user={}").addArgument(id).log();
//! ```
//!
//! This crate provides:
//! - A text-level chain locator that skips string literals and comments
//! - A rewriter that turns `"literal" + expr` concatenations into `{}` placeholders
//! - A file-level driver with glob filtering, dry runs and unified diffs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use log_unsupplier::prelude::*;
//!
//! let result = Refactor::in_repo("./my-service")
//!     .exclude("**/generated/**")
//!     .dry_run()
//!     .apply()?;
//!
//! println!("{}", result.diff(DiffStyle::Plain));
//! println!("{}", result.report());
//! # Ok::<(), log_unsupplier::error::RefactorError>(())
//! ```
//!
//! ## Rewriting a Single Source
//!
//! ```rust
//! use log_unsupplier::prelude::*;
//! use std::path::Path;
//!
//! let source = r#"log.atDebug().setMessage("{}").addArgument(() -> "n=" + n).log();"#;
//! let rewritten = rewrite_source(source, Path::new("A.java")).into_text(source);
//!
//! assert_eq!(
//!     rewritten,
//!     r#"log.atDebug().setMessage("n={}").addArgument(n).log();"#
//! );
//! ```
//!
//! ## Custom Loggers
//!
//! ```rust,no_run
//! use log_unsupplier::prelude::*;
//!
//! let config = RefactorConfig::load("unsupplier.yaml")?;
//! let result = Refactor::in_repo(".").config(config).apply()?;
//!
//! println!("{}", result.summary);
//! # Ok::<(), log_unsupplier::error::RefactorError>(())
//! ```

pub mod chain;
pub mod config;
pub mod diff;
pub mod error;
pub mod matcher;
pub mod refactor;
pub mod transform;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::chain::{
        ChainDialect, ChainLocator, ChainRewriter, ChainSpan, Rewrite, Template, rewrite_source,
        rewrite_with,
    };
    pub use crate::config::RefactorConfig;
    pub use crate::diff::{DiffStyle, DiffSummary};
    pub use crate::error::{RefactorError, Result};
    pub use crate::matcher::FileMatcher;
    pub use crate::refactor::{Refactor, RefactorResult};
    pub use crate::transform::{FileChange, SupplierTransform, Transform};
}

pub use prelude::*;
