//! The supplier-chain rewrite as a [`Transform`].

use super::Transform;
use crate::chain::{self, ChainDialect, Rewrite};
use crate::error::Result;
use std::path::Path;

/// Inlines supplier closures of fluent logging chains into their message template.
#[derive(Debug, Clone, Default)]
pub struct SupplierTransform {
    dialect: ChainDialect,
}

impl SupplierTransform {
    /// Creates a transform for the SLF4J dialect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transform for a custom dialect.
    pub fn with_dialect(dialect: ChainDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &ChainDialect {
        &self.dialect
    }

    /// Rewrites `source`, reporting whether and how much changed.
    pub fn rewrite(&self, source: &str, path: &Path) -> Rewrite {
        chain::rewrite_with(&self.dialect, source, path)
    }
}

impl Transform for SupplierTransform {
    fn apply(&self, source: &str, path: &Path) -> Result<String> {
        Ok(self.rewrite(source, path).into_text(source))
    }

    fn describe(&self) -> String {
        format!(
            "Inline supplier arguments of {}.{}{{{}}}() chains into {}(\"{{}}\")",
            self.dialect.receivers.join("|"),
            self.dialect.level_prefix,
            self.dialect.levels.join("|"),
            self.dialect.message_method
        )
    }
}
