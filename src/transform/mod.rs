//! Source transformations and the file changes they produce.

pub mod supplier;

pub use supplier::SupplierTransform;

use crate::diff::{DiffStyle, unified_diff};
use crate::error::{RefactorError, Result};
use std::path::{Path, PathBuf};

/// A code transformation that can be applied to source files.
pub trait Transform: Send + Sync {
    /// Applies the transformation to the given source code.
    fn apply(&self, source: &str, path: &Path) -> Result<String>;

    /// Returns a description of the transformation.
    fn describe(&self) -> String;
}

/// Represents a change to be applied to a file.
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub original: String,
    pub transformed: String,
    /// Number of chains rewritten in this file.
    pub chains: usize,
}

impl FileChange {
    /// Returns true if the content was modified.
    pub fn is_modified(&self) -> bool {
        self.original != self.transformed
    }

    /// Writes the transformed content to disk.
    pub fn apply(&self) -> Result<()> {
        if self.is_modified() {
            std::fs::write(&self.path, &self.transformed)
                .map_err(|e| RefactorError::file(&self.path, e))?;
        }
        Ok(())
    }

    /// Renders the change as a unified diff.
    pub fn diff(&self, style: DiffStyle) -> String {
        unified_diff(&self.original, &self.transformed, &self.path, style)
    }
}
