//! Error types for the refactoring driver.
//!
//! The rewrite engine itself never fails; these errors come from file
//! selection, file I/O and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for refactoring operations.
#[derive(Error, Debug)]
pub enum RefactorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Glob pattern error: {0}")]
    Glob(#[from] globset::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to process {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RefactorError {
    /// Wraps an I/O error with the file it concerns.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RefactorError::File {
            path: path.into(),
            source,
        }
    }
}

/// A specialized Result type for refactoring operations.
pub type Result<T> = std::result::Result<T, RefactorError>;
