//! The refactoring driver: file selection, per-file rewriting and write-back.

use crate::chain::Rewrite;
use crate::config::RefactorConfig;
use crate::diff::{DiffStyle, DiffSummary};
use crate::error::{RefactorError, Result};
use crate::matcher::FileMatcher;
use crate::transform::{FileChange, SupplierTransform, Transform};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// The result of a refactoring run.
#[derive(Debug)]
pub struct RefactorResult {
    /// Files whose content changed, in file-name order.
    pub changes: Vec<FileChange>,
    /// Files that could not be read or written.
    pub failures: Vec<RefactorError>,
    pub files_scanned: usize,
    pub summary: DiffSummary,
    pub dry_run: bool,
}

impl RefactorResult {
    /// Returns the number of files that were (or would be) modified.
    pub fn files_modified(&self) -> usize {
        self.changes.iter().filter(|c| c.is_modified()).count()
    }

    /// Total number of rewritten chains.
    pub fn chains_rewritten(&self) -> usize {
        self.changes.iter().map(|c| c.chains).sum()
    }

    /// Generates a diff of all changes.
    pub fn diff(&self, style: DiffStyle) -> String {
        self.changes
            .iter()
            .filter(|c| c.is_modified())
            .map(|c| c.diff(style))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One-line run summary.
    pub fn report(&self) -> String {
        format!(
            "Scanned {} files. {} {} files.",
            self.files_scanned,
            if self.dry_run { "Would change" } else { "Changed" },
            self.files_modified()
        )
    }
}

/// The main refactoring builder.
///
/// ```rust,no_run
/// use log_unsupplier::prelude::*;
///
/// let result = Refactor::in_repo("./my-service")
///     .exclude("**/generated/**")
///     .dry_run()
///     .apply()?;
///
/// println!("{}", result.report());
/// # Ok::<(), log_unsupplier::error::RefactorError>(())
/// ```
pub struct Refactor {
    root: PathBuf,
    config: RefactorConfig,
    dry_run: bool,
}

impl Refactor {
    /// Creates a new refactor operation rooted at the given path.
    pub fn in_repo(path: impl Into<PathBuf>) -> Self {
        Self {
            root: path.into(),
            config: RefactorConfig::default(),
            dry_run: false,
        }
    }

    /// Creates a new refactor operation in the current directory.
    pub fn current_dir() -> Result<Self> {
        Ok(Self::in_repo(std::env::current_dir()?))
    }

    /// Replaces the run configuration.
    pub fn config(mut self, config: RefactorConfig) -> Self {
        self.config = config;
        self
    }

    /// Restricts the run to the given extensions.
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.config.extensions = extensions;
        self
    }

    /// Includes only files matching the glob pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.config.include_patterns.push(pattern.into());
        self
    }

    /// Excludes files matching the glob pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.config.exclude_patterns.push(pattern.into());
        self
    }

    /// Enables dry-run mode (preview changes without applying).
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Returns the root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Applies the refactoring and returns the result.
    ///
    /// Per-file failures are collected in [`RefactorResult::failures`] and do
    /// not stop the run.
    pub fn apply(self) -> Result<RefactorResult> {
        let matcher: FileMatcher = self.config.file_matcher();
        let files = matcher.collect(&self.root)?;
        let transform = SupplierTransform::with_dialect(self.config.dialect.clone());
        let dry_run = self.dry_run;

        tracing::info!(
            root = %self.root.display(),
            files = files.len(),
            dry_run,
            transform = %transform.describe(),
            "scanning sources"
        );

        let outcomes: Vec<Result<Option<FileChange>>> = files
            .par_iter()
            .map(|path| process_file(&transform, path, dry_run))
            .collect();

        let mut changes = Vec::new();
        let mut failures = Vec::new();
        let mut summary = DiffSummary::default();
        for outcome in outcomes {
            match outcome {
                Ok(Some(change)) => {
                    summary.merge(&DiffSummary::from_diff(
                        &change.original,
                        &change.transformed,
                        change.chains,
                    ));
                    changes.push(change);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!("{err}");
                    failures.push(err);
                }
            }
        }

        Ok(RefactorResult {
            changes,
            failures,
            files_scanned: files.len(),
            summary,
            dry_run,
        })
    }

    /// Runs the refactoring in preview mode and returns the diff.
    pub fn preview(self) -> Result<String> {
        let result = self.dry_run().apply()?;
        Ok(result.diff(DiffStyle::Plain))
    }
}

/// Rewrites one file, writing it back unless `dry_run` is set.
fn process_file(
    transform: &SupplierTransform,
    path: &Path,
    dry_run: bool,
) -> Result<Option<FileChange>> {
    let bytes = fs::read(path).map_err(|e| RefactorError::file(path, e))?;
    let original = String::from_utf8_lossy(&bytes).into_owned();

    let (transformed, chains) = match transform.rewrite(&original, path) {
        Rewrite::Unchanged => return Ok(None),
        Rewrite::Rewritten { text, chains } => (text, chains),
    };

    let change = FileChange {
        path: path.to_path_buf(),
        original,
        transformed,
        chains,
    };
    if !dry_run {
        change.apply()?;
    }
    tracing::info!(path = %path.display(), chains, dry_run, "transformed");
    Ok(Some(change))
}
