//! Source file selection.

use crate::error::{RefactorError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Predicates for selecting the source files of a project.
#[derive(Debug, Default, Clone)]
pub struct FileMatcher {
    extensions: Vec<String>,
    include_globs: Vec<String>,
    exclude_globs: Vec<String>,
}

impl FileMatcher {
    /// Creates a new file matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches files with the given extension (without dot).
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extensions.push(ext.into());
        self
    }

    /// Matches files with any of the given extensions.
    pub fn extensions(mut self, exts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions.extend(exts.into_iter().map(Into::into));
        self
    }

    /// Includes files matching the glob pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_globs.push(pattern.into());
        self
    }

    /// Includes files matching any of the glob patterns.
    pub fn includes(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include_globs.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Excludes files matching the glob pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_globs.push(pattern.into());
        self
    }

    /// Excludes files matching any of the glob patterns.
    pub fn excludes(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude_globs.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Collects all matching files under `root`, in file-name order.
    ///
    /// A `root` that is itself a file is returned as-is: naming a file
    /// explicitly selects it regardless of the predicates.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(RefactorError::PathNotFound(root.to_path_buf()));
        }
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }

        let include_set = build_glob_set(&self.include_globs)?;
        let exclude_set = build_glob_set(&self.exclude_globs)?;

        let mut matched = Vec::new();
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }

            if !self.extensions.is_empty() {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                if !self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                    continue;
                }
            }

            let rel_path = path.strip_prefix(root).unwrap_or(path);
            if !self.include_globs.is_empty() && !include_set.is_match(rel_path) {
                continue;
            }
            if exclude_set.is_match(rel_path) {
                continue;
            }

            matched.push(path.to_path_buf());
        }

        Ok(matched)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
