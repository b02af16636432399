//! Serializable configuration for a refactoring run.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::chain::ChainDialect;
use crate::error::{RefactorError, Result};
use crate::matcher::FileMatcher;

/// Which files to scan and which chain dialect to rewrite.
///
/// Can be saved to and loaded from YAML or JSON files.
///
/// # Example YAML
///
/// ```yaml
/// extensions:
///   - java
/// exclude_patterns:
///   - "**/generated/**"
/// dialect:
///   receivers: [log, LOG, logger]
///   max_chain_len: 32768
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefactorConfig {
    /// Chain vocabulary.
    pub dialect: ChainDialect,

    /// File extensions to scan (without dot).
    pub extensions: Vec<String>,

    /// Glob patterns a file must match, relative to the root.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_patterns: Vec<String>,

    /// Glob patterns to exclude, relative to the root.
    pub exclude_patterns: Vec<String>,
}

impl Default for RefactorConfig {
    fn default() -> Self {
        Self {
            dialect: ChainDialect::default(),
            extensions: vec!["java".to_string()],
            include_patterns: Vec::new(),
            exclude_patterns: vec![
                "**/target/**".to_string(),
                "**/build/**".to_string(),
                "**/.git/**".to_string(),
            ],
        }
    }
}

impl RefactorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the target extensions.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Adds an include pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Adds an exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Builds the file matcher described by this config.
    pub fn file_matcher(&self) -> FileMatcher {
        FileMatcher::new()
            .extensions(self.extensions.iter().cloned())
            .includes(self.include_patterns.iter().cloned())
            .excludes(self.exclude_patterns.iter().cloned())
    }

    /// Loads a config, choosing the format by extension (`.json`, otherwise YAML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(path),
            _ => Self::from_yaml(path),
        }
    }

    /// Load config from a YAML file.
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_yaml::from_str(&content).map_err(|e| {
            RefactorError::InvalidConfig(format!("Failed to parse YAML config: {}", e))
        })
    }

    /// Load config from a JSON file.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| {
            RefactorError::InvalidConfig(format!("Failed to parse JSON config: {}", e))
        })
    }

    /// Save config to a YAML file.
    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(|e| {
            RefactorError::InvalidConfig(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| RefactorError::file(path.as_ref(), e))
    }

    /// Save config to a JSON file.
    pub fn to_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| RefactorError::file(path.as_ref(), e))
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        RefactorError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read config file {}: {}", path.display(), e),
        ))
    })
}
