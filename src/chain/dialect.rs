//! The fixed vocabulary of the fluent logging chain.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Default bound on the length of one candidate chain, in bytes.
pub const DEFAULT_MAX_CHAIN_LEN: usize = 64 * 1024;

static SLF4J: LazyLock<ChainDialect> = LazyLock::new(ChainDialect::default);

/// Receiver names, severity levels and method names that make up a chain.
///
/// The default is the SLF4J 2.x fluent API:
///
/// ```text
/// log.atInfo().setMessage("{}").addArgument(() -> ...).log();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainDialect {
    /// Identifiers accepted as the logging receiver.
    pub receivers: Vec<String>,
    /// Severity names accepted after `level_prefix`.
    pub levels: Vec<String>,
    /// Prefix of the initial severity-selecting call.
    pub level_prefix: String,
    /// Method that sets the message template.
    pub message_method: String,
    /// Method that adds one argument.
    pub argument_method: String,
    /// No-argument method that closes the chain.
    pub terminal_method: String,
    /// Candidate chains longer than this are not rewritten.
    pub max_chain_len: usize,
}

impl Default for ChainDialect {
    fn default() -> Self {
        Self {
            receivers: vec!["log".to_string(), "LOGGER".to_string(), "logger".to_string()],
            levels: ["Trace", "Debug", "Info", "Warn", "Error"]
                .into_iter()
                .map(String::from)
                .collect(),
            level_prefix: "at".to_string(),
            message_method: "setMessage".to_string(),
            argument_method: "addArgument".to_string(),
            terminal_method: "log".to_string(),
            max_chain_len: DEFAULT_MAX_CHAIN_LEN,
        }
    }
}

impl ChainDialect {
    /// The shared SLF4J dialect.
    pub fn slf4j() -> &'static ChainDialect {
        &SLF4J
    }

    /// Adds an accepted receiver identifier.
    pub fn receiver(mut self, name: impl Into<String>) -> Self {
        self.receivers.push(name.into());
        self
    }

    /// Sets the maximum candidate chain length.
    pub fn max_chain_len(mut self, bytes: usize) -> Self {
        self.max_chain_len = bytes;
        self
    }
}
