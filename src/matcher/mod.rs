//! File selection for a refactoring run.

pub mod file;

pub use file::FileMatcher;
