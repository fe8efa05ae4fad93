//! Error types for log acquisition, adapter configuration and result lookups.

use thiserror::Error;

/// Errors surfaced by the filter.
///
/// Parsing itself never fails; these come from line sources, adapter
/// configuration, or queries against a finished run.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("log source not found: {0}")]
    SourceNotFound(String),

    #[error("section not present in log: {0}")]
    SectionNotFound(String),

    #[error("command not present in log: {0}")]
    CommandNotFound(String),

    #[error("fact '{fact}' not present in section '{section}'")]
    FactNotFound { section: String, fact: String },

    #[error("fact '{fact}' in section '{section}' is not a {expected}")]
    FactType {
        section: String,
        fact: String,
        expected: &'static str,
    },

    #[error("invalid adapter configuration: {0}")]
    Config(String),

    #[error("invalid tool version: {0}")]
    InvalidVersion(String),
}

/// Convenience alias for filter results.
pub type FilterResult<T> = Result<T, FilterError>;
