//! Error types for a formatting run.

use thiserror::Error;

/// Fatal failures of a formatting run. No partial grid is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No sources, or no header survived identity-column filtering.
    #[error("no usable columns found in {n_sources} source(s)")]
    EmptyInput { n_sources: usize },

    /// A source cannot be read as a header-first table.
    #[error("source {source_name:?} is not a valid table: {reason}")]
    MalformedSource { source_name: String, reason: String },

    /// The caller kept zero columns.
    #[error("no columns selected to keep")]
    NoSelection,
}

/// Result type for formatting operations.
pub type Result<T> = std::result::Result<T, FormatError>;
