//! Error types for workbook ingestion and output.

use rosterkit_core::FormatError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Errors raised while reading sources or writing the formatted workbook.
#[derive(Debug, Error)]
pub enum XlsxIoError {
    /// Engine failure, including unreadable sources.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Workbook serialization failed.
    #[error("xlsx write error: {0}")]
    Write(#[from] XlsxError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// Grid does not fit in one worksheet.
    #[error("grid exceeds Excel limits: {message}")]
    ExcelLimit { message: String },

    /// Writer used after `close()`.
    #[error("cannot write after close()")]
    WriterClosed,
}

impl From<polars::prelude::PolarsError> for XlsxIoError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl XlsxIoError {
    /// Unreadable source, reported through [`FormatError::MalformedSource`].
    pub fn malformed_source(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Format(FormatError::MalformedSource {
            source_name: source_name.into(),
            reason: reason.to_string(),
        })
    }
}

/// Result type for XLSX I/O operations.
pub type Result<T> = std::result::Result<T, XlsxIoError>;
