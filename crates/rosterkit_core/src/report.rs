//! Formatting run report.

use std::fmt;

/// Counters and diagnostics for one formatting run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpecFormatReport {
    /// Number of sources consumed.
    pub n_sources: usize,
    /// Number of data rows written.
    pub n_rows: usize,
    /// Kept columns in output order (serial column excluded).
    pub columns: Vec<String>,
    /// Column rows were sorted by, if any.
    pub sort_column: Option<String>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecFormatReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} sources={} rows={} columns={} sorted_by={} warnings={}",
            self.n_sources,
            self.n_rows,
            self.columns.len(),
            self.sort_column.as_deref().unwrap_or("-"),
            self.warning_count()
        )
    }
}

impl fmt::Display for SpecFormatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[FORMAT]"))
    }
}
