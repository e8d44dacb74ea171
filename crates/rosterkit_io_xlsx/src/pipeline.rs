//! File-level entry points: read workbooks, format, write the result.

use std::path::Path;

use rosterkit_core::{SpecFormatOptions, SpecFormatReport, SpecSourceTable, format_sources};
use tracing::info;

use crate::error::Result;
use crate::reader::{read_source_table, read_source_table_from_bytes};
use crate::writer::{SpecXlsxGridWriteOptions, XlsxGridWriter, write_grid_to_buffer};

/// Read the first worksheet of every path, in order. Stops on the first
/// unreadable source.
pub fn read_source_tables<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SpecSourceTable>> {
    paths.iter().map(read_source_table).collect()
}

/// Format workbooks on disk into one workbook at `path_file_out`.
///
/// Nothing is written when reading or formatting fails.
pub fn format_files_to_xlsx<P: AsRef<Path>>(
    paths: &[P],
    title: &str,
    options: &SpecFormatOptions,
    path_file_out: impl AsRef<Path>,
) -> Result<SpecFormatReport> {
    let sources = read_source_tables(paths)?;
    let output = format_sources(sources, title, options)?;

    let mut writer = XlsxGridWriter::new(path_file_out.as_ref());
    writer.write_grid(&output.grid, &SpecXlsxGridWriteOptions::default())?;
    writer.close()?;

    info!(path = %writer.file_out(), rows = output.report.n_rows, "Formatted workbook saved");
    Ok(output.report)
}

/// Format workbooks on disk into an in-memory `.xlsx` payload.
pub fn format_files_to_buffer<P: AsRef<Path>>(
    paths: &[P],
    title: &str,
    options: &SpecFormatOptions,
) -> Result<(Vec<u8>, SpecFormatReport)> {
    format_sources_to_buffer(read_source_tables(paths)?, title, options)
}

/// Format uploaded `(file name, bytes)` pairs into an in-memory payload.
pub fn format_uploads_to_buffer(
    uploads: &[(String, Vec<u8>)],
    title: &str,
    options: &SpecFormatOptions,
) -> Result<(Vec<u8>, SpecFormatReport)> {
    let sources = uploads
        .iter()
        .map(|(name, v_bytes)| read_source_table_from_bytes(name.as_str(), v_bytes))
        .collect::<Result<Vec<_>>>()?;
    format_sources_to_buffer(sources, title, options)
}

/// Format already-loaded sources into an in-memory payload.
pub fn format_sources_to_buffer(
    sources: Vec<SpecSourceTable>,
    title: &str,
    options: &SpecFormatOptions,
) -> Result<(Vec<u8>, SpecFormatReport)> {
    let output = format_sources(sources, title, options)?;
    let v_bytes = write_grid_to_buffer(&output.grid, &SpecXlsxGridWriteOptions::default())?;
    Ok((v_bytes, output.report))
}
