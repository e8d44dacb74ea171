//! Source ingestion: first worksheet of a workbook, or a polars DataFrame,
//! into a header-first [`SpecSourceTable`].

use std::fmt::Display;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto, open_workbook_auto_from_rs};
use polars::prelude::{AnyValue, DataFrame, IpcReader, SerReader};
use rosterkit_core::{EnumCellValue, SpecSourceTable};
use tracing::debug;

use crate::error::{Result, XlsxIoError};

/// Read the first worksheet of the workbook at `path`.
///
/// The workbook handle lives only inside this call and is released on every
/// return path. Any open/parse failure is reported as a malformed source
/// named after the file.
pub fn read_source_table(path: impl AsRef<Path>) -> Result<SpecSourceTable> {
    let path = path.as_ref();
    let c_source_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().to_string());

    let mut workbook = open_workbook_auto(path)
        .map_err(|err| XlsxIoError::malformed_source(&c_source_name, err))?;
    derive_source_table_from_range(workbook.worksheet_range_at(0), c_source_name)
}

/// Read the first worksheet of an in-memory workbook (e.g. an uploaded file).
pub fn read_source_table_from_bytes(
    source_name: impl Into<String>,
    v_bytes: &[u8],
) -> Result<SpecSourceTable> {
    let c_source_name = source_name.into();
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(v_bytes))
        .map_err(|err| XlsxIoError::malformed_source(&c_source_name, err))?;
    derive_source_table_from_range(workbook.worksheet_range_at(0), c_source_name)
}

fn derive_source_table_from_range<E: Display>(
    range_first: Option<std::result::Result<Range<Data>, E>>,
    source_name: String,
) -> Result<SpecSourceTable> {
    let range = range_first
        .ok_or_else(|| XlsxIoError::malformed_source(&source_name, "workbook has no worksheet"))?
        .map_err(|err| XlsxIoError::malformed_source(&source_name, err))?;

    // calamine ranges start at the first used cell; re-anchor at A1 so sheet
    // row 1 stays the header row.
    let (n_row_start, n_col_start) = range
        .start()
        .map_or((0, 0), |(row_idx, col_idx)| (row_idx as usize, col_idx as usize));
    let n_width = n_col_start + range.width();

    let mut rows: Vec<Vec<EnumCellValue>> = Vec::with_capacity(n_row_start + range.height());
    if !range.is_empty() {
        rows.extend((0..n_row_start).map(|_| vec![EnumCellValue::None; n_width]));
    }
    rows.extend(range.rows().map(|row| {
        std::iter::repeat_n(EnumCellValue::None, n_col_start)
            .chain(row.iter().map(derive_cell_value_from_data))
            .collect::<Vec<_>>()
    }));
    if rows.is_empty() {
        return Err(XlsxIoError::malformed_source(
            &source_name,
            "first worksheet is empty",
        ));
    }

    debug!(
        source = %source_name,
        n_rows = rows.len(),
        n_cols = n_width,
        "Read source worksheet"
    );
    Ok(SpecSourceTable::new(source_name, rows))
}

/// Convert one calamine cell into an engine cell value.
pub fn derive_cell_value_from_data(value: &Data) -> EnumCellValue {
    match value {
        Data::Empty => EnumCellValue::None,
        Data::String(s) if s.is_empty() => EnumCellValue::None,
        Data::String(s) => EnumCellValue::String(s.clone()),
        Data::Int(n) => EnumCellValue::Number(*n as f64),
        Data::Float(n) => EnumCellValue::Number(*n),
        Data::Bool(b) => EnumCellValue::String(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => EnumCellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => EnumCellValue::String(s.clone()),
        Data::Error(err) => EnumCellValue::String(err.to_string()),
    }
}

/// Build a source table from a DataFrame; column names form the header row.
pub fn source_table_from_dataframe(
    source_name: impl Into<String>,
    df: &DataFrame,
) -> Result<SpecSourceTable> {
    let row_header: Vec<EnumCellValue> = df
        .get_column_names_str()
        .into_iter()
        .map(|c_name| EnumCellValue::String(c_name.to_string()))
        .collect();

    let l_cols = df.get_columns();
    let mut rows = Vec::with_capacity(df.height() + 1);
    rows.push(row_header);
    for n_idx_row in 0..df.height() {
        let mut row = Vec::with_capacity(l_cols.len());
        for col in l_cols {
            row.push(derive_cell_value_from_any_value(col.get(n_idx_row)?));
        }
        rows.push(row);
    }

    Ok(SpecSourceTable::new(source_name, rows))
}

/// Build a source table from IPC-serialized DataFrame bytes.
pub fn source_table_from_ipc_bytes(
    source_name: impl Into<String>,
    v_ipc_df: &[u8],
) -> Result<SpecSourceTable> {
    let c_source_name = source_name.into();
    let df = IpcReader::new(Cursor::new(v_ipc_df))
        .finish()
        .map_err(|err| XlsxIoError::malformed_source(&c_source_name, err))?;
    source_table_from_dataframe(c_source_name, &df)
}

fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => {
            EnumCellValue::String(if val { "True" } else { "False" }.to_string())
        }
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;
    use pretty_assertions::assert_eq;
    use rosterkit_core::FormatError;

    use super::*;

    #[test]
    fn calamine_cells_map_to_engine_values() {
        assert_eq!(derive_cell_value_from_data(&Data::Empty), EnumCellValue::None);
        assert_eq!(
            derive_cell_value_from_data(&Data::String(String::new())),
            EnumCellValue::None
        );
        assert_eq!(
            derive_cell_value_from_data(&Data::Int(7)),
            EnumCellValue::Number(7.0)
        );
        assert_eq!(
            derive_cell_value_from_data(&Data::Bool(true)),
            EnumCellValue::from("True")
        );
    }

    #[test]
    fn dataframe_becomes_header_first_table() {
        let df = df!(
            "Name" => ["beta", "Alpha"],
            "Cgpa" => [Some(8.1), None],
        )
        .expect("dataframe");
        let source = source_table_from_dataframe("frame", &df).expect("source");

        assert_eq!(source.name, "frame");
        assert_eq!(
            source.rows,
            vec![
                vec!["Name".into(), "Cgpa".into()],
                vec!["beta".into(), EnumCellValue::Number(8.1)],
                vec!["Alpha".into(), EnumCellValue::None],
            ]
        );
    }

    #[test]
    fn sheet_row_one_stays_the_header_row() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(1, 1, "Name").expect("write header");
        worksheet.write_string(2, 1, "beta").expect("write value");
        let v_bytes = workbook.save_to_buffer().expect("buffer");

        let source = read_source_table_from_bytes("offset.xlsx", &v_bytes).expect("source");
        assert_eq!(
            source.rows,
            vec![
                vec![EnumCellValue::None, EnumCellValue::None],
                vec![EnumCellValue::None, "Name".into()],
                vec![EnumCellValue::None, "beta".into()],
            ]
        );
        assert!(source.header_cells().is_empty());
    }

    #[test]
    fn garbage_bytes_are_a_malformed_source() {
        let err = read_source_table_from_bytes("upload.xlsx", b"not a workbook")
            .expect_err("garbage must fail");
        assert!(matches!(
            err,
            XlsxIoError::Format(FormatError::MalformedSource { ref source_name, .. })
                if source_name == "upload.xlsx"
        ));
    }

    #[test]
    fn missing_file_is_a_malformed_source() {
        let err = read_source_table("/nonexistent/dir/roster.xlsx").expect_err("missing file");
        assert!(matches!(
            err,
            XlsxIoError::Format(FormatError::MalformedSource { ref source_name, .. })
                if source_name == "roster.xlsx"
        ));
    }
}
