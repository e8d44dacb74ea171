//! XLSX writer kernel that serializes a styled output grid into a workbook.

use std::collections::HashMap;
use std::path::PathBuf;

use rosterkit_core::{EnumCellValue, SpecCellFormat, SpecOutputGrid};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::debug;

use crate::conf::C_SHEET_NAME_DEFAULT;
use crate::error::{Result, XlsxIoError};
use crate::util::{
    cast_col_num, cast_row_num, derive_horizontal_merge_tracker, sanitize_sheet_name,
    validate_grid_limits,
};

/// Per-sheet call options.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecXlsxGridWriteOptions {
    /// Requested sheet name; sanitized on write.
    pub sheet_name: String,
}

impl Default for SpecXlsxGridWriteOptions {
    fn default() -> Self {
        Self {
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
        }
    }
}

/// Stateful workbook writer.
pub struct XlsxGridWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    if_closed: bool,
}

impl XlsxGridWriter {
    /// Create writer bound to output path.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: impl Into<PathBuf>) -> Self {
        Self {
            path_file_out: path_file_out.into(),
            workbook: Workbook::new(),
            if_closed: false,
        }
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Write one grid into a new worksheet; returns the final sheet name.
    pub fn write_grid(
        &mut self,
        grid: &SpecOutputGrid,
        options: &SpecXlsxGridWriteOptions,
    ) -> Result<String> {
        if self.if_closed {
            return Err(XlsxIoError::WriterClosed);
        }
        validate_grid_limits(grid)?;

        let sheet_name = sanitize_sheet_name(&options.sheet_name, "_");
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;
        write_grid_to_worksheet(worksheet, grid)?;

        debug!(
            sheet = %sheet_name,
            n_rows = grid.height(),
            n_cols = grid.width(),
            "Wrote grid worksheet"
        );
        Ok(sheet_name)
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        debug!(path = %self.file_out(), "Saved workbook");
        Ok(())
    }
}

/// Serialize one grid into an in-memory `.xlsx` payload.
pub fn write_grid_to_buffer(
    grid: &SpecOutputGrid,
    options: &SpecXlsxGridWriteOptions,
) -> Result<Vec<u8>> {
    validate_grid_limits(grid)?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sanitize_sheet_name(&options.sheet_name, "_"))?;
    write_grid_to_worksheet(worksheet, grid)?;

    Ok(workbook.save_to_buffer()?)
}

fn write_grid_to_worksheet(worksheet: &mut Worksheet, grid: &SpecOutputGrid) -> Result<()> {
    let mut dict_formats: HashMap<SpecCellFormat, Format> = HashMap::new();
    let fmt_plain = Format::new();
    let set_cells_merged = derive_horizontal_merge_tracker(&grid.merges);

    for (row_idx, row) in grid.cells.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if set_cells_merged.contains(&(row_idx, col_idx)) {
                continue;
            }
            match &cell.format {
                Some(spec) => {
                    let format = dict_formats
                        .entry(spec.clone())
                        .or_insert_with(|| derive_rust_xlsx_format(spec));
                    write_cell_with_format(worksheet, row_idx, col_idx, &cell.value, format)?;
                }
                // Unstyled blanks carry no information.
                None if cell.value.is_none() => {}
                None => {
                    write_cell_with_format(worksheet, row_idx, col_idx, &cell.value, &fmt_plain)?;
                }
            }
        }
    }

    for merge in &grid.merges {
        let format = grid
            .cell(merge.row_idx_start, merge.col_idx_start)
            .and_then(|cell| cell.format.as_ref())
            .map_or_else(Format::new, derive_rust_xlsx_format);
        let row_num = cast_row_num(merge.row_idx_start)?;
        if merge.col_idx_end > merge.col_idx_start {
            worksheet.merge_range(
                row_num,
                cast_col_num(merge.col_idx_start)?,
                row_num,
                cast_col_num(merge.col_idx_end)?,
                &merge.text,
                &format,
            )?;
        } else {
            // rust_xlsxwriter rejects single-cell merge ranges.
            worksheet.write_string_with_format(
                row_num,
                cast_col_num(merge.col_idx_start)?,
                &merge.text,
                &format,
            )?;
        }
    }

    for (col_idx, width) in grid.widths_by_col.iter().enumerate() {
        worksheet.set_column_width(cast_col_num(col_idx)?, *width)?;
    }
    for (row_idx, height) in grid.heights_by_row.iter().enumerate() {
        if let Some(val) = height {
            worksheet.set_row_height(cast_row_num(row_idx)?, *val)?;
        }
    }

    worksheet.set_screen_gridlines(grid.if_show_grid_lines);
    if let Some(area) = &grid.print_area {
        worksheet.set_print_area(
            cast_row_num(area.row_first)?,
            cast_col_num(area.col_first)?,
            cast_row_num(area.row_last)?,
            cast_col_num(area.col_last)?,
        )?;
    }

    Ok(())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<()> {
    let row_num = cast_row_num(row_idx)?;
    let col_num = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(row_num, col_num, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(row_num, col_num, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(row_num, col_num, *val, format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "justify" => Some(FormatAlign::Justify),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}
