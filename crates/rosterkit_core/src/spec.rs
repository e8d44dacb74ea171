//! Shared formatter specification models.

use crate::conf::{
    C_SERIAL_COLUMN_LABEL, N_HEIGHT_HEADER_ROW, N_HEIGHT_MARGIN_ROW, N_HEIGHT_TITLE_ROW,
    N_WIDTH_AUTOFIT_PADDING, N_WIDTH_AUTOFIT_PADDING_LAST, N_WIDTH_HEADER_COLUMN,
    N_WIDTH_MARGIN_COLUMN, derive_default_grid_formats,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellValue

/// Raw or normalized cell value flowing through the formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl EnumCellValue {
    /// Whether the value is missing.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Borrow text payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text as it is displayed in a spreadsheet cell with general format.
    ///
    /// Integral numbers render without a fractional part.
    pub fn to_display_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::String(s) => s.clone(),
            Self::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<T: Into<EnumCellValue>> From<Option<T>> for EnumCellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SourceAndDataset

/// One ingested table; row 0 is the header row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSourceTable {
    /// Source identifier used in diagnostics (file name, upload name, ...).
    pub name: String,
    /// Header row followed by data rows. Rows may be ragged.
    pub rows: Vec<Vec<EnumCellValue>>,
}

impl SpecSourceTable {
    /// Create a source table from a header row followed by data rows.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<EnumCellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Header row, `None` when the table has no rows at all.
    pub fn header_row(&self) -> Option<&[EnumCellValue]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header row.
    pub fn data_rows(&self) -> &[Vec<EnumCellValue>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Number of data rows.
    pub fn height_data(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Named header cells as `(source column index, raw name)`.
    ///
    /// Missing and blank header cells are skipped.
    pub fn header_cells(&self) -> Vec<(usize, String)> {
        let Some(row_header) = self.header_row() else {
            return vec![];
        };
        row_header
            .iter()
            .enumerate()
            .filter_map(|(n_idx_col, value)| {
                let c_name = value.to_display_text();
                if c_name.trim().is_empty() {
                    None
                } else {
                    Some((n_idx_col, c_name))
                }
            })
            .collect()
    }
}

/// Ordered, duplicate-free column list spanning all sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecUnifiedHeader {
    columns: Vec<String>,
}

impl SpecUnifiedHeader {
    pub(crate) fn from_columns(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Column names in output order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no column survived.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by raw name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c_name| c_name == name)
    }
}

/// One source row projected onto the unified header.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecMergedRow {
    /// Values aligned one-to-one with [`SpecUnifiedHeader::columns`].
    pub values: Vec<EnumCellValue>,
}

/// Merged row with its assigned 1-based serial number.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecOrderedRow {
    /// Serial number, contiguous from 1 in final order.
    pub serial: usize,
    /// Normalized row values.
    pub row: SpecMergedRow,
}

/// Normalized, ordered rows ready for layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecOrderedDataset {
    /// Rows in final order.
    pub rows: Vec<SpecOrderedRow>,
    /// Column the rows were sorted by, if any.
    pub sort_column: Option<String>,
}

impl SpecOrderedDataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,

    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Format presets per styled band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGridFormats {
    /// Title band format.
    pub fmt_title: SpecCellFormat,
    /// Header band format.
    pub fmt_header: SpecCellFormat,
    /// Data band format.
    pub fmt_data: SpecCellFormat,
}

impl Default for SpecGridFormats {
    fn default() -> Self {
        derive_default_grid_formats()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutputGrid

/// Structural band a grid cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumGridBand {
    /// Spacing row/column; never carries data.
    Margin,
    /// Merged title row.
    Title,
    /// Column header row.
    Header,
    /// Data rows.
    Data,
}

/// Positioned cell of the output grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecGridCell {
    /// Display value.
    pub value: EnumCellValue,
    /// Band the cell belongs to.
    pub band: EnumGridBand,
    /// Style descriptor, assigned by [`crate::style::apply_styles`].
    pub format: Option<SpecCellFormat>,
}

impl SpecGridCell {
    pub(crate) fn blank(band: EnumGridBand) -> Self {
        Self {
            value: EnumCellValue::None,
            band,
            format: None,
        }
    }
}

/// Horizontal merge plan item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetHorizontalMerge {
    /// Row index where merge is applied.
    pub row_idx_start: usize,
    /// Start column index (inclusive).
    pub col_idx_start: usize,
    /// End column index (inclusive).
    pub col_idx_end: usize,
    /// Merge display text.
    pub text: String,
}

impl SpecSheetHorizontalMerge {
    /// Number of columns covered by the merge.
    pub fn width(&self) -> usize {
        self.col_idx_end + 1 - self.col_idx_start
    }
}

/// Inclusive printable rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecPrintArea {
    /// First row index.
    pub row_first: usize,
    /// First column index.
    pub col_first: usize,
    /// Last row index (inclusive).
    pub row_last: usize,
    /// Last column index (inclusive).
    pub col_last: usize,
}

/// Final positioned grid handed to output serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecOutputGrid {
    /// Row-major cells; every row has the same width.
    pub cells: Vec<Vec<SpecGridCell>>,
    /// Merged ranges; exactly one (the title band) after layout.
    pub merges: Vec<SpecSheetHorizontalMerge>,
    /// Display width per grid column.
    pub widths_by_col: Vec<f64>,
    /// Explicit height per grid row; `None` keeps the default.
    pub heights_by_row: Vec<Option<f64>>,
    /// Number of data columns (serial column included, margins excluded).
    pub width_data: usize,
    /// Grid-line visibility.
    pub if_show_grid_lines: bool,
    /// Printable rectangle, set by the style pass.
    pub print_area: Option<SpecPrintArea>,
}

impl SpecOutputGrid {
    /// Number of grid rows, margins included.
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Number of grid columns, margins included.
    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Cell at `(row, col)`.
    pub fn cell(&self, row_idx: usize, col_idx: usize) -> Option<&SpecGridCell> {
        self.cells.get(row_idx).and_then(|row| row.get(col_idx))
    }

    /// The merged title range.
    pub fn title_merge(&self) -> Option<&SpecSheetHorizontalMerge> {
        self.merges.first()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Layout geometry and autofit options.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecLayoutOptions {
    /// Label of the generated serial-number column.
    pub serial_label: String,
    /// Width of the left/right margin columns.
    pub width_margin_col: f64,
    /// Fixed width assigned to header columns before autofit.
    pub width_header_col: f64,
    /// Recompute data column widths from rendered content.
    pub if_autofit_columns: bool,
    /// Padding added to autofit widths.
    pub width_cell_padding: usize,
    /// Padding added to the rightmost data column.
    pub width_cell_padding_last: usize,
    /// Height of the top/bottom margin rows.
    pub height_margin_row: f64,
    /// Height of the title row.
    pub height_title_row: f64,
    /// Height of the header row.
    pub height_header_row: f64,
}

impl Default for SpecLayoutOptions {
    fn default() -> Self {
        Self {
            serial_label: C_SERIAL_COLUMN_LABEL.to_string(),
            width_margin_col: N_WIDTH_MARGIN_COLUMN,
            width_header_col: N_WIDTH_HEADER_COLUMN,
            if_autofit_columns: true,
            width_cell_padding: N_WIDTH_AUTOFIT_PADDING,
            width_cell_padding_last: N_WIDTH_AUTOFIT_PADDING_LAST,
            height_margin_row: N_HEIGHT_MARGIN_ROW,
            height_title_row: N_HEIGHT_TITLE_ROW,
            height_header_row: N_HEIGHT_HEADER_ROW,
        }
    }
}

/// Options for one end-to-end formatting run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecFormatOptions {
    /// Columns to keep (raw names); `None` keeps every unified column.
    pub cols_selected: Option<Vec<String>>,
    /// Layout geometry.
    pub layout: SpecLayoutOptions,
    /// Band format presets.
    pub formats: SpecGridFormats,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
