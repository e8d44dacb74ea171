//! Layout builder: positions title/header/data bands inside margin bands and
//! plans column widths.
//!
//! Final grid shape for `N` data rows and `W` data columns (serial included):
//!
//! ```text
//! row 0        top margin
//! row 1        title band, merged over columns 1..=W
//! row 2        header band
//! rows 3..3+N  data band
//! row 3+N      bottom margin
//! ```
//!
//! Column 0 and column `W + 1` are the left/right margins.

use std::iter;

use tracing::debug;

use crate::normalize::normalize_text;
use crate::spec::{
    EnumCellValue, EnumGridBand, SpecGridCell, SpecLayoutOptions, SpecOrderedDataset,
    SpecOutputGrid, SpecSheetHorizontalMerge, SpecUnifiedHeader,
};

/// Row index of the title band.
pub const N_ROW_IDX_TITLE: usize = 1;
/// Row index of the header band.
pub const N_ROW_IDX_HEADER: usize = 2;
/// Row index of the first data row.
pub const N_ROW_IDX_DATA_START: usize = 3;
/// Column index of the first data column (the serial column).
pub const N_COL_IDX_DATA_START: usize = 1;

/// Build the output grid with default layout options.
pub fn build_output(
    dataset: &SpecOrderedDataset,
    header: &SpecUnifiedHeader,
    title: &str,
) -> SpecOutputGrid {
    build_output_with_options(dataset, header, title, &SpecLayoutOptions::default())
}

/// Build the output grid: logical header/data rows first, then margin and
/// title insertion, then column widths over the final positions.
///
/// Cells are left unstyled; see [`crate::style::apply_styles`].
pub fn build_output_with_options(
    dataset: &SpecOrderedDataset,
    header: &SpecUnifiedHeader,
    title: &str,
    options: &SpecLayoutOptions,
) -> SpecOutputGrid {
    let l_row_header: Vec<EnumCellValue> = iter::once(options.serial_label.as_str())
        .chain(header.columns().iter().map(String::as_str))
        .map(|c_name| EnumCellValue::String(normalize_text(c_name)))
        .collect();
    let n_width_data = l_row_header.len();

    let l_rows_data: Vec<Vec<EnumCellValue>> = dataset
        .rows
        .iter()
        .map(|row| {
            iter::once(EnumCellValue::Number(row.serial as f64))
                .chain(row.row.values.iter().cloned())
                .collect()
        })
        .collect();

    let n_width_grid = n_width_data + 2;
    let mut cells = Vec::with_capacity(l_rows_data.len() + 4);
    cells.push(derive_margin_row(n_width_grid));

    let mut l_row_title = vec![EnumCellValue::None; n_width_data];
    l_row_title[0] = EnumCellValue::String(title.to_string());
    cells.push(derive_banded_row(l_row_title, EnumGridBand::Title));

    cells.push(derive_banded_row(l_row_header, EnumGridBand::Header));
    for row in l_rows_data {
        cells.push(derive_banded_row(row, EnumGridBand::Data));
    }
    cells.push(derive_margin_row(n_width_grid));

    let n_height_grid = cells.len();
    let mut heights_by_row = vec![None; n_height_grid];
    heights_by_row[0] = Some(options.height_margin_row);
    heights_by_row[N_ROW_IDX_TITLE] = Some(options.height_title_row);
    heights_by_row[N_ROW_IDX_HEADER] = Some(options.height_header_row);
    heights_by_row[n_height_grid - 1] = Some(options.height_margin_row);

    let widths_by_col = plan_column_widths(&cells, n_width_data, options);

    let merges = vec![SpecSheetHorizontalMerge {
        row_idx_start: N_ROW_IDX_TITLE,
        col_idx_start: N_COL_IDX_DATA_START,
        col_idx_end: n_width_data,
        text: title.to_string(),
    }];

    debug!(
        n_rows = n_height_grid,
        n_cols = n_width_grid,
        n_width_data,
        "Built output grid"
    );

    SpecOutputGrid {
        cells,
        merges,
        widths_by_col,
        heights_by_row,
        width_data: n_width_data,
        if_show_grid_lines: true,
        print_area: None,
    }
}

/// Plan display width for every grid column.
///
/// Margins get the fixed margin width; data columns start at the fixed header
/// width and, with autofit on, are recomputed from the longest rendered
/// header/data cell plus padding (extra padding on the rightmost one).
pub fn plan_column_widths(
    cells: &[Vec<SpecGridCell>],
    width_data: usize,
    options: &SpecLayoutOptions,
) -> Vec<f64> {
    let n_width_grid = width_data + 2;
    let mut l_widths = vec![options.width_header_col; n_width_grid];
    l_widths[0] = options.width_margin_col;
    l_widths[n_width_grid - 1] = options.width_margin_col;

    if !options.if_autofit_columns {
        return l_widths;
    }

    let n_idx_col_last = N_COL_IDX_DATA_START + width_data - 1;
    for n_idx_col in N_COL_IDX_DATA_START..=n_idx_col_last {
        let n_len_max = cells
            .iter()
            .filter_map(|row| row.get(n_idx_col))
            .filter(|cell| matches!(cell.band, EnumGridBand::Header | EnumGridBand::Data))
            .map(|cell| estimate_display_width(&cell.value.to_display_text()))
            .max()
            .unwrap_or(0);
        let n_pad = if n_idx_col == n_idx_col_last {
            options.width_cell_padding_last
        } else {
            options.width_cell_padding
        };
        l_widths[n_idx_col] = (n_len_max + n_pad) as f64;
    }

    l_widths
}

/// Displayed width of a rendered cell text: one unit per character.
pub fn estimate_display_width(s: &str) -> usize {
    s.chars().count()
}

fn derive_margin_row(n_width_grid: usize) -> Vec<SpecGridCell> {
    vec![SpecGridCell::blank(EnumGridBand::Margin); n_width_grid]
}

fn derive_banded_row(values: Vec<EnumCellValue>, band: EnumGridBand) -> Vec<SpecGridCell> {
    iter::once(SpecGridCell::blank(EnumGridBand::Margin))
        .chain(values.into_iter().map(|value| SpecGridCell {
            value,
            band,
            format: None,
        }))
        .chain(iter::once(SpecGridCell::blank(EnumGridBand::Margin)))
        .collect()
}
