//! Stateless helper utilities used by the XLSX reader/writer.

use std::collections::BTreeSet;

use rosterkit_core::{SpecOutputGrid, SpecSheetHorizontalMerge};

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::error::{Result, XlsxIoError};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region GridChecks

/// Reject grids that do not fit in a single worksheet.
pub fn validate_grid_limits(grid: &SpecOutputGrid) -> Result<()> {
    if grid.height() > N_NROWS_EXCEL_MAX {
        return Err(XlsxIoError::ExcelLimit {
            message: format!(
                "{} rows (margins and bands included) > {N_NROWS_EXCEL_MAX}",
                grid.height()
            ),
        });
    }
    if grid.width() > N_NCOLS_EXCEL_MAX {
        return Err(XlsxIoError::ExcelLimit {
            message: format!(
                "{} columns (margins included) > {N_NCOLS_EXCEL_MAX}",
                grid.width()
            ),
        });
    }
    if grid.cells.iter().any(|row| row.len() != grid.width()) {
        return Err(XlsxIoError::ExcelLimit {
            message: "grid rows have unequal widths".to_string(),
        });
    }
    Ok(())
}

/// Cells covered by a horizontal merge, anchor cells excluded.
pub fn derive_horizontal_merge_tracker(
    merges: &[SpecSheetHorizontalMerge],
) -> BTreeSet<(usize, usize)> {
    let mut set_merged_cells = BTreeSet::new();
    for merge in merges {
        for col_idx in (merge.col_idx_start + 1)..=merge.col_idx_end {
            set_merged_cells.insert((merge.row_idx_start, col_idx));
        }
    }
    set_merged_cells
}

pub(crate) fn cast_row_num(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| XlsxIoError::ExcelLimit {
        message: format!("row index overflow: {value}"),
    })
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| XlsxIoError::ExcelLimit {
        message: format!("column index overflow: {value}"),
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
