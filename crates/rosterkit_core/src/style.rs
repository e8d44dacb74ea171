//! Style applicator: band formats, grid lines and print area.

use crate::spec::{EnumGridBand, SpecCellFormat, SpecGridFormats, SpecOutputGrid, SpecPrintArea};

/// Format assigned to cells of `band`; margins stay unstyled.
pub fn derive_band_format(band: EnumGridBand, formats: &SpecGridFormats) -> Option<SpecCellFormat> {
    match band {
        EnumGridBand::Margin => None,
        EnumGridBand::Title => Some(formats.fmt_title.clone()),
        EnumGridBand::Header => Some(formats.fmt_header.clone()),
        EnumGridBand::Data => Some(formats.fmt_data.clone()),
    }
}

/// Assign band formats to every cell, hide grid lines and fix the print area
/// to the full populated rectangle. Idempotent.
pub fn apply_styles(grid: &mut SpecOutputGrid, formats: &SpecGridFormats) {
    for row in &mut grid.cells {
        for cell in row.iter_mut() {
            cell.format = derive_band_format(cell.band, formats);
        }
    }

    grid.if_show_grid_lines = false;
    grid.print_area = if grid.height() == 0 || grid.width() == 0 {
        None
    } else {
        Some(SpecPrintArea {
            row_first: 0,
            col_first: 0,
            row_last: grid.height() - 1,
            col_last: grid.width() - 1,
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{N_ROW_IDX_DATA_START, N_ROW_IDX_HEADER, N_ROW_IDX_TITLE, build_output};
    use crate::merge::merge_rows;
    use crate::order::normalize_and_order;
    use crate::spec::SpecSourceTable;
    use crate::unify::unify_headers;

    fn create_grid() -> SpecOutputGrid {
        let sources = vec![SpecSourceTable::new(
            "a",
            vec![
                vec!["Name".into(), "Course".into()],
                vec!["alpha".into(), "na".into()],
            ],
        )];
        let header = unify_headers(&sources).expect("unify");
        let dataset = normalize_and_order(merge_rows(&sources, &header), &header);
        build_output(&dataset, &header, "Roster")
    }

    #[test]
    fn bands_get_their_formats_and_margins_stay_plain() {
        let formats = SpecGridFormats::default();
        let mut grid = create_grid();
        apply_styles(&mut grid, &formats);

        assert_eq!(
            grid.cell(N_ROW_IDX_TITLE, 1).and_then(|c| c.format.clone()),
            Some(formats.fmt_title.clone())
        );
        assert_eq!(
            grid.cell(N_ROW_IDX_HEADER, 2).and_then(|c| c.format.clone()),
            Some(formats.fmt_header.clone())
        );
        assert_eq!(
            grid.cell(N_ROW_IDX_DATA_START, 3).and_then(|c| c.format.clone()),
            Some(formats.fmt_data.clone())
        );
        assert_eq!(grid.cell(0, 0).and_then(|c| c.format.clone()), None);
        assert_eq!(grid.cell(N_ROW_IDX_HEADER, 0).and_then(|c| c.format.clone()), None);
    }

    #[test]
    fn grid_lines_hidden_and_print_area_covers_grid() {
        let mut grid = create_grid();
        apply_styles(&mut grid, &SpecGridFormats::default());

        assert!(!grid.if_show_grid_lines);
        assert_eq!(
            grid.print_area,
            Some(SpecPrintArea {
                row_first: 0,
                col_first: 0,
                row_last: 4,
                col_last: 4,
            })
        );
    }

    #[test]
    fn applying_styles_twice_is_idempotent() {
        let formats = SpecGridFormats::default();
        let mut grid = create_grid();
        apply_styles(&mut grid, &formats);
        let grid_once = grid.clone();
        apply_styles(&mut grid, &formats);
        assert_eq!(grid, grid_once);
    }
}
