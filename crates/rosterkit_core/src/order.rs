//! Per-cell normalization, stable ordering and serial assignment.

use tracing::debug;

use crate::normalize::{is_sort_column, normalize_column_value};
use crate::spec::{SpecMergedRow, SpecOrderedDataset, SpecOrderedRow, SpecUnifiedHeader};

/// Position of the first column rows are sorted by, if present.
pub fn derive_sort_column_index(header: &SpecUnifiedHeader) -> Option<usize> {
    header.columns().iter().position(|c_name| is_sort_column(c_name))
}

/// Normalize every cell, sort by the name column if any, then number rows.
///
/// The sort is stable and case-insensitive with missing values treated as
/// empty text, so ties keep source-then-row order. Serial numbers are
/// assigned after sorting and run `1..=N`.
pub fn normalize_and_order(
    rows: Vec<SpecMergedRow>,
    header: &SpecUnifiedHeader,
) -> SpecOrderedDataset {
    let mut l_rows: Vec<SpecMergedRow> = rows
        .into_iter()
        .map(|row| SpecMergedRow {
            values: row
                .values
                .iter()
                .zip(header.columns())
                .map(|(value, c_name)| normalize_column_value(value, c_name))
                .collect(),
        })
        .collect();

    let n_idx_sort = derive_sort_column_index(header);
    if let Some(n_idx_col) = n_idx_sort {
        l_rows.sort_by_cached_key(|row| {
            row.values
                .get(n_idx_col)
                .map(|value| value.to_display_text().to_lowercase())
                .unwrap_or_default()
        });
    }

    let sort_column = n_idx_sort.map(|n_idx_col| header.columns()[n_idx_col].clone());
    debug!(
        n_rows = l_rows.len(),
        sort_column = ?sort_column,
        "Ordered merged rows"
    );

    SpecOrderedDataset {
        rows: l_rows
            .into_iter()
            .enumerate()
            .map(|(n_idx, row)| SpecOrderedRow {
                serial: n_idx + 1,
                row,
            })
            .collect(),
        sort_column,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::spec::{EnumCellValue, SpecSourceTable};
    use crate::unify::unify_headers;

    fn create_header(columns: &[&str]) -> SpecUnifiedHeader {
        let sources = vec![SpecSourceTable::new(
            "a",
            vec![columns.iter().map(|c| EnumCellValue::from(*c)).collect()],
        )];
        unify_headers(&sources).expect("unify")
    }

    fn create_row(values: &[Option<&str>]) -> SpecMergedRow {
        SpecMergedRow {
            values: values.iter().map(|v| EnumCellValue::from(*v)).collect(),
        }
    }

    fn derive_column_texts(dataset: &SpecOrderedDataset, n_idx_col: usize) -> Vec<String> {
        dataset
            .rows
            .iter()
            .map(|row| row.row.values[n_idx_col].to_display_text())
            .collect()
    }

    #[test]
    fn sort_is_case_insensitive_and_stable() {
        let header = create_header(&["Name", "Tag"]);
        let rows = vec![
            create_row(&[Some("bob"), Some("first")]),
            create_row(&[Some("ALICE"), Some("x")]),
            create_row(&[Some("Bob"), Some("second")]),
            create_row(&[None, Some("missing")]),
        ];
        let dataset = normalize_and_order(rows, &header);

        assert_eq!(dataset.sort_column.as_deref(), Some("Name"));
        assert_eq!(
            derive_column_texts(&dataset, 0),
            vec!["", "Alice", "Bob", "Bob"]
        );
        assert_eq!(
            derive_column_texts(&dataset, 1),
            vec!["Missing", "X", "First", "Second"]
        );
    }

    #[test]
    fn without_name_column_merge_order_is_kept() {
        let header = create_header(&["Course", "Cgpa"]);
        let rows = vec![
            create_row(&[Some("zeta"), None]),
            create_row(&[Some("alpha"), None]),
        ];
        let dataset = normalize_and_order(rows, &header);

        assert_eq!(dataset.sort_column, None);
        assert_eq!(derive_column_texts(&dataset, 0), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn serials_are_contiguous_after_sort() {
        let header = create_header(&["name"]);
        let rows = ["d", "b", "c", "a", "b"]
            .iter()
            .map(|c| create_row(&[Some(*c)]))
            .collect();
        let dataset = normalize_and_order(rows, &header);

        let l_serials: Vec<usize> = dataset.rows.iter().map(|row| row.serial).collect();
        assert_eq!(l_serials, (1..=5).collect::<Vec<_>>());
        assert_eq!(derive_column_texts(&dataset, 0), vec!["A", "B", "B", "C", "D"]);
    }

    #[test]
    fn roll_number_column_is_upper_cased() {
        let header = create_header(&["Roll No", "Name"]);
        let rows = vec![create_row(&[Some("r1"), Some("alpha")])];
        let dataset = normalize_and_order(rows, &header);
        assert_eq!(derive_column_texts(&dataset, 0), vec!["R1"]);
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        let header = create_header(&["Name"]);
        let dataset = normalize_and_order(vec![], &header);
        assert!(dataset.is_empty());
    }
}
