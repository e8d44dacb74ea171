//! Projection of source rows onto the unified header.

use std::collections::BTreeMap;

use tracing::debug;

use crate::normalize::is_identity_column;
use crate::spec::{EnumCellValue, SpecMergedRow, SpecSourceTable, SpecUnifiedHeader};

/// Map unified column positions to source column indices for one source.
///
/// Entry `i` is `Some(source_idx)` when the source carries unified column `i`.
/// Identity columns are never mapped; within one source the first occurrence
/// of a name wins.
pub fn derive_source_column_map(
    source: &SpecSourceTable,
    header: &SpecUnifiedHeader,
) -> Vec<Option<usize>> {
    let mut dict_idx_by_name: BTreeMap<String, usize> = BTreeMap::new();
    for (n_idx_col, c_name) in source.header_cells() {
        if is_identity_column(&c_name) {
            continue;
        }
        dict_idx_by_name.entry(c_name).or_insert(n_idx_col);
    }

    header
        .columns()
        .iter()
        .map(|c_name| dict_idx_by_name.get(c_name).copied())
        .collect()
}

/// Concatenate all sources' data rows projected onto `header`.
///
/// Sources keep their order, rows keep their order. A column absent from a
/// source, or a cell past the end of a short row, yields
/// [`EnumCellValue::None`].
pub fn merge_rows(sources: &[SpecSourceTable], header: &SpecUnifiedHeader) -> Vec<SpecMergedRow> {
    let n_rows_total = sources.iter().map(SpecSourceTable::height_data).sum();
    let mut l_rows = Vec::with_capacity(n_rows_total);

    for source in sources {
        let l_idx_src_by_col = derive_source_column_map(source, header);
        for row in source.data_rows() {
            let values = l_idx_src_by_col
                .iter()
                .map(|idx_src| {
                    idx_src
                        .and_then(|n_idx| row.get(n_idx))
                        .cloned()
                        .unwrap_or(EnumCellValue::None)
                })
                .collect();
            l_rows.push(SpecMergedRow { values });
        }
        debug!(
            source = %source.name,
            n_rows = source.height_data(),
            n_cols_present = l_idx_src_by_col.iter().filter(|idx| idx.is_some()).count(),
            "Merged source rows"
        );
    }

    l_rows
}
