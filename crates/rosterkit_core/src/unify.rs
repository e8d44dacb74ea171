//! Header unification and column selection across sources.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{FormatError, Result};
use crate::normalize::is_identity_column;
use crate::spec::{SpecSourceTable, SpecUnifiedHeader};

/// Union all source headers in first-seen order, dropping identity columns.
///
/// Duplicates are detected by raw name. Fails with
/// [`FormatError::MalformedSource`] when a source has no header row and with
/// [`FormatError::EmptyInput`] when no column survives.
pub fn unify_headers(sources: &[SpecSourceTable]) -> Result<SpecUnifiedHeader> {
    let mut l_columns: Vec<String> = Vec::new();
    let mut set_seen: BTreeSet<String> = BTreeSet::new();

    for source in sources {
        if source.header_row().is_none() {
            return Err(FormatError::MalformedSource {
                source_name: source.name.clone(),
                reason: "missing header row".to_string(),
            });
        }
        for (_, c_name) in source.header_cells() {
            if is_identity_column(&c_name) {
                continue;
            }
            if set_seen.insert(c_name.clone()) {
                l_columns.push(c_name);
            }
        }
    }

    if l_columns.is_empty() {
        return Err(FormatError::EmptyInput {
            n_sources: sources.len(),
        });
    }

    debug!(
        n_sources = sources.len(),
        columns = ?l_columns,
        "Unified source headers"
    );
    Ok(SpecUnifiedHeader::from_columns(l_columns))
}

/// Columns a caller may choose from; same as [`unify_headers`].
pub fn list_selectable_headers(sources: &[SpecSourceTable]) -> Result<Vec<String>> {
    Ok(unify_headers(sources)?.columns().to_vec())
}

/// Keep only `selected` columns, preserving unified order.
///
/// Fails with [`FormatError::NoSelection`] when nothing is kept.
pub fn select_columns(
    header: &SpecUnifiedHeader,
    selected: &[String],
) -> Result<SpecUnifiedHeader> {
    let set_selected: BTreeSet<&str> = selected.iter().map(String::as_str).collect();
    let l_columns: Vec<String> = header
        .columns()
        .iter()
        .filter(|c_name| set_selected.contains(c_name.as_str()))
        .cloned()
        .collect();

    if l_columns.is_empty() {
        return Err(FormatError::NoSelection);
    }
    Ok(SpecUnifiedHeader::from_columns(l_columns))
}

/// Selected names that match no unified column.
pub fn derive_unknown_selections(header: &SpecUnifiedHeader, selected: &[String]) -> Vec<String> {
    selected
        .iter()
        .filter(|c_name| header.position(c_name).is_none())
        .cloned()
        .collect()
}
