//! Text normalization: title-casing, fixed substitutions, column-name rules.

use crate::conf::{
    C_SORT_COLUMN_NAME, TUP_IDENTITY_COLUMN_ALIASES, TUP_ROLL_NUMBER_COLUMN_ALIASES,
    TUP_TEXT_SUBSTITUTIONS,
};
use crate::spec::EnumCellValue;

/// Trim and case-fold a column name for alias matching.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Whether `name` is a serial/row-number column the engine regenerates.
pub fn is_identity_column(name: &str) -> bool {
    TUP_IDENTITY_COLUMN_ALIASES.contains(&normalize_column_name(name).as_str())
}

/// Whether values of column `name` are upper-cased after normalization.
pub fn is_roll_number_column(name: &str) -> bool {
    TUP_ROLL_NUMBER_COLUMN_ALIASES.contains(&normalize_column_name(name).as_str())
}

/// Whether rows are ordered by column `name`.
pub fn is_sort_column(name: &str) -> bool {
    normalize_column_name(name) == C_SORT_COLUMN_NAME
}

/// Title-case `text`.
///
/// A letter is upper-cased when it starts a word and lower-cased otherwise;
/// any non-alphabetic character ends a word (`"r1-a"` -> `"R1-A"`).
pub fn convert_title_case(text: &str) -> String {
    let mut c_out = String::with_capacity(text.len());
    let mut if_in_word = false;
    for chr in text.chars() {
        if chr.is_alphabetic() {
            if if_in_word {
                c_out.extend(chr.to_lowercase());
            } else {
                c_out.extend(chr.to_uppercase());
            }
            if_in_word = true;
        } else {
            c_out.push(chr);
            if_in_word = false;
        }
    }
    c_out
}

/// Title-case `text` and apply the first matching substitution.
pub fn normalize_text(text: &str) -> String {
    let c_title = convert_title_case(text);
    TUP_TEXT_SUBSTITUTIONS
        .iter()
        .find(|(c_from, _)| *c_from == c_title)
        .map_or(c_title, |(_, c_to)| (*c_to).to_string())
}

/// Normalize one cell value; non-text values pass through unchanged.
pub fn normalize_cell_value(value: &EnumCellValue) -> EnumCellValue {
    match value {
        EnumCellValue::String(s) => EnumCellValue::String(normalize_text(s)),
        other => other.clone(),
    }
}

/// Normalize one cell value originating from column `column_name`.
///
/// Roll-number columns are upper-cased after substitution.
pub fn normalize_column_value(value: &EnumCellValue, column_name: &str) -> EnumCellValue {
    let value_norm = normalize_cell_value(value);
    if !is_roll_number_column(column_name) {
        return value_norm;
    }
    match value_norm {
        EnumCellValue::String(s) => EnumCellValue::String(s.to_uppercase()),
        other => other,
    }
}
