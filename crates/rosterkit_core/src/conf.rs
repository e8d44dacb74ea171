//! Formatter constants and default preset factories.

use crate::spec::{SpecCellFormat, SpecGridFormats};

/// Label of the generated serial-number column.
pub const C_SERIAL_COLUMN_LABEL: &str = "S. No.";
/// Normalized name of the column rows are sorted by.
pub const C_SORT_COLUMN_NAME: &str = "name";

/// Normalized names treated as identity (serial/row-number) columns.
pub const TUP_IDENTITY_COLUMN_ALIASES: [&str; 11] = [
    "s. no.",
    "s. no",
    "s.no.",
    "s.no",
    "s no",
    "sno",
    "sr. no.",
    "sr no",
    "serial no",
    "serial no.",
    "serial number",
];

/// Normalized names of roll-number columns whose values are upper-cased.
pub const TUP_ROLL_NUMBER_COLUMN_ALIASES: [&str; 4] =
    ["roll no", "roll no.", "roll number", "roll. no."];

/// Exact-match substitutions applied after title-casing, first match wins.
pub const TUP_TEXT_SUBSTITUTIONS: [(&str, &str); 5] = [
    ("Bachelors Of Commerce - Commerce", "B.Com. (Hons.)"),
    ("Bachelors Of Arts - Humanities", "B.A. Hons. Economics"),
    ("Cgpa", "CGPA"),
    ("Na", "NA"),
    ("Roll No", "Roll. No."),
];

/// Width of the left/right margin columns.
pub const N_WIDTH_MARGIN_COLUMN: f64 = 2.0;
/// Fixed width given to header columns before autofit.
pub const N_WIDTH_HEADER_COLUMN: f64 = 20.0;
/// Padding added to autofit widths.
pub const N_WIDTH_AUTOFIT_PADDING: usize = 2;
/// Padding added to the rightmost data column instead of the standard one.
pub const N_WIDTH_AUTOFIT_PADDING_LAST: usize = 4;

/// Height of the top/bottom margin rows.
pub const N_HEIGHT_MARGIN_ROW: f64 = 10.0;
/// Height of the title band row.
pub const N_HEIGHT_TITLE_ROW: f64 = 20.0;
/// Height of the header band row.
pub const N_HEIGHT_HEADER_ROW: f64 = 20.0;

/// Build the default title/header/data format presets.
pub fn derive_default_grid_formats() -> SpecGridFormats {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Trebuchet MS".to_string()),
        border: Some(1),
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    };

    SpecGridFormats {
        fmt_title: cfg_base_fmt_spec.with_(SpecCellFormat {
            font_size: Some(11),
            bold: Some(true),
            font_color: Some("#000000".to_string()),
            bg_color: Some("#C9DAF8".to_string()),
            ..Default::default()
        }),
        fmt_header: cfg_base_fmt_spec.with_(SpecCellFormat {
            font_size: Some(12),
            bold: Some(true),
            font_color: Some("#FFFFFF".to_string()),
            bg_color: Some("#1B3055".to_string()),
            ..Default::default()
        }),
        fmt_data: cfg_base_fmt_spec.with_(SpecCellFormat {
            font_size: Some(10),
            ..Default::default()
        }),
    }
}
