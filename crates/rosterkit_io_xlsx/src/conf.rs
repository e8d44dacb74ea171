//! XLSX constants.

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Name of the formatted output worksheet.
pub const C_SHEET_NAME_DEFAULT: &str = "Formatted Data";
/// Suggested file name for the downloadable artifact.
pub const C_FILE_NAME_OUT_DEFAULT: &str = "Formatted.xlsx";
