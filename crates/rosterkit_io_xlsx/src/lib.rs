//! `rosterkit_io_xlsx` v1:
//! Workbook I/O around the `rosterkit_core` formatting engine.
//!
//! - `conf`     : Excel limits and output names
//! - `error`    : I/O error type
//! - `util`     : pure helper functions
//! - `reader`   : calamine/polars source ingestion
//! - `writer`   : rust_xlsxwriter grid serialization
//! - `pipeline` : read → format → write in one call
pub mod conf;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod util;
pub mod writer;

pub use conf::{
    C_FILE_NAME_OUT_DEFAULT, C_SHEET_NAME_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
pub use error::{Result, XlsxIoError};
pub use pipeline::{
    format_files_to_buffer, format_files_to_xlsx, format_sources_to_buffer,
    format_uploads_to_buffer, read_source_tables,
};
pub use reader::{
    read_source_table, read_source_table_from_bytes, source_table_from_dataframe,
    source_table_from_ipc_bytes,
};
pub use util::{derive_horizontal_merge_tracker, sanitize_sheet_name, validate_grid_limits};
pub use writer::{SpecXlsxGridWriteOptions, XlsxGridWriter, write_grid_to_buffer};
