//! `rosterkit_core` v1:
//! In-memory roster formatting engine.
//!
//! Modules, in data-flow order:
//! - `unify`     : header unification and column selection
//! - `merge`     : projection of source rows onto the unified header
//! - `normalize` : title-casing and fixed text substitutions
//! - `order`     : stable name ordering and serial numbers
//! - `layout`    : margin/title/header/data placement and column widths
//! - `style`     : band formats, grid lines and print area
//! - `engine`    : the whole run in one call
//!
//! Support modules: `conf` (constants and presets), `spec` (models/options),
//! `error`, `report`.
pub mod conf;
pub mod engine;
pub mod error;
pub mod layout;
pub mod merge;
pub mod normalize;
pub mod order;
pub mod report;
pub mod spec;
pub mod style;
pub mod unify;

pub use engine::{SpecFormatOutput, format_sources};
pub use error::{FormatError, Result};
pub use layout::{build_output, build_output_with_options};
pub use merge::merge_rows;
pub use normalize::{normalize_cell_value, normalize_column_value, normalize_text};
pub use order::normalize_and_order;
pub use report::SpecFormatReport;
pub use spec::{
    EnumCellValue, EnumGridBand, SpecCellFormat, SpecFormatOptions, SpecGridCell,
    SpecGridFormats, SpecLayoutOptions, SpecMergedRow, SpecOrderedDataset, SpecOrderedRow,
    SpecOutputGrid, SpecPrintArea, SpecSheetHorizontalMerge, SpecSourceTable, SpecUnifiedHeader,
};
pub use style::apply_styles;
pub use unify::{list_selectable_headers, select_columns, unify_headers};
