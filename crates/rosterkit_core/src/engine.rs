//! End-to-end formatting run over in-memory sources.

use tracing::{info, warn};

use crate::error::Result;
use crate::layout::build_output_with_options;
use crate::merge::merge_rows;
use crate::order::normalize_and_order;
use crate::report::SpecFormatReport;
use crate::spec::{SpecFormatOptions, SpecOutputGrid, SpecSourceTable};
use crate::style::apply_styles;
use crate::unify::{derive_unknown_selections, select_columns, unify_headers};

/// Styled grid plus run report.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecFormatOutput {
    /// Finished grid, ready for serialization.
    pub grid: SpecOutputGrid,
    /// Run report.
    pub report: SpecFormatReport,
}

/// Run unify → select → merge → normalize/order → layout → style.
///
/// Sources are consumed; any error aborts the run without a grid.
pub fn format_sources(
    sources: Vec<SpecSourceTable>,
    title: &str,
    options: &SpecFormatOptions,
) -> Result<SpecFormatOutput> {
    let mut report = SpecFormatReport {
        n_sources: sources.len(),
        ..Default::default()
    };

    let header_all = unify_headers(&sources)?;
    let header = match &options.cols_selected {
        Some(l_selected) => {
            for c_name in derive_unknown_selections(&header_all, l_selected) {
                report.warn(format!("Selected column not found: {c_name:?}"));
            }
            select_columns(&header_all, l_selected)?
        }
        None => header_all,
    };

    for source in sources.iter().filter(|source| source.height_data() == 0) {
        report.warn(format!("Source has no data rows: {:?}", source.name));
    }

    let l_rows = merge_rows(&sources, &header);
    drop(sources);

    let dataset = normalize_and_order(l_rows, &header);
    let mut grid = build_output_with_options(&dataset, &header, title, &options.layout);
    apply_styles(&mut grid, &options.formats);

    report.n_rows = dataset.len();
    report.columns = header.columns().to_vec();
    report.sort_column = dataset.sort_column;

    for c_warning in &report.warnings {
        warn!("{c_warning}");
    }
    info!("{report}");

    Ok(SpecFormatOutput { grid, report })
}
