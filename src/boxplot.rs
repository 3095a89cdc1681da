use anyhow::Result;
use itertools::Itertools;
use log::{info, warn};

use crate::{
    cli::OutliersArgs,
    load_input,
    table::{self, format_number},
};

pub fn execute(args: &OutliersArgs) -> Result<()> {
    let dataset = load_input(&args.source)?;
    let columns = dataset.select_numeric(&args.columns)?;
    if columns.is_empty() {
        info!("No numeric columns to inspect");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(columns.len());
    let mut total_outliers = 0usize;
    for (_, name, column) in &columns {
        let Some(report) = column.outliers() else {
            warn!("Column '{name}' has no values; skipping");
            continue;
        };
        total_outliers += report.count();
        let mut row = vec![
            name.to_string(),
            report.total.to_string(),
            format_number(report.q1),
            format_number(report.q3),
            format_number(report.iqr),
            format_number(report.lower_bound),
            format_number(report.upper_bound),
            report.count().to_string(),
        ];
        if args.show_values {
            row.push(report.outliers.iter().map(|v| format_number(*v)).join(" "));
        }
        rows.push(row);
    }

    let mut headers = table::headers(&[
        "column", "count", "q1", "q3", "iqr", "lower", "upper", "outliers",
    ]);
    if args.show_values {
        headers.push("values".to_string());
    }
    table::print_table(&headers, &rows);
    info!(
        "Found {} outlier(s) across {} column(s)",
        total_outliers,
        rows.len()
    );
    Ok(())
}
