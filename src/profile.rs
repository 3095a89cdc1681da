//! Column-by-column qualitative summary.
//!
//! Every selected column reports its present-value count, missing count and
//! distinct count. Numeric columns additionally report mean, sample standard
//! deviation, min, quartiles and max.

use anyhow::{Result, anyhow};
use log::info;

use crate::{
    cli::ProfileArgs,
    column::Column,
    dataset::Dataset,
    load_input,
    table::{self, format_optional},
};

pub fn execute(args: &ProfileArgs) -> Result<()> {
    let dataset = load_input(&args.source)?;
    let columns = resolve_columns(&dataset, &args.columns)?;

    let mut rows = Vec::with_capacity(columns.len());
    for idx in columns {
        let summary = ColumnSummary::from_dataset(&dataset, idx);
        if args.numeric_only && summary.numeric.is_none() {
            continue;
        }
        rows.push(summary.render_row());
    }

    let headers = table::headers(&[
        "column", "count", "null_count", "unique_count", "mean", "std", "min", "25%", "50%",
        "75%", "max",
    ]);
    table::print_table(&headers, &rows);
    info!("Profiled {} column(s)", rows.len());
    Ok(())
}

fn resolve_columns(dataset: &Dataset, specified: &[String]) -> Result<Vec<usize>> {
    if specified.is_empty() {
        return Ok((0..dataset.column_count()).collect());
    }
    specified
        .iter()
        .map(|name| {
            dataset
                .column_index(name)
                .ok_or_else(|| anyhow!("Column '{name}' not found in input"))
        })
        .collect()
}

struct ColumnSummary {
    name: String,
    count: usize,
    null_count: usize,
    unique_count: usize,
    numeric: Option<Column>,
}

impl ColumnSummary {
    fn from_dataset(dataset: &Dataset, idx: usize) -> Self {
        let null_count = dataset.null_count(idx);
        Self {
            name: dataset.headers()[idx].clone(),
            count: dataset.row_count() - null_count,
            null_count,
            unique_count: dataset.unique_count(idx),
            numeric: dataset.numeric_column(idx),
        }
    }

    fn render_row(&self) -> Vec<String> {
        let mut row = vec![
            self.name.clone(),
            self.count.to_string(),
            self.null_count.to_string(),
            self.unique_count.to_string(),
        ];
        let column = self.numeric.as_ref();
        let metric = |f: fn(&Column) -> Option<f64>| format_optional(column.and_then(f));
        row.push(metric(Column::mean));
        row.push(metric(Column::std_dev));
        row.push(metric(Column::min));
        row.push(metric(|c| c.quantile(0.25)));
        row.push(metric(Column::median));
        row.push(metric(|c| c.quantile(0.75)));
        row.push(metric(Column::max));
        row
    }
}
