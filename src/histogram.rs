use anyhow::Result;
use log::{info, warn};

use crate::{
    binning::{Binning, Histogram, MAX_HISTOGRAM_BINS},
    cli::BinsArgs,
    load_input,
    table::{self, format_number, format_optional},
};

pub fn execute(args: &BinsArgs) -> Result<()> {
    let dataset = load_input(&args.source)?;
    let columns = dataset.select_numeric(&args.columns)?;
    if columns.is_empty() {
        info!("No numeric columns to bin");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(columns.len());
    let mut histograms = Vec::new();
    for (_, name, column) in &columns {
        let binning = column.bin_count();
        let (bins, rule) = match binning {
            Binning::Skip => {
                warn!("Column '{name}' is empty or constant; no histogram");
                ("skip".to_string(), String::new())
            }
            Binning::Bins { count, rule } => {
                if args.histogram {
                    if count > MAX_HISTOGRAM_BINS {
                        warn!(
                            "Column '{name}' needs {count} bins, above the histogram limit of {MAX_HISTOGRAM_BINS}; no histogram"
                        );
                    } else if let Some(histogram) = Histogram::compute(column, count) {
                        histograms.push((name.to_string(), histogram));
                    }
                }
                (count.to_string(), rule.to_string())
            }
        };
        rows.push(vec![
            name.to_string(),
            column.count().to_string(),
            column.distinct_count().to_string(),
            format_optional(column.min()),
            format_optional(column.max()),
            bins,
            rule,
        ]);
    }

    let headers = table::headers(&["column", "count", "distinct", "min", "max", "bins", "rule"]);
    table::print_table(&headers, &rows);

    for (name, histogram) in &histograms {
        println!();
        println!("{name}");
        let rows = histogram
            .iter()
            .map(|(lower, upper, count)| {
                vec![format_number(lower), format_number(upper), count.to_string()]
            })
            .collect::<Vec<_>>();
        table::print_table(&table::headers(&["from", "to", "count"]), &rows);
    }
    info!("Selected bin counts for {} column(s)", rows.len());
    Ok(())
}
