use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, load_input, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let dataset = load_input(&args.source)?;
    let rows = dataset
        .rows()
        .iter()
        .take(args.rows)
        .map(|row| {
            row.iter()
                .map(|cell| cell.clone().unwrap_or_default())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::print_table(dataset.headers(), &rows);
    info!("Displayed {} row(s) from {:?}", rows.len(), args.source.input);
    Ok(())
}
