pub mod binning;
pub mod cli;
pub mod column;
pub mod config;
pub mod dataset;
pub mod metrics;
pub mod outliers;
pub mod score;

mod boxplot;
mod histogram;
mod io_utils;
mod preview;
mod profile;
mod quality;
mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands, InputArgs},
    dataset::{CsvSource, DataSource, Dataset},
};

pub use binning::{BinRule, Binning, Histogram, compute_bin_count};
pub use column::Column;
pub use outliers::{OutlierReport, detect_outliers};
pub use score::{
    Assessment, NormalizedWeights, QualityMetrics, QualityWeights, ScoreError, ZeroWeightPolicy,
    compute_quality_score, normalize_weights, normalize_weights_with,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_quality", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => preview::execute(&args),
        Commands::Profile(args) => profile::execute(&args),
        Commands::Bins(args) => histogram::execute(&args),
        Commands::Outliers(args) => boxplot::execute(&args),
        Commands::Score(args) => quality::execute(&args),
    }
}

pub(crate) fn load_input(args: &InputArgs) -> Result<Dataset> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let source = CsvSource::new(args.delimiter, encoding);
    let dataset = source.load(&args.input)?;
    info!(
        "Loaded {} row(s) across {} column(s) from {:?}",
        dataset.row_count(),
        dataset.column_count(),
        args.input
    );
    Ok(dataset)
}
