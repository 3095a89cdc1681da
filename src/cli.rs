use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::score::ZeroWeightPolicy;

#[derive(Debug, Parser)]
#[command(author, version, about = "Profile and score the quality of CSV datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Preview the first few rows of a CSV file in a formatted table
    Preview(PreviewArgs),
    /// Summarize every column: counts, nulls, distinct values, quartiles
    Profile(ProfileArgs),
    /// Choose histogram bin counts for numeric columns
    Bins(BinsArgs),
    /// Report IQR outliers for numeric columns
    Outliers(OutliersArgs),
    /// Combine weighted quality metrics into a pass/fail score
    Score(ScoreArgs),
}

/// Input options shared by every command that reads a CSV file.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Input CSV file (`-` reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Number of rows to display
    #[arg(long, default_value_t = 5)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Columns to include (defaults to all columns)
    #[arg(short = 'C', long = "columns", value_delimiter = ',')]
    pub columns: Vec<String>,
    /// Only summarize numeric columns
    #[arg(long = "numeric-only")]
    pub numeric_only: bool,
}

#[derive(Debug, Args)]
pub struct BinsArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Columns to include (defaults to numeric columns)
    #[arg(short = 'C', long = "columns", value_delimiter = ',')]
    pub columns: Vec<String>,
    /// Also print bin ranges and counts for each column
    #[arg(long)]
    pub histogram: bool,
}

#[derive(Debug, Args)]
pub struct OutliersArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Columns to include (defaults to numeric columns)
    #[arg(short = 'C', long = "columns", value_delimiter = ',')]
    pub columns: Vec<String>,
    /// List the outlying values of each column
    #[arg(long = "show-values")]
    pub show_values: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// CSV file to measure completeness, uniqueness and outliers from
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// CSV delimiter character
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML quality profile with weights, threshold and optional metrics
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Raw weight of the completeness dimension (default 45)
    #[arg(long = "completeness-weight")]
    pub completeness_weight: Option<f64>,
    /// Raw weight of the uniqueness dimension (default 25)
    #[arg(long = "uniqueness-weight")]
    pub uniqueness_weight: Option<f64>,
    /// Raw weight of the outliers dimension (default 30)
    #[arg(long = "outliers-weight")]
    pub outliers_weight: Option<f64>,
    /// Completeness metric in percent (measured from --input when omitted)
    #[arg(long)]
    pub completeness: Option<f64>,
    /// Uniqueness metric in percent (measured from --input when omitted)
    #[arg(long)]
    pub uniqueness: Option<f64>,
    /// Outliers metric in percent, 100 meaning no outliers (measured from --input when omitted)
    #[arg(long)]
    pub outliers: Option<f64>,
    /// Minimum score that passes (default 75)
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Policy when every weight is zero
    #[arg(long = "zero-weights", value_enum)]
    pub zero_weights: Option<ZeroWeightPolicy>,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_named_delimiters() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("semicolon"), Ok(b';'));
        assert_eq!(parse_delimiter(":"), Ok(b':'));
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
