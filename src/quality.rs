//! The `score` command: resolve weights, threshold and metrics from flags, an
//! optional YAML profile and (when needed) a measured dataset, then report
//! the weighted score and its verdict.

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};

use crate::{
    cli::{InputArgs, OutputFormat, ScoreArgs},
    config::QualityProfile,
    load_input, metrics,
    score::{Assessment, Dimension, QualityMetrics, QualityWeights},
    table::{self, format_number},
};

pub fn execute(args: &ScoreArgs) -> Result<()> {
    let profile = match &args.config {
        Some(path) => QualityProfile::load(path)
            .with_context(|| format!("Loading quality profile from {path:?}"))?,
        None => QualityProfile::default(),
    };

    let weights = resolve_weights(args, &profile);
    let threshold = args.threshold.unwrap_or_else(|| profile.threshold());
    let policy = args.zero_weights.or(profile.zero_weights).unwrap_or_default();
    let metrics = resolve_metrics(args, &profile)?;
    debug!("Scoring with weights {weights:?}, metrics {metrics:?}, threshold {threshold}");

    let assessment = Assessment::evaluate(&weights, &metrics, threshold, policy)?;
    match args.format {
        OutputFormat::Table => print_assessment(&assessment),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&assessment).context("Serializing assessment")?
        ),
    }

    if assessment.passed {
        info!(
            "Quality score {:.1} meets threshold {}",
            assessment.score, assessment.threshold
        );
    } else {
        warn!(
            "Quality score {:.1} is below the acceptable threshold {}",
            assessment.score, assessment.threshold
        );
    }
    Ok(())
}

fn resolve_weights(args: &ScoreArgs, profile: &QualityProfile) -> QualityWeights {
    QualityWeights::new(
        args.completeness_weight
            .unwrap_or(profile.weights.completeness),
        args.uniqueness_weight.unwrap_or(profile.weights.uniqueness),
        args.outliers_weight.unwrap_or(profile.weights.outliers),
    )
}

/// Flags win over the profile; anything still unset is measured from the input.
fn resolve_metrics(args: &ScoreArgs, profile: &QualityProfile) -> Result<QualityMetrics> {
    let completeness = args.completeness.or(profile.metrics.completeness);
    let uniqueness = args.uniqueness.or(profile.metrics.uniqueness);
    let outliers = args.outliers.or(profile.metrics.outliers);

    if let (Some(completeness), Some(uniqueness), Some(outliers)) =
        (completeness, uniqueness, outliers)
    {
        return Ok(QualityMetrics {
            completeness,
            uniqueness,
            outliers,
        });
    }

    let input = args.input.clone().ok_or_else(|| {
        anyhow!("Provide --input to measure quality metrics, or supply all three metric values")
    })?;
    let dataset = load_input(&InputArgs {
        input,
        delimiter: args.delimiter,
        input_encoding: args.input_encoding.clone(),
    })?;
    let measured = metrics::measure(&dataset);
    info!(
        "Measured completeness {:.1}%, uniqueness {:.1}%, outliers {:.1}%",
        measured.completeness, measured.uniqueness, measured.outliers
    );
    Ok(QualityMetrics {
        completeness: completeness.unwrap_or(measured.completeness),
        uniqueness: uniqueness.unwrap_or(measured.uniqueness),
        outliers: outliers.unwrap_or(measured.outliers),
    })
}

fn print_assessment(assessment: &Assessment) {
    let rows = Dimension::ALL
        .iter()
        .map(|&dimension| {
            vec![
                dimension.to_string(),
                format!("{:.1}%", assessment.weights.get(dimension)),
                format!("{:.1}%", assessment.metrics.get(dimension)),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&table::headers(&["dimension", "weight", "metric"]), &rows);
    println!();
    let verdict = if assessment.passed { "PASS" } else { "FAIL" };
    println!(
        "score: {} (threshold {}) {verdict}",
        format_number(assessment.score),
        format_number(assessment.threshold)
    );
}
