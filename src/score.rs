//! Weighted data quality score.
//!
//! Three raw weights (completeness, uniqueness, outliers) are rescaled to sum
//! to 100 and then used to average three metric percentages into a single
//! score in `[0, 100]`. A score at or above the threshold passes.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_THRESHOLD: f64 = 75.0;
pub const DEFAULT_COMPLETENESS_WEIGHT: f64 = 45.0;
pub const DEFAULT_UNIQUENESS_WEIGHT: f64 = 25.0;
pub const DEFAULT_OUTLIERS_WEIGHT: f64 = 30.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoreError {
    /// All three weights are zero, so they cannot be normalized.
    #[error("quality weights sum to zero; at least one weight must be positive")]
    ZeroWeightSum,

    #[error("{dimension} weight must be a non-negative number, got {value}")]
    InvalidWeight { dimension: Dimension, value: f64 },

    #[error("{dimension} metric must be a percentage between 0 and 100, got {value}")]
    MetricOutOfRange { dimension: Dimension, value: f64 },

    #[error("threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(f64),

    /// The weights are finite but their sum is not.
    #[error("quality weights are too large to sum; scale them down")]
    WeightSumOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Completeness,
    Uniqueness,
    Outliers,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Completeness,
        Dimension::Uniqueness,
        Dimension::Outliers,
    ];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Dimension::Completeness => "Completeness",
            Dimension::Uniqueness => "Uniqueness",
            Dimension::Outliers => "Outliers",
        };
        f.write_str(label)
    }
}

/// What to do when every raw weight is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum ZeroWeightPolicy {
    /// Fail with [`ScoreError::ZeroWeightSum`].
    #[default]
    Reject,
    /// Fall back to equal thirds.
    Equal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    pub completeness: f64,
    pub uniqueness: f64,
    pub outliers: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            completeness: DEFAULT_COMPLETENESS_WEIGHT,
            uniqueness: DEFAULT_UNIQUENESS_WEIGHT,
            outliers: DEFAULT_OUTLIERS_WEIGHT,
        }
    }
}

impl QualityWeights {
    pub fn new(completeness: f64, uniqueness: f64, outliers: f64) -> Self {
        Self {
            completeness,
            uniqueness,
            outliers,
        }
    }

    fn entries(&self) -> [(Dimension, f64); 3] {
        [
            (Dimension::Completeness, self.completeness),
            (Dimension::Uniqueness, self.uniqueness),
            (Dimension::Outliers, self.outliers),
        ]
    }
}

/// Weights rescaled so that they sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedWeights {
    pub completeness: f64,
    pub uniqueness: f64,
    pub outliers: f64,
}

impl NormalizedWeights {
    pub fn equal() -> Self {
        let third = 100.0 / 3.0;
        Self {
            completeness: third,
            uniqueness: third,
            outliers: third,
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Completeness => self.completeness,
            Dimension::Uniqueness => self.uniqueness,
            Dimension::Outliers => self.outliers,
        }
    }

    pub fn total(&self) -> f64 {
        self.completeness + self.uniqueness + self.outliers
    }
}

/// Metric values, each a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub completeness: f64,
    pub uniqueness: f64,
    pub outliers: f64,
}

impl QualityMetrics {
    pub fn new(completeness: f64, uniqueness: f64, outliers: f64) -> Result<Self, ScoreError> {
        let metrics = Self {
            completeness,
            uniqueness,
            outliers,
        };
        metrics.validate()?;
        Ok(metrics)
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        for dimension in Dimension::ALL {
            let value = self.get(dimension);
            if !(0.0..=100.0).contains(&value) {
                return Err(ScoreError::MetricOutOfRange { dimension, value });
            }
        }
        Ok(())
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Completeness => self.completeness,
            Dimension::Uniqueness => self.uniqueness,
            Dimension::Outliers => self.outliers,
        }
    }
}

/// Rescales `weights` to sum to 100, rejecting an all-zero set.
pub fn normalize_weights(weights: &QualityWeights) -> Result<NormalizedWeights, ScoreError> {
    normalize_weights_with(weights, ZeroWeightPolicy::Reject)
}

pub fn normalize_weights_with(
    weights: &QualityWeights,
    policy: ZeroWeightPolicy,
) -> Result<NormalizedWeights, ScoreError> {
    for (dimension, value) in weights.entries() {
        if !value.is_finite() || value < 0.0 {
            return Err(ScoreError::InvalidWeight { dimension, value });
        }
    }
    let total = weights.completeness + weights.uniqueness + weights.outliers;
    if !total.is_finite() {
        return Err(ScoreError::WeightSumOverflow);
    }
    if total == 0.0 {
        return match policy {
            ZeroWeightPolicy::Reject => Err(ScoreError::ZeroWeightSum),
            ZeroWeightPolicy::Equal => Ok(NormalizedWeights::equal()),
        };
    }
    Ok(NormalizedWeights {
        completeness: weights.completeness / total * 100.0,
        uniqueness: weights.uniqueness / total * 100.0,
        outliers: weights.outliers / total * 100.0,
    })
}

/// Weighted average of the metric percentages.
pub fn compute_quality_score(weights: &NormalizedWeights, metrics: &QualityMetrics) -> f64 {
    Dimension::ALL
        .iter()
        .map(|&dimension| weights.get(dimension) / 100.0 * metrics.get(dimension))
        .sum()
}

/// A scored dataset and its verdict against a threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub weights: NormalizedWeights,
    pub metrics: QualityMetrics,
    pub score: f64,
    pub threshold: f64,
    pub passed: bool,
}

impl Assessment {
    pub fn evaluate(
        weights: &QualityWeights,
        metrics: &QualityMetrics,
        threshold: f64,
        policy: ZeroWeightPolicy,
    ) -> Result<Self, ScoreError> {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ScoreError::InvalidThreshold(threshold));
        }
        metrics.validate()?;
        let normalized = normalize_weights_with(weights, policy)?;
        let score = compute_quality_score(&normalized, metrics);
        Ok(Self {
            weights: normalized,
            metrics: *metrics,
            score,
            threshold,
            passed: score >= threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn normalizes_to_one_hundred() {
        let normalized = normalize_weights(&QualityWeights::new(1.0, 1.0, 2.0)).unwrap();
        assert!(close(normalized.completeness, 25.0));
        assert!(close(normalized.uniqueness, 25.0));
        assert!(close(normalized.outliers, 50.0));
        assert!(close(normalized.total(), 100.0));
    }

    #[test]
    fn zero_sum_is_rejected_by_default() {
        let zero = QualityWeights::new(0.0, 0.0, 0.0);
        assert_eq!(normalize_weights(&zero), Err(ScoreError::ZeroWeightSum));
        let equal = normalize_weights_with(&zero, ZeroWeightPolicy::Equal).unwrap();
        assert!(close(equal.total(), 100.0));
        assert!(close(equal.outliers, 100.0 / 3.0));
    }

    #[test]
    fn negative_weights_are_invalid() {
        let err = normalize_weights(&QualityWeights::new(10.0, -1.0, 5.0)).unwrap_err();
        assert_eq!(
            err,
            ScoreError::InvalidWeight {
                dimension: Dimension::Uniqueness,
                value: -1.0
            }
        );
    }

    #[test]
    fn overflowing_weight_sum_is_an_error() {
        let huge = QualityWeights::new(f64::MAX, f64::MAX, 1.0);
        assert_eq!(normalize_weights(&huge), Err(ScoreError::WeightSumOverflow));

        let large = normalize_weights(&QualityWeights::new(1e300, 1e300, 2e300)).unwrap();
        assert!(close(large.total(), 100.0));
        assert!(close(large.outliers, 50.0));
    }

    #[test]
    fn default_weights_pass_with_clean_metrics() {
        let metrics = QualityMetrics::new(100.0, 100.0, 70.0).unwrap();
        let assessment = Assessment::evaluate(
            &QualityWeights::default(),
            &metrics,
            DEFAULT_THRESHOLD,
            ZeroWeightPolicy::Reject,
        )
        .unwrap();
        assert!(close(assessment.weights.completeness, 45.0));
        assert!(close(assessment.score, 91.0));
        assert!(assessment.passed);
    }

    #[test]
    fn dirty_metrics_fail_threshold() {
        let weights = normalize_weights(&QualityWeights::new(40.0, 30.0, 30.0)).unwrap();
        let metrics = QualityMetrics::new(75.5, 100.0, 30.0).unwrap();
        let score = compute_quality_score(&weights, &metrics);
        assert!(close(score, 69.2));
        assert!(score < DEFAULT_THRESHOLD);
    }

    #[test]
    fn metrics_outside_percentage_range_are_rejected() {
        let err = QualityMetrics::new(101.0, 50.0, 50.0).unwrap_err();
        assert!(err.to_string().contains("Completeness"));
    }

    #[test]
    fn threshold_is_inclusive() {
        let metrics = QualityMetrics::new(75.0, 75.0, 75.0).unwrap();
        let assessment = Assessment::evaluate(
            &QualityWeights::new(1.0, 1.0, 2.0),
            &metrics,
            75.0,
            ZeroWeightPolicy::Reject,
        )
        .unwrap();
        assert_eq!(assessment.score, 75.0);
        assert!(assessment.passed);
    }
}
