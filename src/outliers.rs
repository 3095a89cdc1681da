//! Tukey-fence outlier detection used for boxplot summaries.

use serde::Serialize;

use crate::column::Column;

/// Fence multiplier applied to the interquartile range.
pub const FENCE_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Values outside the fences, in input order.
    pub outliers: Vec<f64>,
    /// Number of values examined.
    pub total: usize,
}

impl OutlierReport {
    pub fn count(&self) -> usize {
        self.outliers.len()
    }

    /// Percentage of examined values lying inside the fences.
    pub fn inlier_share(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.total - self.count()) as f64 / self.total as f64 * 100.0
    }
}

/// Values outside `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]`. Returns `None` when no
/// finite values remain.
pub fn detect_outliers(values: &[f64]) -> Option<OutlierReport> {
    Column::from_values(values.iter().copied()).outliers()
}

impl Column {
    pub fn outliers(&self) -> Option<OutlierReport> {
        let (q1, q3) = self.quartiles()?;
        let iqr = q3 - q1;
        let lower_bound = q1 - FENCE_FACTOR * iqr;
        let upper_bound = q3 + FENCE_FACTOR * iqr;
        let outliers = self
            .values()
            .iter()
            .copied()
            .filter(|&v| v < lower_bound || v > upper_bound)
            .collect();
        Some(OutlierReport {
            q1,
            q3,
            iqr,
            lower_bound,
            upper_bound,
            outliers,
            total: self.count(),
        })
    }
}
