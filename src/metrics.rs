//! Quality metrics measured from a dataset, each as a percentage.

use std::collections::HashSet;

use log::debug;

use crate::{dataset::Dataset, score::QualityMetrics};

/// Share of cells that are present. An empty dataset counts as complete.
pub fn completeness(dataset: &Dataset) -> f64 {
    let total = dataset.row_count() * dataset.column_count();
    if total == 0 {
        return 100.0;
    }
    let present = dataset
        .rows()
        .iter()
        .map(|row| row.iter().filter(|cell| cell.is_some()).count())
        .sum::<usize>();
    present as f64 / total as f64 * 100.0
}

/// Share of rows that are not duplicates of an earlier row.
pub fn uniqueness(dataset: &Dataset) -> f64 {
    if dataset.row_count() == 0 {
        return 100.0;
    }
    let distinct = dataset.rows().iter().collect::<HashSet<_>>().len();
    distinct as f64 / dataset.row_count() as f64 * 100.0
}

/// Share of numeric values lying inside their column's IQR fences.
pub fn outlier_free(dataset: &Dataset) -> f64 {
    let mut total = 0usize;
    let mut outliers = 0usize;
    for (_, name, column) in dataset.numeric_columns() {
        if let Some(report) = column.outliers() {
            debug!(
                "Column '{}': {} outlier(s) in {} value(s)",
                name,
                report.count(),
                report.total
            );
            total += report.total;
            outliers += report.count();
        }
    }
    if total == 0 {
        return 100.0;
    }
    (total - outliers) as f64 / total as f64 * 100.0
}

pub fn measure(dataset: &Dataset) -> QualityMetrics {
    QualityMetrics {
        completeness: completeness(dataset),
        uniqueness: uniqueness(dataset),
        outliers: outlier_free(dataset),
    }
}
