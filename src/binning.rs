//! Histogram bin count selection.
//!
//! Low-cardinality columns get one bin per distinct value, medium-cardinality
//! columns a fixed count, and everything else the Freedman–Diaconis rule with
//! a floor of [`MIN_STATISTICAL_BINS`].

use std::fmt;

use serde::Serialize;

use crate::column::Column;

/// Columns with at most this many distinct values get one bin per value.
pub const PER_VALUE_LIMIT: usize = 5;
/// Columns with at most this many distinct values get [`MEDIUM_CARDINALITY_BINS`].
pub const MEDIUM_CARDINALITY_LIMIT: usize = 30;
pub const MEDIUM_CARDINALITY_BINS: usize = 15;
/// Lower bound once Freedman–Diaconis applies, also the degenerate-spread fallback.
pub const MIN_STATISTICAL_BINS: usize = 10;
/// Largest bin count [`Histogram::compute`] will materialize. A long tail can
/// push Freedman–Diaconis far past this.
pub const MAX_HISTOGRAM_BINS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinRule {
    PerValue,
    MediumCardinality,
    FreedmanDiaconis,
    DegenerateSpread,
}

impl fmt::Display for BinRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BinRule::PerValue => "per-value",
            BinRule::MediumCardinality => "medium-cardinality",
            BinRule::FreedmanDiaconis => "freedman-diaconis",
            BinRule::DegenerateSpread => "degenerate-spread",
        };
        f.write_str(label)
    }
}

/// Outcome of bin selection. `Skip` marks an empty or constant column, which
/// has no histogram; it is a normal result rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Binning {
    Skip,
    Bins { count: usize, rule: BinRule },
}

impl Binning {
    pub fn count(&self) -> Option<usize> {
        match self {
            Binning::Skip => None,
            Binning::Bins { count, .. } => Some(*count),
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Binning::Skip)
    }
}

/// Picks a histogram bin count for `values`. Missing (non-finite) entries are
/// dropped first.
pub fn compute_bin_count(values: &[f64]) -> Binning {
    Column::from_values(values.iter().copied()).bin_count()
}

impl Column {
    pub fn bin_count(&self) -> Binning {
        let (Some(min), Some(max)) = (self.min(), self.max()) else {
            return Binning::Skip;
        };
        if min == max {
            return Binning::Skip;
        }

        let distinct = self.distinct_count();
        if distinct <= PER_VALUE_LIMIT {
            return Binning::Bins {
                count: distinct,
                rule: BinRule::PerValue,
            };
        }
        if distinct <= MEDIUM_CARDINALITY_LIMIT {
            return Binning::Bins {
                count: MEDIUM_CARDINALITY_BINS,
                rule: BinRule::MediumCardinality,
            };
        }

        let Some((q1, q3)) = self.quartiles() else {
            return Binning::Skip;
        };
        let iqr = q3 - q1;
        let bin_width = 2.0 * iqr * (self.count() as f64).powf(-1.0 / 3.0);
        let range = max - min;
        if bin_width <= 0.0 || range == 0.0 {
            return Binning::Bins {
                count: MIN_STATISTICAL_BINS,
                rule: BinRule::DegenerateSpread,
            };
        }
        // `as` saturates, so an extreme range/width ratio cannot wrap.
        let count = ((range / bin_width).ceil() as usize).max(MIN_STATISTICAL_BINS);
        Binning::Bins {
            count,
            rule: BinRule::FreedmanDiaconis,
        }
    }
}

/// Equal-width histogram over `[min, max]`; the last bin is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Returns `None` when `bins` is zero or above [`MAX_HISTOGRAM_BINS`], or
    /// the column is empty or constant.
    pub fn compute(column: &Column, bins: usize) -> Option<Self> {
        let (min, max) = (column.min()?, column.max()?);
        if bins == 0 || bins > MAX_HISTOGRAM_BINS || min == max {
            return None;
        }
        let step = (max - min) / bins as f64;
        let edges = (0..=bins)
            .map(|i| if i == bins { max } else { min + i as f64 * step })
            .collect::<Vec<_>>();
        let mut counts = vec![0usize; bins];
        for &value in column.values() {
            let idx = (((value - min) / step).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Some(Self { edges, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// `(lower, upper, count)` per bin.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}
