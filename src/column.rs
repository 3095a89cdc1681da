//! Numeric column model shared by the binning, outlier and profiling code.
//!
//! A [`Column`] holds only the present values of a CSV column: missing
//! cells are dropped on construction, so every statistic below operates on
//! finite numbers.

use anyhow::{Result, anyhow};

/// Cell contents treated as missing in addition to the empty string.
pub const MISSING_TOKENS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL", "None", "-"];

pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    values: Vec<f64>,
    sorted: Vec<f64>,
}

impl Column {
    /// Builds a column from numbers, dropping NaN and infinite entries.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        Self { values, sorted }
    }

    /// Parses textual cells. `None` and missing tokens are skipped; any other
    /// cell that does not parse as a number is an error.
    pub fn from_fields<'a, I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut values = Vec::new();
        for (idx, field) in fields.into_iter().enumerate() {
            let Some(raw) = field else {
                continue;
            };
            if is_missing(raw) {
                continue;
            }
            let parsed = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| anyhow!("Value '{raw}' at position {} is not numeric", idx + 1))?;
            values.push(parsed);
        }
        Ok(Self::from_values(values))
    }

    /// Present values in input order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn sorted_values(&self) -> &[f64] {
        &self.sorted
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.sorted.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.sorted.last().copied()
    }

    /// True when the column is empty or every value is equal.
    pub fn is_constant(&self) -> bool {
        match (self.min(), self.max()) {
            (Some(min), Some(max)) => min == max,
            _ => true,
        }
    }

    pub fn distinct_count(&self) -> usize {
        let mut distinct = 0usize;
        let mut previous: Option<f64> = None;
        for &value in &self.sorted {
            if previous != Some(value) {
                distinct += 1;
            }
            previous = Some(value);
        }
        distinct
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Sample standard deviation (n - 1 denominator).
    pub fn std_dev(&self) -> Option<f64> {
        if self.values.len() < 2 {
            return None;
        }
        let mean = self.mean()?;
        let squares = self
            .values
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>();
        Some((squares / (self.values.len() as f64 - 1.0)).sqrt())
    }

    pub fn median(&self) -> Option<f64> {
        self.quantile(0.5)
    }

    /// Quantile by linear interpolation between the closest ranks.
    ///
    /// `p` is clamped to `[0, 1]`. Returns `None` for an empty column.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        quantile_sorted(&self.sorted, p)
    }

    /// `(Q1, Q3)`, the 25th and 75th percentiles.
    pub fn quartiles(&self) -> Option<(f64, f64)> {
        Some((self.quantile(0.25)?, self.quantile(0.75)?))
    }
}

pub(crate) fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = if p.is_nan() { 0.5 } else { p.clamp(0.0, 1.0) };
    let position = (sorted.len() - 1) as f64 * p;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
