//! YAML quality profiles.
//!
//! A profile fixes the weights, threshold and zero-weight policy for the
//! `score` command, and may pin metric values measured elsewhere:
//!
//! ```yaml
//! weights:
//!   completeness: 45
//!   uniqueness: 25
//!   outliers: 30
//! threshold: 75
//! zero_weights: reject
//! metrics:
//!   completeness: 75.5
//!   uniqueness: 100
//!   outliers: 30
//! ```
//!
//! Every key is optional; missing weight entries fall back to the defaults.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::score::{
    DEFAULT_COMPLETENESS_WEIGHT, DEFAULT_OUTLIERS_WEIGHT, DEFAULT_THRESHOLD,
    DEFAULT_UNIQUENESS_WEIGHT, ZeroWeightPolicy,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QualityProfile {
    pub weights: WeightsConfig,
    pub threshold: Option<f64>,
    pub zero_weights: Option<ZeroWeightPolicy>,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightsConfig {
    pub completeness: f64,
    pub uniqueness: f64,
    pub outliers: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            completeness: DEFAULT_COMPLETENESS_WEIGHT,
            uniqueness: DEFAULT_UNIQUENESS_WEIGHT,
            outliers: DEFAULT_OUTLIERS_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsConfig {
    pub completeness: Option<f64>,
    pub uniqueness: Option<f64>,
    pub outliers: Option<f64>,
}

impl QualityProfile {
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Opening quality profile {path:?}"))?;
        let reader = BufReader::new(file);
        let profile: QualityProfile =
            serde_yaml::from_reader(reader).context("Parsing quality profile YAML")?;
        Ok(profile)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("Parsing quality profile YAML")
    }

    pub fn threshold(&self) -> f64 {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }
}
