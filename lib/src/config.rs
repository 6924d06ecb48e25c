//! Run configuration for the analysis pipeline.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// Seed shared by the train/evaluation split and the forest.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration of a single analysis run.
///
/// Every field has a default, so a partial JSON/TOML document deserializes
/// into a usable config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fraction of rows held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the split shuffle and the bootstrap sampling.
    pub seed: u64,
    /// Number of trees in the forest.
    pub n_estimators: usize,
    /// Maximum tree depth (`None` grows until leaves are pure).
    pub max_depth: Option<usize>,
    /// Minimum number of samples required to split a node.
    pub min_samples_split: usize,
    /// Maximum number of sample predictions in the report.
    pub sample_limit: usize,
    /// Year used to derive vehicle age; `None` means the current year.
    pub reference_year: Option<i32>,
    /// Whether chart images are rendered into the report.
    pub render_charts: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: DEFAULT_SEED,
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            sample_limit: 15,
            reference_year: None,
            render_charts: true,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn with_render_charts(mut self, render: bool) -> Self {
        self.render_charts = render;
        self
    }

    /// Check that all values are usable.
    ///
    /// # Errors
    /// Returns [`PipelineError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(PipelineError::InvalidParameter(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.n_estimators == 0 {
            return Err(PipelineError::InvalidParameter(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(PipelineError::InvalidParameter(format!(
                "min_samples_split must be at least 2, got {}",
                self.min_samples_split
            )));
        }
        if self.max_depth == Some(0) {
            return Err(PipelineError::InvalidParameter(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
