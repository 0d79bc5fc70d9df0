//! Training configuration for the boosted-tree model.

use crate::error::{ForecastError, Result};

/// Hyperparameters for [`crate::model::GradientBoostedTrees`].
///
/// Invariants are enforced by [`TrainingParameters::validate`] at the start
/// of training; out-of-range values fail with
/// [`ForecastError::InvalidParameter`] and are never silently clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingParameters {
    /// Shrinkage applied to each tree's contribution. Must be in (0, 1].
    pub learning_rate: f64,
    /// Maximum tree depth. Must be at least 1.
    pub max_depth: usize,
    /// Number of boosting rounds. Must be at least 1.
    pub n_estimators: usize,
    /// Fraction of rows sampled per tree, without replacement. (0, 1].
    pub subsample: f64,
    /// Fraction of feature columns sampled per tree. (0, 1].
    pub colsample_bytree: f64,
    /// Minimum number of samples a leaf may represent. At least 1.
    pub min_child_weight: usize,
    /// Seed for the subsampling RNG. Identical inputs and seed reproduce
    /// an identical model.
    pub seed: u64,
}

impl Default for TrainingParameters {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_depth: 4,
            n_estimators: 100,
            subsample: 0.8,
            colsample_bytree: 0.8,
            min_child_weight: 3,
            seed: 42,
        }
    }
}

impl TrainingParameters {
    /// Parameters with the default retail-forecasting configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the maximum tree depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the number of boosting rounds.
    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    /// Set the per-tree row sampling fraction.
    pub fn with_subsample(mut self, subsample: f64) -> Self {
        self.subsample = subsample;
        self
    }

    /// Set the per-tree column sampling fraction.
    pub fn with_colsample_bytree(mut self, colsample_bytree: f64) -> Self {
        self.colsample_bytree = colsample_bytree;
        self
    }

    /// Set the minimum leaf size.
    pub fn with_min_child_weight(mut self, min_child_weight: usize) -> Self {
        self.min_child_weight = min_child_weight;
        self
    }

    /// Set the subsampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every invariant, returning the first violation.
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 || self.learning_rate > 1.0
        {
            return Err(ForecastError::InvalidParameter(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if self.max_depth < 1 {
            return Err(ForecastError::InvalidParameter(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.n_estimators < 1 {
            return Err(ForecastError::InvalidParameter(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if !self.subsample.is_finite() || self.subsample <= 0.0 || self.subsample > 1.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "subsample must be in (0, 1], got {}",
                self.subsample
            )));
        }
        if !self.colsample_bytree.is_finite()
            || self.colsample_bytree <= 0.0
            || self.colsample_bytree > 1.0
        {
            return Err(ForecastError::InvalidParameter(format!(
                "colsample_bytree must be in (0, 1], got {}",
                self.colsample_bytree
            )));
        }
        if self.min_child_weight < 1 {
            return Err(ForecastError::InvalidParameter(
                "min_child_weight must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
