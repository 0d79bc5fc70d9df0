//! A lightweight gradient-boosted regression-tree ensemble.
//!
//! This is a bespoke approximation of gradient boosting, not a binding to
//! any external boosting library: sequential shallow trees fit to the
//! running residual, with learning-rate shrinkage and per-tree row/column
//! subsampling for variance reduction. Training is deterministic for a
//! given input and seed.

use crate::error::{ForecastError, Result};
use crate::features::{FeatureMatrix, FeatureRow, FEATURE_NAMES, MIN_TRAINING_ROWS};
use crate::model::params::TrainingParameters;
use crate::model::tree::RegressionTree;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A trained boosted-tree model. Immutable after training.
#[derive(Debug, Clone)]
pub struct GradientBoostedTrees {
    base_score: f64,
    trees: Vec<RegressionTree>,
    params: TrainingParameters,
    feature_names: Vec<&'static str>,
    importance: Vec<f64>,
}

impl GradientBoostedTrees {
    /// Train on the clean rows of an assembled feature matrix.
    ///
    /// Fails with [`ForecastError::InvalidParameter`] when a parameter
    /// invariant is violated and [`ForecastError::InsufficientData`] with
    /// fewer than [`MIN_TRAINING_ROWS`] clean rows.
    pub fn train(matrix: &FeatureMatrix, params: &TrainingParameters) -> Result<Self> {
        Self::fit(&matrix.clean(), params)
    }

    /// Train on an explicit set of clean rows (used by the evaluator to
    /// train on a chronological prefix).
    pub fn fit(rows: &[&FeatureRow], params: &TrainingParameters) -> Result<Self> {
        params.validate()?;
        if rows.len() < MIN_TRAINING_ROWS {
            return Err(ForecastError::InsufficientData {
                needed: MIN_TRAINING_ROWS,
                got: rows.len(),
            });
        }

        let features: Vec<Vec<f64>> = rows.iter().map(|r| r.values().to_vec()).collect();
        let targets: Vec<f64> = rows.iter().map(|r| r.revenue).collect();
        Self::fit_values(&features, &targets, params)
    }

    fn fit_values(rows: &[Vec<f64>], targets: &[f64], params: &TrainingParameters) -> Result<Self> {
        let n = rows.len();
        let n_features = FEATURE_NAMES.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != n_features) {
            return Err(ForecastError::DimensionMismatch {
                expected: n_features,
                got: bad.len(),
            });
        }

        let sample_size = ((params.subsample * n as f64).ceil() as usize).clamp(1, n);
        let col_size =
            ((params.colsample_bytree * n_features as f64).ceil() as usize).clamp(1, n_features);

        let mut rng = StdRng::seed_from_u64(params.seed);
        let base_score = targets.iter().sum::<f64>() / n as f64;
        let mut predictions = vec![base_score; n];
        let mut gains = vec![0.0; n_features];
        let mut trees = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators {
            let residuals: Vec<f64> = targets
                .iter()
                .zip(predictions.iter())
                .map(|(t, p)| t - p)
                .collect();

            let mut row_indices = rand::seq::index::sample(&mut rng, n, sample_size).into_vec();
            row_indices.sort_unstable();
            let mut columns =
                rand::seq::index::sample(&mut rng, n_features, col_size).into_vec();
            columns.sort_unstable();

            let tree = RegressionTree::fit(
                rows,
                &residuals,
                &row_indices,
                &columns,
                params.max_depth,
                params.min_child_weight,
                &mut gains,
            );

            // The ensemble update covers every row, not just the subsample,
            // so later trees see residuals consistent with prediction time.
            for (i, row) in rows.iter().enumerate() {
                predictions[i] += params.learning_rate * tree.predict_row(row);
            }
            trees.push(tree);
        }

        let importance = normalize_importance(&gains);

        Ok(Self {
            base_score,
            trees,
            params: params.clone(),
            feature_names: FEATURE_NAMES.to_vec(),
            importance,
        })
    }

    /// Predict one value per feature vector. Rows are positionally matched
    /// to [`Self::feature_names`]; output is deterministic given the
    /// trained trees.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Predict a single feature vector.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut score = self.base_score;
        for tree in &self.trees {
            score += self.params.learning_rate * tree.predict_row(row);
        }
        score
    }

    /// The parameters this model was trained with.
    pub fn params(&self) -> &TrainingParameters {
        &self.params
    }

    /// The ordered feature-name list this model was trained on.
    pub fn feature_names(&self) -> &[&'static str] {
        &self.feature_names
    }

    /// Normalized per-feature importance, in training-column order.
    /// Values sum to 1.
    pub fn feature_importance(&self) -> &[f64] {
        &self.importance
    }

    /// (name, importance) pairs in training-column order.
    pub fn importance_pairs(&self) -> Vec<(&'static str, f64)> {
        self.feature_names
            .iter()
            .copied()
            .zip(self.importance.iter().copied())
            .collect()
    }

    /// Number of trees in the ensemble.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

/// Normalize accumulated split gains so they sum to 1. A degenerate run
/// with no splits at all (constant target) reports uniform importance to
/// keep the sum-to-one invariant.
fn normalize_importance(gains: &[f64]) -> Vec<f64> {
    let total: f64 = gains.iter().sum();
    if total > 0.0 {
        gains.iter().map(|g| g / total).collect()
    } else {
        vec![1.0 / gains.len() as f64; gains.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Observation;
    use crate::features::EventRules;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn make_matrix(n: usize, revenue: impl Fn(usize) -> f64) -> FeatureMatrix {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let obs: Vec<Observation> = (0..n)
            .map(|i| Observation {
                date: start + Duration::days(i as i64),
                revenue: revenue(i),
                quantity: 20.0,
            })
            .collect();
        FeatureMatrix::from_observations(&obs, &EventRules::default()).unwrap()
    }

    #[test]
    fn training_requires_thirty_clean_rows() {
        // 57 observations leave 29 clean rows; 58 leave 30.
        let matrix = make_matrix(57, |i| 100.0 + i as f64);
        assert!(matches!(
            GradientBoostedTrees::train(&matrix, &TrainingParameters::default()),
            Err(ForecastError::InsufficientData { needed: 30, got: 29 })
        ));

        let matrix = make_matrix(58, |i| 100.0 + i as f64);
        assert!(GradientBoostedTrees::train(&matrix, &TrainingParameters::default()).is_ok());
    }

    #[test]
    fn invalid_parameters_fail_before_training() {
        let matrix = make_matrix(90, |i| 100.0 + i as f64);
        let params = TrainingParameters::default().with_learning_rate(0.0);
        assert!(matches!(
            GradientBoostedTrees::train(&matrix, &params),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn training_is_deterministic_for_a_fixed_seed() {
        let matrix = make_matrix(90, |i| 500.0 + (i as f64 * 0.7).sin() * 100.0 + i as f64);
        let params = TrainingParameters::default()
            .with_n_estimators(25)
            .with_seed(11);

        let a = GradientBoostedTrees::train(&matrix, &params).unwrap();
        let b = GradientBoostedTrees::train(&matrix, &params).unwrap();

        let probe: Vec<Vec<f64>> = matrix.clean().iter().map(|r| r.values().to_vec()).collect();
        assert_eq!(a.predict(&probe), b.predict(&probe));
        assert_eq!(a.feature_importance(), b.feature_importance());
    }

    #[test]
    fn different_seeds_may_differ_but_stay_finite() {
        let matrix = make_matrix(90, |i| 500.0 + (i as f64 * 0.7).sin() * 100.0);
        let a = GradientBoostedTrees::train(
            &matrix,
            &TrainingParameters::default().with_n_estimators(10).with_seed(1),
        )
        .unwrap();
        for row in matrix.clean() {
            assert!(a.predict_row(row.values()).is_finite());
        }
    }

    #[test]
    fn importance_is_normalized() {
        let matrix = make_matrix(120, |i| 300.0 + 5.0 * i as f64 + (i as f64).sin() * 20.0);
        let model =
            GradientBoostedTrees::train(&matrix, &TrainingParameters::default()).unwrap();

        let sum: f64 = model.feature_importance().iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
        assert_eq!(model.feature_importance().len(), FEATURE_NAMES.len());
        assert!(model.feature_importance().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn importance_is_uniform_when_nothing_splits() {
        // Constant revenue leaves zero residual after the base score, so no
        // tree ever finds a gainful split.
        let matrix = make_matrix(90, |_| 100_000.0);
        let model =
            GradientBoostedTrees::train(&matrix, &TrainingParameters::default()).unwrap();

        let expected = 1.0 / FEATURE_NAMES.len() as f64;
        for &v in model.feature_importance() {
            assert_relative_eq!(v, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn constant_series_predicts_the_constant() {
        let matrix = make_matrix(90, |_| 100_000.0);
        let model =
            GradientBoostedTrees::train(&matrix, &TrainingParameters::default()).unwrap();

        for row in matrix.clean() {
            assert_relative_eq!(model.predict_row(row.values()), 100_000.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn ensemble_tracks_a_learnable_pattern() {
        // Weekly sawtooth: lag-7 features make this learnable in-sample.
        let matrix = make_matrix(150, |i| 1000.0 + 200.0 * (i % 7) as f64);
        let model = GradientBoostedTrees::train(
            &matrix,
            &TrainingParameters::default().with_n_estimators(200),
        )
        .unwrap();

        let clean = matrix.clean();
        let rows: Vec<Vec<f64>> = clean.iter().map(|r| r.values().to_vec()).collect();
        let preds = model.predict(&rows);
        let mae: f64 = clean
            .iter()
            .zip(preds.iter())
            .map(|(r, p)| (r.revenue - p).abs())
            .sum::<f64>()
            / clean.len() as f64;

        // Mean revenue is ~1600; in-sample MAE should be far below the
        // sawtooth amplitude.
        assert!(mae < 100.0, "in-sample MAE too high: {mae}");
    }

    #[test]
    fn n_trees_matches_configuration() {
        let matrix = make_matrix(70, |i| 100.0 + i as f64);
        let model = GradientBoostedTrees::train(
            &matrix,
            &TrainingParameters::default().with_n_estimators(17),
        )
        .unwrap();
        assert_eq!(model.n_trees(), 17);
    }
}
