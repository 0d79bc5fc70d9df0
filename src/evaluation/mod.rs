//! Accuracy metrics, reference baselines, and held-out model evaluation.

pub mod baselines;
pub mod evaluator;
pub mod metrics;

pub use baselines::{naive_forecast, seasonal_naive_forecast};
pub use evaluator::{evaluate, BaselineMetrics, EvaluationResult};
pub use metrics::{mae, mape, r_squared, rmse};
