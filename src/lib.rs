//! Daily retail sales forecasting.
//!
//! The pipeline runs entirely in-process over a chronological series of
//! daily `(date, revenue, quantity)` observations:
//!
//! 1. [`features`] turns the series into a fixed-width feature matrix
//!    (lags, rolling means, calendar and retail-event flags, trend and
//!    volatility), keeping only rows with full lag history for training.
//! 2. [`model`] fits a lightweight gradient-boosted regression-tree
//!    ensemble to the clean rows, deterministically for a given seed.
//! 3. [`evaluation`] scores the model on a chronological 80/20 split
//!    against naive and seasonal-naive baselines.
//! 4. [`forecast`] rolls the model forward recursively, feeding each
//!    predicted day back into the working series as a synthetic
//!    observation.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, NaiveDate};
//! use salescast::core::Observation;
//! use salescast::features::EventRules;
//! use salescast::forecast::forecast;
//! use salescast::model::TrainingParameters;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let history: Vec<Observation> = (0..90)
//!     .map(|i| Observation {
//!         date: start + Duration::days(i),
//!         revenue: 1200.0 + 80.0 * (i % 7) as f64,
//!         quantity: 10.0,
//!     })
//!     .collect();
//!
//! let rows = forecast(
//!     &history,
//!     &EventRules::default(),
//!     &TrainingParameters::default(),
//!     14,
//! )
//! .unwrap();
//! assert_eq!(rows.len(), 14);
//! ```

pub mod core;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod forecast;
pub mod model;

pub use crate::core::{ForecastRow, Observation};
pub use crate::error::{ForecastError, Result};
pub use crate::evaluation::{evaluate, EvaluationResult};
pub use crate::features::{EventRules, FeatureMatrix};
pub use crate::model::{GradientBoostedTrees, TrainingParameters};
