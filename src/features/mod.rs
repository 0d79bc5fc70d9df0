//! Feature engineering for daily sales series.
//!
//! # Example
//!
//! ```
//! use salescast::core::Observation;
//! use salescast::features::{EventRules, FeatureMatrix};
//! use chrono::{Duration, NaiveDate};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let observations: Vec<Observation> = (0..60)
//!     .map(|i| Observation {
//!         date: start + Duration::days(i),
//!         revenue: 1000.0 + 10.0 * i as f64,
//!         quantity: 8.0,
//!     })
//!     .collect();
//!
//! let matrix = FeatureMatrix::from_observations(&observations, &EventRules::default()).unwrap();
//! assert_eq!(matrix.all().len(), 60);
//! assert_eq!(matrix.clean_len(), 32); // first 28 rows lack full lag history
//! ```

pub mod calendar;
pub mod events;
pub mod matrix;
pub mod window;

pub use calendar::{calendar_features, CalendarFeatures};
pub use events::{EventFeatures, EventRules};
pub use matrix::{future_values, FeatureMatrix, FeatureRow, FEATURE_NAMES, MIN_TRAINING_ROWS};
