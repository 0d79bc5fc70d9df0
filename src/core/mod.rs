//! Core data structures for the forecasting pipeline.

mod observation;

pub use observation::{validate_chronology, ForecastRow, Observation};
