//! Error types for the salescast library.

use thiserror::Error;

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur during feature assembly, training, or forecasting.
///
/// All errors are deterministic: the same inputs always produce the same
/// error. The core performs no I/O, so there are no transient failure modes
/// and no retry policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Not enough clean feature rows to train on.
    #[error("insufficient data: need at least {needed} clean rows, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A training or forecasting parameter violates its invariant.
    /// Parameters are never silently clamped.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Observation dates are not strictly increasing.
    #[error("date error: {0}")]
    DateError(String),
}
