//! Daily sales observations and forecast output rows.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;

/// A single day of observed sales.
///
/// Observations are immutable once constructed. The ordered sequence of
/// daily observations is the sole input to the forecasting pipeline; dates
/// are expected to be contiguous and are treated positionally (a lag of 7
/// means 7 observations back, not 7 calendar days back across gaps).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Total revenue for the day. Non-negative.
    pub revenue: f64,
    /// Units sold for the day. Non-negative.
    pub quantity: f64,
}

impl Observation {
    /// Create an observation, validating non-negativity.
    pub fn new(date: NaiveDate, revenue: f64, quantity: f64) -> Result<Self> {
        if !revenue.is_finite() || revenue < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "revenue must be finite and non-negative, got {revenue}"
            )));
        }
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "quantity must be finite and non-negative, got {quantity}"
            )));
        }
        Ok(Self {
            date,
            revenue,
            quantity,
        })
    }
}

/// Validate that observation dates are strictly increasing.
///
/// Gaps are permitted (and not repaired); duplicates and backwards jumps
/// are not.
pub fn validate_chronology(observations: &[Observation]) -> Result<()> {
    if observations.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    for pair in observations.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(ForecastError::DateError(format!(
                "dates must be strictly increasing: {} followed by {}",
                pair[0].date, pair[1].date
            )));
        }
    }
    Ok(())
}

/// One day of forecast output.
///
/// Produced only by the recursive forecaster. `quantity` and `orders` are
/// derived from predicted revenue by fixed ratio heuristics; see
/// [`crate::forecast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    /// Forecast date (one day after the previous row).
    pub date: NaiveDate,
    /// Predicted revenue.
    pub revenue: f64,
    /// Estimated units sold.
    pub quantity: f64,
    /// Estimated order count.
    pub orders: f64,
    /// Always true; distinguishes forecast rows from observed history
    /// when the two are concatenated downstream.
    pub is_forecast: bool,
}
