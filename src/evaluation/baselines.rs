//! Naive reference forecasters used to contextualize model accuracy.

use crate::error::{ForecastError, Result};

/// Repeat the last training value across the horizon.
pub fn naive_forecast(train: &[f64], horizon: usize) -> Result<Vec<f64>> {
    let last = *train.last().ok_or(ForecastError::EmptyData)?;
    Ok(vec![last; horizon])
}

/// Cycle the trailing seasonal period of the training series across the
/// horizon. The period is `min(7, train.len())`, so short series fall back
/// toward the naive forecast.
pub fn seasonal_naive_forecast(train: &[f64], horizon: usize) -> Result<Vec<f64>> {
    if train.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    let period = train.len().min(7);
    let tail = &train[train.len() - period..];
    Ok((0..horizon).map(|i| tail[i % period]).collect())
}
