//! Recursive multi-step forecasting.
//!
//! The model is trained once on the full history; each forecast day is then
//! predicted from features synthesized over the working series and appended
//! back as a synthetic observation, so later days feed on earlier
//! predictions.

use chrono::Duration;

use crate::core::{ForecastRow, Observation};
use crate::error::{ForecastError, Result};
use crate::features::{future_values, EventRules, FeatureMatrix};
use crate::model::{GradientBoostedTrees, TrainingParameters};

/// Units sold per unit of revenue, a business-level approximation used to
/// derive quantity from predicted revenue.
pub const QUANTITY_PER_REVENUE: f64 = 100.0;
/// Revenue per order, the approximation used to derive the order count.
pub const ORDERS_PER_REVENUE: f64 = 200.0;

/// Forecast `horizon` consecutive days past the end of the observed series.
///
/// Returns exactly `horizon` rows, each dated one day after the previous,
/// starting the day after the last observation. Predicted revenue is floored
/// at zero before it is fed back into the working series.
pub fn forecast(
    observations: &[Observation],
    rules: &EventRules,
    params: &TrainingParameters,
    horizon: usize,
) -> Result<Vec<ForecastRow>> {
    if horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "horizon must be at least 1".to_string(),
        ));
    }

    let matrix = FeatureMatrix::from_observations(observations, rules)?;
    let model = GradientBoostedTrees::train(&matrix, params)?;

    let mut working: Vec<Observation> = observations.to_vec();
    let mut rows = Vec::with_capacity(horizon);

    for _ in 0..horizon {
        // from_observations guarantees a non-empty series.
        let last = working[working.len() - 1].date;
        let date = last + Duration::days(1);

        let values = future_values(&working, date, rules)?;
        let revenue = model.predict_row(&values).max(0.0);
        let quantity = revenue / QUANTITY_PER_REVENUE;
        let orders = revenue / ORDERS_PER_REVENUE;

        rows.push(ForecastRow {
            date,
            revenue,
            quantity,
            orders,
            is_forecast: true,
        });
        working.push(Observation {
            date,
            revenue,
            quantity,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_series(n: usize, revenue: impl Fn(usize) -> f64) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        (0..n)
            .map(|i| Observation {
                date: start + Duration::days(i as i64),
                revenue: revenue(i),
                quantity: 12.0,
            })
            .collect()
    }

    #[test]
    fn forecast_yields_exactly_horizon_consecutive_days() {
        let obs = make_series(90, |i| 1000.0 + 50.0 * (i % 7) as f64);
        let rows = forecast(
            &obs,
            &EventRules::default(),
            &TrainingParameters::default(),
            30,
        )
        .unwrap();

        assert_eq!(rows.len(), 30);
        assert_eq!(rows[0].date, obs[89].date + Duration::days(1));
        for pair in rows.windows(2) {
            assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
        }
        assert!(rows.iter().all(|r| r.is_forecast));
    }

    #[test]
    fn derived_columns_follow_the_revenue_ratios() {
        let obs = make_series(70, |i| 2000.0 + 10.0 * i as f64);
        let rows = forecast(
            &obs,
            &EventRules::default(),
            &TrainingParameters::default(),
            5,
        )
        .unwrap();

        for row in &rows {
            assert!(row.revenue >= 0.0);
            assert_relative_eq!(row.quantity, row.revenue / 100.0);
            assert_relative_eq!(row.orders, row.revenue / 200.0);
        }
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let obs = make_series(70, |i| 100.0 + i as f64);
        assert!(matches!(
            forecast(
                &obs,
                &EventRules::default(),
                &TrainingParameters::default(),
                0
            ),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn short_history_is_rejected() {
        // 57 observations leave only 29 clean rows.
        let obs = make_series(57, |i| 100.0 + i as f64);
        assert!(matches!(
            forecast(
                &obs,
                &EventRules::default(),
                &TrainingParameters::default(),
                7
            ),
            Err(ForecastError::InsufficientData { needed: 30, got: 29 })
        ));
    }

    #[test]
    fn forecasts_are_deterministic() {
        let obs = make_series(90, |i| 800.0 + 120.0 * (i as f64 * 0.5).sin().abs());
        let params = TrainingParameters::default().with_seed(3);
        let a = forecast(&obs, &EventRules::default(), &params, 14).unwrap();
        let b = forecast(&obs, &EventRules::default(), &params, 14).unwrap();

        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.date, y.date);
            assert_eq!(x.revenue, y.revenue);
        }
    }

    #[test]
    fn constant_history_forecasts_the_constant() {
        let obs = make_series(90, |_| 5000.0);
        let rows = forecast(
            &obs,
            &EventRules::default(),
            &TrainingParameters::default(),
            10,
        )
        .unwrap();

        for row in &rows {
            assert_relative_eq!(row.revenue, 5000.0, epsilon = 1e-6);
        }
    }
}
