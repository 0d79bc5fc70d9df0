//! Feature matrix assembly.
//!
//! Joins lag, rolling, calendar, event, and trend features into one row per
//! historical day. Rows are computed for every index (early rows feed later
//! rolling and trend windows), but only *clean* rows — those whose six lag
//! features all resolved to genuine positive values — are usable for
//! training and evaluation.

use crate::core::{validate_chronology, Observation};
use crate::error::{ForecastError, Result};
use crate::features::calendar::calendar_features;
use crate::features::events::EventRules;
use crate::features::window::{lag, rolling_mean, trend, volatility};
use chrono::NaiveDate;

/// Feature names, in the fixed order used by every row of every matrix.
/// Predictions feed flat numeric arrays positionally matched to this list.
pub const FEATURE_NAMES: [&str; 23] = [
    "revenue_lag1",
    "revenue_lag7",
    "revenue_lag28",
    "quantity_lag1",
    "quantity_lag7",
    "quantity_lag28",
    "revenue_roll7",
    "revenue_roll14",
    "revenue_roll28",
    "quantity_roll7",
    "quantity_roll14",
    "quantity_roll28",
    "day_of_week",
    "month",
    "is_weekend",
    "day_of_month",
    "quarter",
    "is_payday",
    "is_promo_period",
    "days_since_promo",
    "trend_7d",
    "trend_14d",
    "volatility_7d",
];

/// The first six features are the lags that gate row cleanliness.
const LAG_FEATURES: usize = 6;

/// Lag offsets applied to both revenue and quantity.
const LAG_OFFSETS: [usize; 3] = [1, 7, 28];

/// Rolling-mean windows applied to both revenue and quantity.
const ROLL_WINDOWS: [usize; 3] = [7, 14, 28];

/// Minimum number of clean rows required to train.
pub const MIN_TRAINING_ROWS: usize = 30;

/// One day's feature vector plus its targets.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Originating date.
    pub date: NaiveDate,
    /// Revenue target for this day.
    pub revenue: f64,
    /// Quantity for this day.
    pub quantity: f64,
    values: Vec<f64>,
}

impl FeatureRow {
    /// Feature values, positionally aligned with [`FEATURE_NAMES`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Look up a feature value by name.
    pub fn feature(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.values[i])
    }

    /// A row is clean iff every lag feature resolved to a strictly positive
    /// source value (no zero fallback).
    pub fn is_clean(&self) -> bool {
        self.values[..LAG_FEATURES].iter().all(|&v| v > 0.0)
    }
}

/// The assembled feature matrix over a history of observations.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    rows: Vec<FeatureRow>,
    clean_indices: Vec<usize>,
}

impl FeatureMatrix {
    /// Assemble one feature row per observation.
    ///
    /// Fails with [`ForecastError::EmptyData`] on an empty history and
    /// [`ForecastError::DateError`] when dates are not strictly increasing.
    pub fn from_observations(observations: &[Observation], rules: &EventRules) -> Result<Self> {
        validate_chronology(observations)?;

        let revenue: Vec<f64> = observations.iter().map(|o| o.revenue).collect();
        let quantity: Vec<f64> = observations.iter().map(|o| o.quantity).collect();
        let dates: Vec<NaiveDate> = observations.iter().map(|o| o.date).collect();

        let rows: Vec<FeatureRow> = observations
            .iter()
            .enumerate()
            .map(|(i, obs)| FeatureRow {
                date: obs.date,
                revenue: obs.revenue,
                quantity: obs.quantity,
                values: build_values(&revenue, &quantity, &dates, i, i, obs.date, rules),
            })
            .collect();

        let clean_indices: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_clean())
            .map(|(i, _)| i)
            .collect();

        Ok(Self { rows, clean_indices })
    }

    /// All rows, one per observation, in chronological order.
    pub fn all(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// The clean rows, in chronological order.
    pub fn clean(&self) -> Vec<&FeatureRow> {
        self.clean_indices.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Number of clean rows.
    pub fn clean_len(&self) -> usize {
        self.clean_indices.len()
    }

    /// Number of feature columns.
    pub fn width(&self) -> usize {
        FEATURE_NAMES.len()
    }
}

/// Synthesize the feature vector for a not-yet-observed day following the
/// given working series. Lags index from the end of the series; rolling and
/// trend statistics end at the last observed value.
pub fn future_values(
    observations: &[Observation],
    date: NaiveDate,
    rules: &EventRules,
) -> Result<Vec<f64>> {
    if observations.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    let revenue: Vec<f64> = observations.iter().map(|o| o.revenue).collect();
    let quantity: Vec<f64> = observations.iter().map(|o| o.quantity).collect();
    let dates: Vec<NaiveDate> = observations.iter().map(|o| o.date).collect();
    let n = observations.len();
    Ok(build_values(&revenue, &quantity, &dates, n, n - 1, date, rules))
}

/// Build the feature vector for one day.
///
/// `index` anchors the lag lookups (a value `offset` steps back lands at
/// `index - offset`); `anchor` is the last index whose value exists, used
/// for rolling/trend/volatility windows. For historical rows both are the
/// row's own index; for a synthesized future row `index` is one past the
/// end of the series and `anchor` is the final observed index.
fn build_values(
    revenue: &[f64],
    quantity: &[f64],
    dates: &[NaiveDate],
    index: usize,
    anchor: usize,
    date: NaiveDate,
    rules: &EventRules,
) -> Vec<f64> {
    let mut values = Vec::with_capacity(FEATURE_NAMES.len());

    for offset in LAG_OFFSETS {
        values.push(lag(revenue, index, offset));
    }
    for offset in LAG_OFFSETS {
        values.push(lag(quantity, index, offset));
    }
    for window in ROLL_WINDOWS {
        values.push(rolling_mean(revenue, anchor, window));
    }
    for window in ROLL_WINDOWS {
        values.push(rolling_mean(quantity, anchor, window));
    }

    let cal = calendar_features(date);
    values.push(cal.day_of_week as f64);
    values.push(cal.month as f64);
    values.push(cal.is_weekend as f64);
    values.push(cal.day_of_month as f64);
    values.push(cal.quarter as f64);

    let events = rules.event_features(date, dates);
    values.push(events.is_payday as f64);
    values.push(events.is_promo_period as f64);
    // Shift the -1 "no promo seen" sentinel so it encodes as 0.
    values.push((events.days_since_promo + 1) as f64);

    values.push(trend(revenue, anchor, 7));
    values.push(trend(revenue, anchor, 14));
    values.push(volatility(revenue, anchor, 7));

    debug_assert_eq!(values.len(), FEATURE_NAMES.len());
    values
}
