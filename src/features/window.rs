//! Lagged, rolling, and trend statistics over a numeric series.
//!
//! These helpers never panic on short series. Lags that reach before the
//! start of the series fall back to 0.0 to keep feature rows dense; the
//! matrix assembler excludes such rows from training via clean-row gating.
//! Rolling and trend statistics instead degrade gracefully (partial windows,
//! 0.0 fallbacks) and do not affect row cleanliness.

/// Value of the series `offset` steps before `index`, or 0.0 when the
/// lookback underflows the start of the series.
pub fn lag(series: &[f64], index: usize, offset: usize) -> f64 {
    if index < offset {
        return 0.0;
    }
    series.get(index - offset).copied().unwrap_or(0.0)
}

/// Mean of the trailing window ending at `index`, using as many values as
/// exist when fewer than `window` are available.
pub fn rolling_mean(series: &[f64], index: usize, window: usize) -> f64 {
    if series.is_empty() || window == 0 || index >= series.len() {
        return 0.0;
    }
    let start = (index + 1).saturating_sub(window);
    let segment = &series[start..=index];
    segment.iter().sum::<f64>() / segment.len() as f64
}

/// Percentage change over the trailing `span` values ending at `index`:
/// `(last - first) / first`. Returns 0.0 when there is not a full span of
/// history or the base value is not strictly positive.
pub fn trend(series: &[f64], index: usize, span: usize) -> f64 {
    if span < 2 || index + 1 < span || index >= series.len() {
        return 0.0;
    }
    let first = series[index + 1 - span];
    let last = series[index];
    if first <= 0.0 {
        return 0.0;
    }
    (last - first) / first
}

/// Population standard deviation of the trailing `span` values ending at
/// `index` (fewer when history is short). Returns 0.0 with fewer than two
/// values.
pub fn volatility(series: &[f64], index: usize, span: usize) -> f64 {
    if series.is_empty() || span == 0 || index >= series.len() {
        return 0.0;
    }
    let start = (index + 1).saturating_sub(span);
    let segment = &series[start..=index];
    if segment.len() < 2 {
        return 0.0;
    }
    let mean = segment.iter().sum::<f64>() / segment.len() as f64;
    let variance =
        segment.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / segment.len() as f64;
    variance.sqrt()
}
