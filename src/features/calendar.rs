//! Calendar feature extraction.
//!
//! Pure, total functions mapping a date to numeric calendar attributes.
//! Every valid date produces a result; there is no error path.

use chrono::{Datelike, NaiveDate};

/// Calendar attributes of a single date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarFeatures {
    /// Day of week, Monday = 0 through Sunday = 6.
    pub day_of_week: u32,
    /// Month of year, 1..=12.
    pub month: u32,
    /// 1 for Saturday/Sunday, 0 otherwise.
    pub is_weekend: u32,
    /// Day of month, 1..=31.
    pub day_of_month: u32,
    /// Quarter of year, 1..=4.
    pub quarter: u32,
}

/// Compute calendar features for a date.
pub fn calendar_features(date: NaiveDate) -> CalendarFeatures {
    let day_of_week = date.weekday().num_days_from_monday();
    CalendarFeatures {
        day_of_week,
        month: date.month(),
        is_weekend: if day_of_week >= 5 { 1 } else { 0 },
        day_of_month: date.day(),
        quarter: (date.month() - 1) / 3 + 1,
    }
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is always valid");
    first_of_next
        .pred_opt()
        .expect("predecessor of a valid date exists")
        .day()
}
