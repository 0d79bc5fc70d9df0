//! Business-event features: paydays and promotional periods.
//!
//! The exact day thresholds are retail heuristics, not derived truths, so
//! they live in a configurable [`EventRules`] struct rather than constants.
//! The defaults mark month edges as paydays and mid-month plus month-end
//! days as promo periods.

use crate::features::calendar::days_in_month;
use chrono::{Datelike, NaiveDate};

/// Business-event attributes of a single date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventFeatures {
    /// 1 when the date falls in the payday window, 0 otherwise.
    pub is_payday: u32,
    /// 1 when the date falls in a promotional window, 0 otherwise.
    pub is_promo_period: u32,
    /// Days since the most recent promo day at or before the date,
    /// or -1 when no prior promo exists among the known dates.
    pub days_since_promo: i64,
}

/// Configurable payday/promo business rules.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRules {
    /// A date is a payday when within this many days of either month edge.
    payday_window_days: u32,
    /// Mid-month promo window, inclusive day-of-month range.
    mid_month_promo: (u32, u32),
    /// The last N days of each month are promo days.
    month_end_promo_days: u32,
}

impl Default for EventRules {
    fn default() -> Self {
        Self {
            payday_window_days: 3,
            mid_month_promo: (14, 16),
            month_end_promo_days: 2,
        }
    }
}

impl EventRules {
    /// Rules with the default retail heuristics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payday window (first/last N days of the month).
    pub fn with_payday_window(mut self, days: u32) -> Self {
        self.payday_window_days = days;
        self
    }

    /// Set the mid-month promo window as an inclusive day-of-month range.
    pub fn with_mid_month_promo(mut self, start_day: u32, end_day: u32) -> Self {
        self.mid_month_promo = (start_day, end_day);
        self
    }

    /// Set how many trailing days of each month count as promo days.
    pub fn with_month_end_promo_days(mut self, days: u32) -> Self {
        self.month_end_promo_days = days;
        self
    }

    /// Whether the date falls in the payday window: within
    /// `payday_window_days` of the start or end of its month.
    pub fn is_payday(&self, date: NaiveDate) -> bool {
        let dom = date.day();
        let last = days_in_month(date);
        dom <= self.payday_window_days || dom > last.saturating_sub(self.payday_window_days)
    }

    /// Whether the date falls in a promotional window.
    pub fn is_promo(&self, date: NaiveDate) -> bool {
        let dom = date.day();
        let last = days_in_month(date);
        let (mid_start, mid_end) = self.mid_month_promo;
        (dom >= mid_start && dom <= mid_end) || dom > last.saturating_sub(self.month_end_promo_days)
    }

    /// Days since the most recent promo day at or before `date`, searching
    /// the date itself and then `known_dates` (ascending). Returns -1 when
    /// no promo day exists in range; callers encode that sentinel as they
    /// see fit.
    pub fn days_since_promo(&self, date: NaiveDate, known_dates: &[NaiveDate]) -> i64 {
        if self.is_promo(date) {
            return 0;
        }
        known_dates
            .iter()
            .rev()
            .filter(|&&d| d <= date)
            .find(|&&d| self.is_promo(d))
            .map(|&d| (date - d).num_days())
            .unwrap_or(-1)
    }

    /// Compute all event features for a date.
    pub fn event_features(&self, date: NaiveDate, known_dates: &[NaiveDate]) -> EventFeatures {
        EventFeatures {
            is_payday: if self.is_payday(date) { 1 } else { 0 },
            is_promo_period: if self.is_promo(date) { 1 } else { 0 },
            days_since_promo: self.days_since_promo(date, known_dates),
        }
    }
}
