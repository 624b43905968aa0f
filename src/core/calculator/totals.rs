use super::real_hours::{MergeStrategy, compute_real_hours_with};
use crate::core::query::{month_bounds_of, week_bounds};
use crate::models::Activity;
use crate::utils::time::round2;
use chrono::NaiveDate;
use serde::Serialize;

/// Hour totals shown at the bottom of an activity summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActivityTotals {
    /// Sum of stored hours, overlaps included.
    pub total: f64,
    /// Stored hours inside the Monday-Sunday week of the reference day.
    pub week: f64,
    /// Stored hours inside the calendar month of the reference day.
    pub month: f64,
    /// De-duplicated hours.
    pub real: f64,
}

impl ActivityTotals {
    pub fn compute(activities: &[Activity], today: NaiveDate, strategy: MergeStrategy) -> Self {
        let (week_start, week_end) = week_bounds(today);
        let (month_start, month_end) = month_bounds_of(today);

        let sum_within = |from: NaiveDate, to: NaiveDate| -> f64 {
            activities
                .iter()
                .filter(|a| a.date >= from && a.date <= to)
                .map(|a| a.hours)
                .sum()
        };

        Self {
            total: round2(activities.iter().map(|a| a.hours).sum()),
            week: round2(sum_within(week_start, week_end)),
            month: round2(sum_within(month_start, month_end)),
            real: compute_real_hours_with(activities, strategy),
        }
    }
}
