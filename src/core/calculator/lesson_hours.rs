//! Per-lesson hour figures. None of these merge overlapping ranges.

use crate::utils::time::{minutes_between, parse_time, round2};

fn elapsed_minutes(start: &str, end: &str) -> Option<i64> {
    Some(minutes_between(parse_time(start)?, parse_time(end)?))
}

/// Whole hours of a single lesson, rounded **up**, never negative.
///
/// `08:00-08:30` is one hour here even though it is half an hour of real time:
/// lesson listings bill started hours, summaries use [`super::compute_real_hours`].
pub fn lesson_hours(start: &str, end: &str) -> u32 {
    match elapsed_minutes(start, end) {
        Some(mins) if mins > 0 => ((mins + 59) / 60) as u32,
        _ => 0,
    }
}

/// Exact hours rounded to two decimals; default `hours` stored on a lesson.
pub fn stored_hours(start: &str, end: &str) -> f64 {
    match elapsed_minutes(start, end) {
        Some(mins) if mins > 0 => round2(mins as f64 / 60.0),
        _ => 0.0,
    }
}

/// Completed whole hours; default `hours` stored on an activity.
pub fn activity_hours(start: &str, end: &str) -> f64 {
    match elapsed_minutes(start, end) {
        Some(mins) if mins > 0 => (mins / 60) as f64,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_hours_rounds_up() {
        assert_eq!(lesson_hours("08:00", "08:30"), 1);
        assert_eq!(lesson_hours("08:00", "10:00"), 2);
        assert_eq!(lesson_hours("08:00", "10:01"), 3);
    }

    #[test]
    fn lesson_hours_never_negative() {
        assert_eq!(lesson_hours("12:00", "08:00"), 0);
        assert_eq!(lesson_hours("08:00", "08:00"), 0);
        assert_eq!(lesson_hours("8h", "10:00"), 0);
    }

    #[test]
    fn stored_and_activity_hours() {
        assert_eq!(stored_hours("08:00", "10:20"), 2.33);
        assert_eq!(stored_hours("10:00", "08:00"), 0.0);
        assert_eq!(activity_hours("08:00", "10:50"), 2.0);
        assert_eq!(activity_hours("bad", "10:50"), 0.0);
    }
}
