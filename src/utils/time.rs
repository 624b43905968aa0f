//! Time utilities: parsing HH:MM, durations, formatting hours.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Parse a time-of-day written as `H:MM` or `HH:MM` (24h).
///
/// Out-of-range components (`25:00`, `08:75`) and trailing garbage (`8h`,
/// `08:00am`) are rejected.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let (h, m) = t.trim().split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Parse and normalize to zero-padded `HH:MM`.
pub fn normalize_time(t: &str) -> AppResult<String> {
    parse_time(t)
        .map(|nt| nt.format("%H:%M").to_string())
        .ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Round to two decimals the way the reports print hours.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn format_hours(h: f64) -> String {
    format!("{:.2}", h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_digit_hours() {
        assert_eq!(parse_time("8:05"), NaiveTime::from_hms_opt(8, 5, 0));
        assert_eq!(parse_time("18:30"), NaiveTime::from_hms_opt(18, 30, 0));
        assert_eq!(normalize_time("8:05").unwrap(), "08:05");
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["8h", "", "8", "08:5", "24:00", "12:60", "ab:cd", "08:00:00", "-1:00"] {
            assert!(parse_time(bad).is_none(), "{bad} should be rejected");
        }
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_hours(3.5), "3.50");
        assert_eq!(round2(1.0 / 3.0), 0.33);
    }
}
