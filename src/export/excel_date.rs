use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Read `s` as a date, a date-time or a time of day and return the Excel
/// serial together with its number format.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(("yyyy-mm-dd hh:mm", excel_serial(dt)));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(("yyyy-mm-dd", excel_serial(d.and_time(NaiveTime::MIN))));
    }

    if s.len() == 5
        && let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M")
    {
        return Some(("hh:mm", t.num_seconds_from_midnight() as f64 / 86400.0));
    }

    None
}

fn excel_serial(dt: NaiveDateTime) -> f64 {
    // 1899-12-30 is day 0 in the 1900 date system
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .map(|d| d.and_time(NaiveTime::MIN))
        .unwrap_or(dt);
    let secs = (dt - epoch).num_seconds() as f64;
    secs / 86400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serials() {
        assert_eq!(parse_to_excel_date("2025-01-01"), Some(("yyyy-mm-dd", 45658.0)));
        assert_eq!(parse_to_excel_date("12:00"), Some(("hh:mm", 0.5)));
        assert_eq!(parse_to_excel_date("4A"), None);
        assert_eq!(parse_to_excel_date("8:00"), None);
    }
}
