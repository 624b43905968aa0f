use crate::core::query::{month_bounds, parse_month};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Parse a `--range` expression into an inclusive date window.
///
/// Supported shapes:
/// - `YYYY`
/// - `YYYY-MM`
/// - `YYYY-MM-DD`
/// - `A:B` where both sides use the same shape
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let (from, to) = match r.split_once(':') {
        Some((a, b)) => {
            let (a, b) = (a.trim(), b.trim());
            if a.len() != b.len() {
                return Err(AppError::InvalidDate(format!(
                    "range bounds must use the same format: '{r}'"
                )));
            }
            (bounds(a)?.0, bounds(b)?.1)
        }
        None => bounds(r)?,
    };

    if from > to {
        return Err(AppError::InvalidDate(format!("range ends before it starts: '{r}'")));
    }
    Ok((from, to))
}

fn bounds(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(format!("unsupported range '{s}'"));

    match s.len() {
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
        7 => {
            let (y, m) = parse_month(s)?;
            month_bounds(y, m).ok_or_else(invalid)
        }
        10 => {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_shapes() {
        assert_eq!(parse_range("2025").unwrap(), (d(2025, 1, 1), d(2025, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2025-03-07").unwrap(), (d(2025, 3, 7), d(2025, 3, 7)));
    }

    #[test]
    fn pairs_and_errors() {
        assert_eq!(
            parse_range("2025-01:2025-03").unwrap(),
            (d(2025, 1, 1), d(2025, 3, 31))
        );
        assert!(parse_range("2025:2025-03").is_err());
        assert!(parse_range("2025-03-10:2025-03-01").is_err());
        assert!(parse_range("yesterday").is_err());
    }
}
