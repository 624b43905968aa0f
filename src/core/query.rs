//! Date windows and the activity filter used by listings and exports.

use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::Activity;
use chrono::{Datelike, Duration, NaiveDate};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Period {
    /// Monday to Sunday of the current week
    #[default]
    Week,
    /// A calendar month (`--month`, or the current one)
    Month,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Monday..Sunday of the week containing `day`.
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = day - Duration::days(day.weekday().num_days_from_monday() as i64);
    (monday, monday + Duration::days(6))
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

pub fn month_bounds_of(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    month_bounds(day.year(), day.month()).unwrap_or((day, day))
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_month(s: &str) -> AppResult<(i32, u32)> {
    let bad = || AppError::InvalidDate(format!("expected YYYY-MM, got '{s}'"));

    let (y, m) = s.trim().split_once('-').ok_or_else(bad)?;
    if y.len() != 4 || m.len() != 2 {
        return Err(bad());
    }
    let year: i32 = y.parse().map_err(|_| bad())?;
    let month: u32 = m.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&month) {
        return Err(bad());
    }
    Ok((year, month))
}

/// Filters accepted by `activity list` and `export activities`.
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    pub period: Period,
    pub month: Option<String>,
    pub range: Option<String>,
    pub school: Option<String>,
    pub class: Option<String>,
    pub sort: SortDirection,
}

impl ActivityQuery {
    /// Inclusive date window, or `None` for no date restriction.
    /// An explicit `range` takes precedence over `period`.
    pub fn window(&self, today: NaiveDate) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
        if let Some(r) = &self.range {
            if r.eq_ignore_ascii_case("all") {
                return Ok(None);
            }
            return parse_range(r).map(Some);
        }

        match self.period {
            Period::All => Ok(None),
            Period::Week => Ok(Some(week_bounds(today))),
            Period::Month => match &self.month {
                Some(m) => {
                    let (y, mo) = parse_month(m)?;
                    Ok(month_bounds(y, mo))
                }
                None => Ok(Some(month_bounds_of(today))),
            },
        }
    }

    /// Restrict to the window and sort by date. The sort is stable, so rows
    /// of the same day keep the order they were loaded in.
    pub fn apply(&self, activities: Vec<Activity>, today: NaiveDate) -> AppResult<Vec<Activity>> {
        let window = self.window(today)?;

        let mut out: Vec<Activity> = activities
            .into_iter()
            .filter(|a| match window {
                Some((from, to)) => a.date >= from && a.date <= to,
                None => true,
            })
            .collect();

        match self.sort {
            SortDirection::Asc => out.sort_by(|a, b| a.date.cmp(&b.date)),
            SortDirection::Desc => out.sort_by(|a, b| b.date.cmp(&a.date)),
        }

        Ok(out)
    }

    /// Human label of the window, used as report subtitle.
    pub fn describe(&self, today: NaiveDate) -> String {
        match self.window(today) {
            Ok(Some((from, to))) if from == to => format!("{from}"),
            Ok(Some((from, to))) => format!("{from} - {to}"),
            _ => "all dates".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-03-06 is a Thursday
        assert_eq!(week_bounds(d(2025, 3, 6)), (d(2025, 3, 3), d(2025, 3, 9)));
        assert_eq!(week_bounds(d(2025, 3, 9)), (d(2025, 3, 3), d(2025, 3, 9)));
        assert_eq!(week_bounds(d(2025, 3, 3)), (d(2025, 3, 3), d(2025, 3, 9)));
    }

    #[test]
    fn month_edges() {
        assert_eq!(month_bounds(2024, 2), Some((d(2024, 2, 1), d(2024, 2, 29))));
        assert_eq!(month_bounds(2025, 12), Some((d(2025, 12, 1), d(2025, 12, 31))));
        assert_eq!(month_bounds(2025, 13), None);
    }

    #[test]
    fn parse_month_validates() {
        assert_eq!(parse_month("2025-03").unwrap(), (2025, 3));
        assert!(parse_month("2025-3").is_err());
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("march").is_err());
    }

    #[test]
    fn range_wins_over_period() {
        let q = ActivityQuery {
            period: Period::Week,
            range: Some("2025-01".into()),
            ..Default::default()
        };
        assert_eq!(
            q.window(d(2025, 3, 6)).unwrap(),
            Some((d(2025, 1, 1), d(2025, 1, 31)))
        );
    }

    #[test]
    fn default_query_covers_the_current_week() {
        let q = ActivityQuery::default();
        assert_eq!(
            q.window(d(2025, 3, 6)).unwrap(),
            Some((d(2025, 3, 3), d(2025, 3, 9)))
        );
    }

    #[test]
    fn month_period_defaults_to_current_month() {
        let q = ActivityQuery {
            period: Period::Month,
            ..Default::default()
        };
        assert_eq!(
            q.window(d(2025, 3, 6)).unwrap(),
            Some((d(2025, 3, 1), d(2025, 3, 31)))
        );
    }
}
