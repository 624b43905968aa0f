//! One handler per top-level command.

pub mod activity;
pub mod attend;
pub mod backup;
pub mod config;
pub mod day_note;
pub mod db;
pub mod export;
pub mod init;
pub mod lesson;
pub mod log;
pub mod register;
pub mod student;

use crate::core::query::parse_month;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{parse_date, today};
use chrono::{Datelike, NaiveDate};

/// `--date` argument, today when absent.
pub(crate) fn day_or_today(arg: Option<&str>) -> AppResult<NaiveDate> {
    match arg {
        Some(s) => parse_day(s),
        None => Ok(today()),
    }
}

pub(crate) fn parse_day(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub(crate) fn optional_day(arg: Option<&str>) -> AppResult<Option<NaiveDate>> {
    arg.map(parse_day).transpose()
}

/// `--month` argument, the current month when absent.
pub(crate) fn month_or_current(arg: Option<&str>) -> AppResult<(i32, u32)> {
    match arg {
        Some(m) => parse_month(m),
        None => {
            let t = today();
            Ok((t.year(), t.month()))
        }
    }
}
