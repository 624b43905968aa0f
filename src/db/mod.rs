pub mod activities;
pub mod attendance;
pub mod initialize;
pub mod lessons;
pub mod log;
pub mod migrate;
pub mod notes;
pub mod pool;
pub mod stats;
pub mod students;
pub mod verifications;

use crate::errors::AppError;
use chrono::{Local, NaiveDate};
use rusqlite::Row;

/// Dates are stored as `YYYY-MM-DD` text.
pub(crate) fn sql_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub(crate) fn now_ts() -> String {
    Local::now().to_rfc3339()
}

/// Read a `YYYY-MM-DD` column.
pub(crate) fn get_date(row: &Row, column: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(column)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(raw.clone())),
        )
    })
}

pub(crate) fn get_bool(row: &Row, column: &str) -> rusqlite::Result<bool> {
    Ok(row.get::<_, i64>(column)? != 0)
}
