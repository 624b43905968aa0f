use crate::db::{get_date, now_ts, sql_date};
use crate::errors::AppResult;
use crate::models::DailyNote;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<DailyNote> {
    Ok(DailyNote {
        id: row.get("id")?,
        date: get_date(row, "date")?,
        content: row.get("content")?,
        timestamp: row.get("timestamp")?,
    })
}

/// Insert or replace the note of a day. Returns true when a note was replaced.
pub fn upsert(conn: &Connection, date: NaiveDate, content: &str) -> AppResult<bool> {
    let existed = find(conn, date)?.is_some();
    conn.execute(
        "INSERT INTO daily_notes (date, content, timestamp) VALUES (?1, ?2, ?3)
         ON CONFLICT(date) DO UPDATE SET content = excluded.content, timestamp = excluded.timestamp",
        params![sql_date(date), content, now_ts()],
    )?;
    Ok(existed)
}

pub fn delete(conn: &Connection, date: NaiveDate) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM daily_notes WHERE date = ?1", [sql_date(date)])?)
}

pub fn find(conn: &Connection, date: NaiveDate) -> AppResult<Option<DailyNote>> {
    let mut stmt = conn.prepare("SELECT * FROM daily_notes WHERE date = ?1")?;
    Ok(stmt.query_row([sql_date(date)], map_row).optional()?)
}

pub fn between(conn: &Connection, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<DailyNote>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM daily_notes WHERE date BETWEEN ?1 AND ?2 ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(params![sql_date(from), sql_date(to)], map_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}

pub fn all(conn: &Connection) -> AppResult<Vec<DailyNote>> {
    let mut stmt = conn.prepare("SELECT * FROM daily_notes ORDER BY date ASC")?;
    let rows = stmt.query_map([], map_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}
