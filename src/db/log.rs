use crate::db::now_ts;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use rusqlite::{Connection, params};
use serde::Serialize;

/// Append a line to the internal `log` table.
pub fn audit(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![now_ts(), operation, target, message])?;
    Ok(())
}

/// Like [`audit`], but a failure only produces a warning.
pub fn audit_quiet(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = audit(conn, operation, target, message) {
        warning(format!("Failed to write internal log: {e}"));
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub fn load_log(conn: &Connection, limit: Option<usize>) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, operation, IFNULL(target, ''), message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut out: Vec<LogEntry> = rows.collect::<rusqlite::Result<_>>()?;
    if let Some(n) = limit
        && out.len() > n
    {
        out.drain(..out.len() - n);
    }
    Ok(out)
}
