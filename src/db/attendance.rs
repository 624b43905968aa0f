use crate::db::{get_bool, get_date, now_ts, sql_date};
use crate::errors::AppResult;
use crate::models::AttendanceRecord;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashMap;

fn map_row(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    Ok(AttendanceRecord {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        date: get_date(row, "date")?,
        school: row.get("school")?,
        class: row.get("class")?,
        present: get_bool(row, "present")?,
        notes: row.get("notes")?,
        verified: get_bool(row, "verified")?,
        verified_at: row.get("verified_at")?,
        verified_by: row.get("verified_by")?,
        timestamp: row.get("timestamp")?,
    })
}

/// Append a record. `id` and `timestamp` of `rec` are ignored.
pub fn insert(conn: &Connection, rec: &AttendanceRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO attendance
            (student_id, date, school, class, present, notes, verified, verified_at, verified_by, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            rec.student_id,
            sql_date(rec.date),
            rec.school,
            rec.class,
            rec.present as i64,
            rec.notes,
            rec.verified as i64,
            rec.verified_at,
            rec.verified_by,
            now_ts(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent record for a student on a day.
pub fn latest_for_student(
    conn: &Connection,
    student_id: i64,
    date: NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance
         WHERE student_id = ?1 AND date = ?2
         ORDER BY id DESC
         LIMIT 1",
    )?;
    Ok(stmt
        .query_row(params![student_id, sql_date(date)], map_row)
        .optional()?)
}

/// Effective record per student for a class on a day (newest wins).
pub fn latest_for_day(
    conn: &Connection,
    date: NaiveDate,
    school: &str,
    class: &str,
) -> AppResult<HashMap<i64, AttendanceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance
         WHERE date = ?1 AND school = ?2 AND class = ?3
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![sql_date(date), school, class], map_row)?;

    let mut out = HashMap::new();
    for r in rows {
        let rec = r?;
        out.insert(rec.student_id, rec);
    }
    Ok(out)
}

/// Stamp every record of a class/day with the verification state.
pub fn set_verified_for_day(
    conn: &Connection,
    date: NaiveDate,
    school: &str,
    class: &str,
    verified: bool,
    verified_at: Option<&str>,
    verified_by: Option<&str>,
) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE attendance
         SET verified = ?1, verified_at = ?2, verified_by = ?3
         WHERE date = ?4 AND school = ?5 AND class = ?6",
        params![
            verified as i64,
            verified_at,
            verified_by,
            sql_date(date),
            school,
            class
        ],
    )?)
}

pub fn all(conn: &Connection) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare("SELECT * FROM attendance ORDER BY date ASC, id ASC")?;
    let rows = stmt.query_map([], map_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}
