use crate::db::{get_bool, get_date, sql_date};
use crate::errors::AppResult;
use crate::models::Lesson;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Lesson> {
    Ok(Lesson {
        id: row.get("id")?,
        date: get_date(row, "date")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        school: row.get("school")?,
        class: row.get("class")?,
        hours: row.get("hours")?,
        completed: get_bool(row, "completed")?,
        attendance_verified: get_bool(row, "attendance_verified")?,
        verified_at: row.get("verified_at")?,
        verified_by: row.get("verified_by")?,
        notes: row.get("notes")?,
    })
}

pub fn insert(conn: &Connection, l: &Lesson) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO lessons
            (date, start_time, end_time, school, class, hours, completed,
             attendance_verified, verified_at, verified_by, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            sql_date(l.date),
            l.start_time,
            l.end_time,
            l.school,
            l.class,
            l.hours,
            l.completed as i64,
            l.attendance_verified as i64,
            l.verified_at,
            l.verified_by,
            l.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, l: &Lesson) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE lessons SET
            date = ?1, start_time = ?2, end_time = ?3, school = ?4, class = ?5,
            hours = ?6, completed = ?7, attendance_verified = ?8,
            verified_at = ?9, verified_by = ?10, notes = ?11
         WHERE id = ?12",
        params![
            sql_date(l.date),
            l.start_time,
            l.end_time,
            l.school,
            l.class,
            l.hours,
            l.completed as i64,
            l.attendance_verified as i64,
            l.verified_at,
            l.verified_by,
            l.notes,
            l.id,
        ],
    )?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM lessons WHERE id = ?1", [id])?)
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<Lesson>> {
    let mut stmt = conn.prepare("SELECT * FROM lessons WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// The lesson held by a class on a day (earliest one if several).
pub fn for_day(
    conn: &Connection,
    date: NaiveDate,
    school: &str,
    class: &str,
) -> AppResult<Option<Lesson>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM lessons
         WHERE date = ?1 AND school = ?2 AND class = ?3
         ORDER BY start_time ASC, id ASC
         LIMIT 1",
    )?;
    Ok(stmt
        .query_row(params![sql_date(date), school, class], map_row)
        .optional()?)
}

/// Lessons inside an inclusive window, sorted by date then start time.
pub fn between(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
    school: Option<&str>,
    class: Option<&str>,
) -> AppResult<Vec<Lesson>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM lessons
         WHERE date BETWEEN ?1 AND ?2
           AND (?3 IS NULL OR school = ?3)
           AND (?4 IS NULL OR class = ?4)
         ORDER BY date ASC, start_time ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![sql_date(from), sql_date(to), school, class], map_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}

pub fn verified(conn: &Connection, school: Option<&str>, class: Option<&str>) -> AppResult<Vec<Lesson>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM lessons
         WHERE attendance_verified = 1
           AND (?1 IS NULL OR school = ?1)
           AND (?2 IS NULL OR class = ?2)
         ORDER BY date ASC, start_time ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![school, class], map_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}

pub fn all(conn: &Connection) -> AppResult<Vec<Lesson>> {
    let mut stmt = conn.prepare("SELECT * FROM lessons ORDER BY date ASC, start_time ASC, id ASC")?;
    let rows = stmt.query_map([], map_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}
