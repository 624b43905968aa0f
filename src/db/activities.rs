use crate::db::{get_date, sql_date};
use crate::errors::AppResult;
use crate::models::Activity;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get("id")?,
        date: get_date(row, "date")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        school: row.get("school")?,
        class: row.get("class")?,
        description: row.get("description")?,
        hours: row.get("hours")?,
    })
}

pub fn insert(conn: &Connection, a: &Activity) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO activities (date, start_time, end_time, school, class, description, hours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            sql_date(a.date),
            a.start_time,
            a.end_time,
            a.school,
            a.class,
            a.description,
            a.hours
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, a: &Activity) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE activities SET
            date = ?1, start_time = ?2, end_time = ?3, school = ?4, class = ?5,
            description = ?6, hours = ?7
         WHERE id = ?8",
        params![
            sql_date(a.date),
            a.start_time,
            a.end_time,
            a.school,
            a.class,
            a.description,
            a.hours,
            a.id
        ],
    )?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM activities WHERE id = ?1", [id])?)
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<Activity>> {
    let mut stmt = conn.prepare("SELECT * FROM activities WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Activities filtered by school and class only; date windows are applied by
/// the caller. Rows come back in insertion order.
pub fn list(conn: &Connection, school: Option<&str>, class: Option<&str>) -> AppResult<Vec<Activity>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM activities
         WHERE (?1 IS NULL OR school = ?1)
           AND (?2 IS NULL OR class = ?2)
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![school, class], map_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}

/// First activity recorded for a class on a day.
pub fn first_for_day(
    conn: &Connection,
    date: chrono::NaiveDate,
    school: &str,
    class: &str,
) -> AppResult<Option<Activity>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM activities
         WHERE date = ?1 AND school = ?2 AND class = ?3
         ORDER BY start_time ASC, id ASC
         LIMIT 1",
    )?;
    Ok(stmt
        .query_row(params![sql_date(date), school, class], map_row)
        .optional()?)
}
