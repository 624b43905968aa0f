use crate::db::{get_bool, get_date, now_ts, sql_date};
use crate::errors::AppResult;
use crate::models::Verification;
use rusqlite::{Connection, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Verification> {
    Ok(Verification {
        id: row.get("id")?,
        lesson_id: row.get("lesson_id")?,
        date: get_date(row, "date")?,
        school: row.get("school")?,
        class: row.get("class")?,
        verified: get_bool(row, "verified")?,
        verified_at: row.get("verified_at")?,
        verified_by: row.get("verified_by")?,
        timestamp: row.get("timestamp")?,
    })
}

pub fn insert(conn: &Connection, v: &Verification) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO verifications
            (lesson_id, date, school, class, verified, verified_at, verified_by, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            v.lesson_id,
            sql_date(v.date),
            v.school,
            v.class,
            v.verified as i64,
            v.verified_at,
            v.verified_by,
            now_ts(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn all(conn: &Connection) -> AppResult<Vec<Verification>> {
    let mut stmt = conn.prepare("SELECT * FROM verifications ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}
