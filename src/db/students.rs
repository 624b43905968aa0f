use crate::db::now_ts;
use crate::errors::AppResult;
use crate::models::Student;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get("id")?,
        name: row.get("name")?,
        school: row.get("school")?,
        class: row.get("class")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert(conn: &Connection, name: &str, school: &str, class: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO students (name, school, class, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![name, school, class, now_ts()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn rename(conn: &Connection, id: i64, name: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE students SET name = ?1 WHERE id = ?2",
        params![name, id],
    )?)
}

/// Delete a student together with the attendance history.
pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    conn.execute("DELETE FROM attendance WHERE student_id = ?1", [id])?;
    Ok(conn.execute("DELETE FROM students WHERE id = ?1", [id])?)
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<Student>> {
    let mut stmt = conn.prepare("SELECT * FROM students WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Students, optionally restricted to a school and class, sorted by name.
pub fn list(conn: &Connection, school: Option<&str>, class: Option<&str>) -> AppResult<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM students
         WHERE (?1 IS NULL OR school = ?1)
           AND (?2 IS NULL OR class = ?2)
         ORDER BY name COLLATE NOCASE ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![school, class], map_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}

pub fn count_in_class(conn: &Connection, school: &str, class: &str) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM students WHERE school = ?1 AND class = ?2",
        params![school, class],
        |row| row.get(0),
    )?)
}
