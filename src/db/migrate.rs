//! Versioned schema migrations.
//!
//! Every applied version is recorded in `log` with operation
//! `migration_applied` and the version as target, so running the list twice
//! is a no-op.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub struct Migration {
    pub version: &'static str,
    pub description: &'static str,
    sql: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20240901_0001_students_attendance",
        description: "Create students and attendance tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS students (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            school      TEXT NOT NULL,
            class       TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_students_class ON students(school, class);

        CREATE TABLE IF NOT EXISTS attendance (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id   INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            date         TEXT NOT NULL,
            school       TEXT NOT NULL,
            class        TEXT NOT NULL,
            present      INTEGER NOT NULL DEFAULT 1,
            notes        TEXT NOT NULL DEFAULT '',
            verified     INTEGER NOT NULL DEFAULT 0,
            verified_at  TEXT,
            verified_by  TEXT,
            timestamp    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_attendance_day ON attendance(date, school, class);
        CREATE INDEX IF NOT EXISTS idx_attendance_student ON attendance(student_id, date);
        "#,
    },
    Migration {
        version: "20240901_0002_lessons_activities",
        description: "Create lessons and activities tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS lessons (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            date                 TEXT NOT NULL,
            start_time           TEXT NOT NULL,
            end_time             TEXT NOT NULL,
            school               TEXT NOT NULL,
            class                TEXT NOT NULL DEFAULT '',
            hours                REAL NOT NULL DEFAULT 0,
            completed            INTEGER NOT NULL DEFAULT 0,
            attendance_verified  INTEGER NOT NULL DEFAULT 0,
            verified_at          TEXT,
            verified_by          TEXT,
            notes                TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_lessons_day ON lessons(date, school, class);

        CREATE TABLE IF NOT EXISTS activities (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL,
            start_time   TEXT NOT NULL,
            end_time     TEXT NOT NULL,
            school       TEXT NOT NULL,
            class        TEXT NOT NULL DEFAULT '',
            description  TEXT NOT NULL,
            hours        REAL NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_activities_day ON activities(date, school, class);
        "#,
    },
    Migration {
        version: "20241015_0003_verifications_daily_notes",
        description: "Create verifications and daily_notes tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS verifications (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            lesson_id    INTEGER NOT NULL,
            date         TEXT NOT NULL,
            school       TEXT NOT NULL,
            class        TEXT NOT NULL DEFAULT '',
            verified     INTEGER NOT NULL,
            verified_at  TEXT NOT NULL,
            verified_by  TEXT,
            timestamp    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_verifications_lesson ON verifications(lesson_id);

        CREATE TABLE IF NOT EXISTS daily_notes (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            date       TEXT NOT NULL UNIQUE,
            content    TEXT NOT NULL,
            timestamp  TEXT NOT NULL
        );
        "#,
    },
];

fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(stmt.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Migrations not yet recorded in `log`.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static Migration>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m);
        }
    }
    Ok(out)
}

/// True when the database already holds register tables (not a fresh file).
fn has_register_tables(conn: &Connection) -> AppResult<bool> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type = 'table' AND name NOT IN ('log', 'sqlite_sequence')",
        [],
        |row| row.get(0),
    )?;
    Ok(n > 0)
}

fn backup_path_for(db_path: &Path) -> PathBuf {
    let stem = db_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "registro".to_string());

    let name = format!(
        "{}-{}-pre_migration.zip",
        stem,
        Local::now().format("%Y%m%d_%H%M%S")
    );

    match db_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
        _ => PathBuf::from(name),
    }
}

/// Zip the database file next to itself.
fn backup_before_migration(db_path: &Path) -> AppResult<PathBuf> {
    let backup_path = backup_path_for(db_path);
    let zip_err = |e: zip::result::ZipError| AppError::Migration(format!("backup failed: {e}"));

    let content = std::fs::read(db_path)?;

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    let entry = db_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "database.sqlite".to_string());

    zip.start_file(entry, options).map_err(zip_err)?;
    zip.write_all(&content)?;
    zip.finish().map_err(zip_err)?;

    Ok(backup_path)
}

/// Run every pending migration, each in its own transaction.
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    let pending = pending_migrations(conn)?;
    if pending.is_empty() {
        return Ok(0);
    }

    if has_register_tables(conn)? {
        match conn.path().filter(|p| !p.is_empty()) {
            Some(p) => {
                warning("Pending schema changes: creating safety backup first...");
                let backup = backup_before_migration(Path::new(p))?;
                success(format!("📦 Backup created: {}", backup.display()));
            }
            None => warning("In-memory database: backup skipped."),
        }
    }

    for m in &pending {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(m.sql)
            .map_err(|e| AppError::Migration(format!("{}: {e}", m.version)))?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (?1, 'migration_applied', ?2, ?3)",
            params![Local::now().to_rfc3339(), m.version, m.description],
        )?;
        tx.commit()?;

        info(format!("Migration applied: {} ({})", m.version, m.description));
    }

    Ok(pending.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_pending_migrations(&conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_pending_migrations(&conn).unwrap(), 0);

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied as usize, MIGRATIONS.len());
    }

    #[test]
    fn versions_are_unique_and_ordered() {
        for pair in MIGRATIONS.windows(2) {
            assert!(pair[0].version < pair[1].version);
        }
    }
}
