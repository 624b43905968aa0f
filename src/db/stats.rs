use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::Connection;
use std::fs;

pub const TABLES: &[&str] = &[
    "students",
    "attendance",
    "verifications",
    "lessons",
    "activities",
    "daily_notes",
    "log",
];

/// Row count per register table.
pub fn table_counts(conn: &Connection) -> AppResult<Vec<(&'static str, i64)>> {
    let mut out = Vec::with_capacity(TABLES.len());
    for t in TABLES {
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {t}"), [], |row| row.get(0))?;
        out.push((*t, n));
    }
    Ok(out)
}

/// Earliest and latest day found in lessons, activities and attendance.
pub fn date_range(conn: &Connection) -> AppResult<(Option<String>, Option<String>)> {
    Ok(conn.query_row(
        "SELECT MIN(date), MAX(date) FROM (
            SELECT date FROM lessons
            UNION ALL SELECT date FROM activities
            UNION ALL SELECT date FROM attendance
         )",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?)
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    println!("{}• Rows:{}", CYAN, RESET);
    for (table, n) in table_counts(&pool.conn)? {
        println!("    {:<14} {}{}{}", table, GREEN, n, RESET);
    }

    let (first, last) = date_range(&pool.conn)?;
    let dash = || format!("{GREY}--{RESET}");

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(dash));
    println!("    to:   {}", last.unwrap_or_else(dash));

    println!();
    Ok(())
}
