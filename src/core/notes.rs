use crate::core::query::month_bounds;
use crate::db::log::audit_quiet;
use crate::db::notes;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::DailyNote;
use chrono::NaiveDate;

pub struct NoteLogic;

impl NoteLogic {
    /// Write the note of a day, replacing any previous one.
    /// Returns true when an existing note was replaced.
    pub fn set(pool: &mut DbPool, date: NaiveDate, content: &str) -> AppResult<bool> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Note content cannot be empty".into()));
        }

        let replaced = notes::upsert(&pool.conn, date, content)?;
        audit_quiet(
            &pool.conn,
            if replaced { "edit" } else { "add" },
            &format!("day note {date}"),
            content,
        );
        Ok(replaced)
    }

    pub fn get(pool: &DbPool, date: NaiveDate) -> AppResult<Option<DailyNote>> {
        notes::find(&pool.conn, date)
    }

    pub fn delete(pool: &mut DbPool, date: NaiveDate) -> AppResult<()> {
        if notes::delete(&pool.conn, date)? == 0 {
            return Err(AppError::NotFound(format!("no note for {date}")));
        }
        audit_quiet(&pool.conn, "del", &format!("day note {date}"), "note removed");
        Ok(())
    }

    pub fn month(pool: &DbPool, year: i32, month: u32) -> AppResult<Vec<DailyNote>> {
        let (from, to) = month_bounds(year, month)
            .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
        notes::between(&pool.conn, from, to)
    }
}
