use super::{day_or_today, month_or_current};
use crate::cli::parser::{Commands, DayNoteAction};
use crate::config::Config;
use crate::core::NoteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::date::{month_name, short_date};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::DayNote { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::open(&cfg.database)?;

    match action {
        DayNoteAction::Set { text, date } => {
            let day = day_or_today(date.as_deref())?;
            if NoteLogic::set(&mut pool, day, text)? {
                success(format!("Note of {day} replaced"));
            } else {
                success(format!("Note of {day} saved"));
            }
        }

        DayNoteAction::Del { date } => {
            let day = day_or_today(date.as_deref())?;
            NoteLogic::delete(&mut pool, day)?;
            success(format!("Note of {day} deleted"));
        }

        DayNoteAction::List { month } => {
            let (year, m) = month_or_current(month.as_deref())?;
            let list = NoteLogic::month(&pool, year, m)?;
            header(format!("Day notes of {} {}", month_name(m), year));
            if list.is_empty() {
                info("No notes.");
            }
            for n in &list {
                println!("{}  {}", short_date(n.date), n.content);
            }
        }
    }

    Ok(())
}
