use super::day_or_today;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AttendanceLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// `attend` and `note`: both append an attendance record.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Attend {
            student,
            date,
            absent,
            ..
        } => {
            let day = day_or_today(date.as_deref())?;
            let mut pool = DbPool::open(&cfg.database)?;
            let rec = AttendanceLogic::mark(&mut pool, *student, day, !*absent)?;
            success(format!(
                "Student {} marked {} on {}",
                rec.student_id,
                if rec.present { "present" } else { "absent" },
                rec.date
            ));
        }

        Commands::Note {
            student,
            text,
            date,
        } => {
            let day = day_or_today(date.as_deref())?;
            let mut pool = DbPool::open(&cfg.database)?;
            let rec = AttendanceLogic::note(&mut pool, *student, day, text)?;
            if rec.notes.is_empty() {
                success(format!("Note cleared for student {} on {}", rec.student_id, rec.date));
            } else {
                success(format!("Note saved for student {} on {}", rec.student_id, rec.date));
            }
        }

        _ => {}
    }

    Ok(())
}
