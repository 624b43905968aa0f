use super::day_or_today;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{AttendanceLogic, NoteLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::RegisterView;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREEN, YELLOW, colorize_optional, colorize_presence, paint};
use crate::utils::date::long_date;
use crate::utils::table::{Column, Table};

/// `register` (show) and `verify`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Register {
            school,
            class,
            date,
        } => {
            let day = day_or_today(date.as_deref())?;
            let pool = DbPool::open(&cfg.database)?;
            let view = AttendanceLogic::register(&pool, cfg, school, class, day)?;
            print_register(&view);
            if let Some(note) = NoteLogic::get(&pool, day)? {
                println!("Day note: {}", note.content);
            }
        }

        Commands::Verify {
            school,
            class,
            date,
            undo,
            by,
        } => {
            cfg.schools.require_class(school, class)?;
            let day = day_or_today(date.as_deref())?;
            let mut pool = DbPool::open(&cfg.database)?;
            let who = by.clone().or_else(|| cfg.operator.clone());
            let lesson = AttendanceLogic::verify(&mut pool, school, class, day, !*undo, who)?;

            if lesson.attendance_verified {
                success(format!("Attendance verified for {school} {class} on {day}"));
            } else {
                success(format!("Verification removed for {school} {class} on {day}"));
            }
        }

        _ => {}
    }

    Ok(())
}

fn print_register(view: &RegisterView) {
    header(format!("{} {} - {}", view.school, view.class, long_date(view.date)));

    if view.rows.is_empty() {
        info("No students in this class.");
        return;
    }

    let mut table = Table::new(vec![
        Column::right("#"),
        Column::right("ID"),
        Column::left("Student"),
        Column::left("Status"),
        Column::left("Notes"),
    ]);
    for (i, r) in view.rows.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            r.student.id.to_string(),
            r.student.name.clone(),
            colorize_presence(r.present),
            colorize_optional(if r.notes.is_empty() { "--" } else { &r.notes }),
        ]);
    }
    print!("{}", table.render());

    println!();
    println!("Present: {} / {}", view.present_count(), view.rows.len());
    println!("Absent: {}", view.absent_count());
    match &view.lesson {
        Some(l) => println!("Lesson: {}", l.time_range()),
        None => println!("Lesson: {}", paint("none", YELLOW)),
    }
    if let Some(a) = &view.activity {
        println!("Activity: {} ({} - {})", a.description, a.start_time, a.end_time);
    }
    if view.verified {
        println!("Attendance: {}", paint("verified", GREEN));
    } else {
        println!("Attendance: {}", paint("to verify", YELLOW));
    }
}
