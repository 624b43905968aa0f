use super::{month_or_current, optional_day};
use crate::cli::parser::{Commands, LessonAction};
use crate::config::Config;
use crate::core::LessonLogic;
use crate::core::lessons::{LessonMonth, LessonPatch, NewLesson};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{colorize_optional, colour_for_status, paint};
use crate::utils::date::{month_name, today};
use crate::utils::formatting::{hours_label, yes_no};
use crate::utils::prompt::confirm;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Lesson { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::open(&cfg.database)?;

    match action {
        LessonAction::Add {
            school,
            classes,
            date,
            start,
            end,
            hours,
            verified,
            notes,
        } => {
            let input = NewLesson {
                date: optional_day(date.as_deref())?,
                school: school.clone(),
                classes: classes.clone(),
                start: start.clone(),
                end: end.clone(),
                hours: *hours,
                verified: *verified,
                notes: notes.clone(),
            };
            for l in LessonLogic::add(&mut pool, cfg, today(), input)? {
                success(format!(
                    "Lesson {} added: {} {} {} {}",
                    l.id,
                    l.date,
                    l.time_range(),
                    l.school,
                    if l.class.is_empty() { "(whole school)" } else { l.class.as_str() }
                ));
            }
        }

        LessonAction::Edit {
            id,
            date,
            school,
            class,
            start,
            end,
            hours,
            notes,
        } => {
            let patch = LessonPatch {
                date: optional_day(date.as_deref())?,
                school: school.clone(),
                class: class.clone(),
                start: start.clone(),
                end: end.clone(),
                hours: *hours,
                notes: notes.clone(),
            };
            let l = LessonLogic::edit(&mut pool, cfg, *id, patch)?;
            success(format!("Lesson {} updated: {} {} ({})", l.id, l.date, l.time_range(), hours_label(l.hours)));
        }

        LessonAction::Del { id, yes } => {
            let l = LessonLogic::get(&pool, *id)?;
            if !*yes && !confirm(&format!("Delete the lesson of {} {} {}?", l.date, l.school, l.class))? {
                info("Nothing deleted.");
                return Ok(());
            }
            LessonLogic::delete(&mut pool, *id)?;
            success(format!("Lesson {id} deleted"));
        }

        LessonAction::Complete { id } => {
            let l = LessonLogic::toggle_complete(&mut pool, *id)?;
            success(format!(
                "Lesson {} marked {}",
                l.id,
                if l.completed { "completed" } else { "not completed" }
            ));
        }

        LessonAction::List {
            month,
            school,
            class,
        } => {
            let (year, m) = month_or_current(month.as_deref())?;
            let data = LessonLogic::month(&pool, cfg, year, m, school.as_deref(), class.as_deref())?;
            print_month(&data);
        }
    }

    Ok(())
}

fn print_month(data: &LessonMonth) {
    header(format!("Lessons of {} {}", month_name(data.month), data.year));

    if data.lessons.is_empty() {
        info("No lessons in this month.");
        return;
    }

    let now = today();
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Date"),
        Column::left("Time"),
        Column::left("School"),
        Column::left("Class"),
        Column::right("Hours"),
        Column::left("Done"),
        Column::left("Status"),
    ]);
    for l in &data.lessons {
        let status = l.status_on(now).label();
        table.add_row(vec![
            l.id.to_string(),
            l.date_str(),
            l.time_range(),
            l.school.clone(),
            colorize_optional(if l.class.is_empty() { "--" } else { &l.class }),
            LessonMonth::listed_hours(l).to_string(),
            yes_no(l.completed).to_string(),
            paint(status, colour_for_status(status)),
        ]);
    }
    print!("{}", table.render());

    println!();
    println!("Real hours (completed): {}", hours_label(data.real_hours));
    println!("Billed hours (completed): {}h", data.billed_hours);
}
