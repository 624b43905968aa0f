use super::optional_day;
use crate::cli::parser::{ActivityAction, ActivityFilter, Commands};
use crate::config::Config;
use crate::core::ActivityLogic;
use crate::core::activities::{ActivityPatch, NewActivity};
use crate::core::query::ActivityQuery;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::Activity;
use crate::ui::messages::{header, info, success};
use crate::utils::date::today;
use crate::utils::formatting::hours_label;
use crate::utils::prompt::confirm;
use crate::utils::table::{Column, Table};

impl From<&ActivityFilter> for ActivityQuery {
    fn from(f: &ActivityFilter) -> Self {
        ActivityQuery {
            period: f.period,
            month: f.month.clone(),
            range: f.range.clone(),
            school: f.school.clone(),
            class: f.class.clone(),
            sort: f.sort,
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Activity { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::open(&cfg.database)?;
    let now = today();

    match action {
        ActivityAction::Add {
            description,
            school,
            class,
            date,
            start,
            end,
            hours,
        } => {
            let input = NewActivity {
                date: optional_day(date.as_deref())?,
                school: school.clone(),
                class: class.clone(),
                description: description.clone(),
                start: start.clone(),
                end: end.clone(),
                hours: *hours,
            };
            let a = ActivityLogic::add(&mut pool, cfg, now, input)?;
            success(format!(
                "Activity {} added: {} {}-{} ({})",
                a.id,
                a.date,
                a.start_time,
                a.end_time,
                hours_label(a.hours)
            ));
        }

        ActivityAction::Edit {
            id,
            description,
            date,
            school,
            class,
            start,
            end,
            hours,
        } => {
            let patch = ActivityPatch {
                date: optional_day(date.as_deref())?,
                school: school.clone(),
                class: class.clone(),
                description: description.clone(),
                start: start.clone(),
                end: end.clone(),
                hours: *hours,
            };
            let a = ActivityLogic::edit(&mut pool, cfg, *id, patch)?;
            success(format!("Activity {} updated ({})", a.id, hours_label(a.hours)));
        }

        ActivityAction::Del { id, yes } => {
            let a = ActivityLogic::get(&pool, *id)?;
            if !*yes && !confirm(&format!("Delete the activity '{}' of {}?", a.description, a.date))? {
                info("Nothing deleted.");
                return Ok(());
            }
            ActivityLogic::delete(&mut pool, *id)?;
            success(format!("Activity {id} deleted"));
        }

        ActivityAction::List { filter } => {
            let query = ActivityQuery::from(filter);
            let list = ActivityLogic::list(&pool, &query, now)?;
            header(format!("Activities ({})", query.describe(now)));
            print_activities(&list);
        }

        ActivityAction::Summary { filter } => {
            let query = ActivityQuery::from(filter);
            let (list, totals) = ActivityLogic::summary(&pool, cfg, &query, now)?;
            header(format!("Activity summary ({})", query.describe(now)));
            if print_activities(&list) {
                println!();
                println!("Total hours      : {}", hours_label(totals.total));
                println!("This week        : {}", hours_label(totals.week));
                println!("This month       : {}", hours_label(totals.month));
                println!(
                    "Real hours       : {} ({})",
                    hours_label(totals.real),
                    cfg.merge_strategy.as_str()
                );
            }
        }
    }

    Ok(())
}

/// Returns false when there was nothing to print.
fn print_activities(list: &[Activity]) -> bool {
    if list.is_empty() {
        info("No activities found.");
        return false;
    }

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Date"),
        Column::left("School"),
        Column::left("Class"),
        Column::left("Time"),
        Column::right("Hours"),
        Column::left("Description"),
    ]);
    for a in list {
        table.add_row(vec![
            a.id.to_string(),
            a.date_str(),
            a.school.clone(),
            a.class.clone(),
            format!("{}-{}", a.start_time, a.end_time),
            hours_label(a.hours),
            a.description.clone(),
        ]);
    }
    print!("{}", table.render());
    true
}
