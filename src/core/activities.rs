use crate::config::Config;
use crate::core::calculator::{ActivityTotals, activity_hours};
use crate::core::lessons::checked_times;
use crate::core::query::ActivityQuery;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::{activities, lessons};
use crate::errors::{AppError, AppResult};
use crate::models::Activity;
use chrono::NaiveDate;

#[derive(Debug, Clone, Default)]
pub struct NewActivity {
    pub date: Option<NaiveDate>,
    pub school: String,
    pub class: String,
    pub description: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub hours: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ActivityPatch {
    pub date: Option<NaiveDate>,
    pub school: Option<String>,
    pub class: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub hours: Option<f64>,
}

pub struct ActivityLogic;

fn clean_description(d: &str) -> AppResult<String> {
    let d = d.trim();
    if d.is_empty() {
        return Err(AppError::Validation("Activity description is required".into()));
    }
    Ok(d.to_string())
}

fn check_place(cfg: &Config, school: &str, class: &str) -> AppResult<()> {
    if class.is_empty() {
        cfg.schools.require_school(school).map(|_| ())
    } else {
        cfg.schools.require_class(school, class)
    }
}

fn resolve_hours(manual: Option<f64>, start: &str, end: &str) -> AppResult<f64> {
    match manual {
        Some(h) if !h.is_finite() || h < 0.0 => {
            Err(AppError::Validation(format!("invalid hours value: {h}")))
        }
        Some(h) => Ok(h),
        None => Ok(activity_hours(start, end)),
    }
}

impl ActivityLogic {
    /// Times missing from `input` come from the class lesson of that day,
    /// then from the configured defaults.
    pub fn add(pool: &mut DbPool, cfg: &Config, today: NaiveDate, input: NewActivity) -> AppResult<Activity> {
        let description = clean_description(&input.description)?;
        check_place(cfg, &input.school, &input.class)?;

        let date = input.date.unwrap_or(today);
        let lesson = lessons::for_day(&pool.conn, date, &input.school, &input.class)?;

        let (default_start, default_end) = match &lesson {
            Some(l) => (l.start_time.clone(), l.end_time.clone()),
            None => (cfg.default_start_time.clone(), cfg.default_end_time.clone()),
        };

        let (start, end) = checked_times(
            input.start.as_deref().unwrap_or(&default_start),
            input.end.as_deref().unwrap_or(&default_end),
        )?;
        let hours = resolve_hours(input.hours, &start, &end)?;

        let mut activity = Activity {
            id: 0,
            date,
            start_time: start,
            end_time: end,
            school: input.school,
            class: input.class,
            description,
            hours,
        };
        activity.id = activities::insert(&pool.conn, &activity)?;

        audit_quiet(
            &pool.conn,
            "add",
            &format!("activity {}", activity.id),
            &format!(
                "{} {}-{} {} {}",
                activity.date, activity.start_time, activity.end_time, activity.school, activity.class
            ),
        );

        Ok(activity)
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<Activity> {
        activities::find(&pool.conn, id)?.ok_or_else(|| AppError::NotFound(format!("activity {id}")))
    }

    pub fn edit(pool: &mut DbPool, cfg: &Config, id: i64, patch: ActivityPatch) -> AppResult<Activity> {
        let mut a = Self::get(pool, id)?;

        if let Some(d) = patch.date {
            a.date = d;
        }
        if let Some(s) = patch.school {
            a.school = s;
        }
        if let Some(c) = patch.class {
            a.class = c;
        }
        check_place(cfg, &a.school, &a.class)?;

        if let Some(d) = patch.description {
            a.description = clean_description(&d)?;
        }

        let times_changed = patch.start.is_some() || patch.end.is_some();
        let (start, end) = checked_times(
            patch.start.as_deref().unwrap_or(&a.start_time),
            patch.end.as_deref().unwrap_or(&a.end_time),
        )?;
        a.start_time = start;
        a.end_time = end;

        if patch.hours.is_some() || times_changed {
            a.hours = resolve_hours(patch.hours, &a.start_time, &a.end_time)?;
        }

        activities::update(&pool.conn, &a)?;
        audit_quiet(
            &pool.conn,
            "edit",
            &format!("activity {id}"),
            &format!("{} {}-{} {}", a.date, a.start_time, a.end_time, a.description),
        );

        Ok(a)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Activity> {
        let a = Self::get(pool, id)?;
        activities::delete(&pool.conn, id)?;
        audit_quiet(
            &pool.conn,
            "del",
            &format!("activity {id}"),
            &format!("{} {} {}", a.date, a.school, a.description),
        );
        Ok(a)
    }

    /// School and class are filtered in SQL, the date window in memory.
    pub fn list(pool: &DbPool, query: &ActivityQuery, today: NaiveDate) -> AppResult<Vec<Activity>> {
        let rows = activities::list(&pool.conn, query.school.as_deref(), query.class.as_deref())?;
        query.apply(rows, today)
    }

    pub fn summary(
        pool: &DbPool,
        cfg: &Config,
        query: &ActivityQuery,
        today: NaiveDate,
    ) -> AppResult<(Vec<Activity>, ActivityTotals)> {
        let rows = Self::list(pool, query, today)?;
        let totals = ActivityTotals::compute(&rows, today, cfg.merge_strategy);
        Ok((rows, totals))
    }
}
