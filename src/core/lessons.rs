use crate::config::Config;
use crate::core::calculator::{compute_real_hours_with, lesson_hours, stored_hours};
use crate::core::query::month_bounds;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::{lessons, now_ts};
use crate::errors::{AppError, AppResult};
use crate::models::Lesson;
use crate::utils::time::{normalize_time, parse_time};
use chrono::NaiveDate;

/// Input of `lesson add`.
#[derive(Debug, Clone, Default)]
pub struct NewLesson {
    pub date: Option<NaiveDate>,
    pub school: String,
    /// Empty means one school-wide lesson with no class.
    pub classes: Vec<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub hours: Option<f64>,
    pub verified: bool,
    pub notes: Option<String>,
}

/// Fields changed by `lesson edit`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct LessonPatch {
    pub date: Option<NaiveDate>,
    pub school: Option<String>,
    pub class: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub hours: Option<f64>,
    pub notes: Option<String>,
}

/// One month of lessons with the figures printed under the listing.
#[derive(Debug, Clone)]
pub struct LessonMonth {
    pub year: i32,
    pub month: u32,
    pub lessons: Vec<Lesson>,
    /// De-duplicated hours of completed lessons.
    pub real_hours: f64,
    /// Ceiling of the summed stored hours of completed lessons.
    pub billed_hours: u32,
}

pub struct LessonLogic;

pub(crate) fn checked_times(start: &str, end: &str) -> AppResult<(String, String)> {
    let s = normalize_time(start)?;
    let e = normalize_time(end)?;
    if parse_time(&e) <= parse_time(&s) {
        return Err(AppError::Validation(format!(
            "end time {e} must be after start time {s}"
        )));
    }
    Ok((s, e))
}

fn check_hours(hours: Option<f64>) -> AppResult<Option<f64>> {
    match hours {
        Some(h) if !h.is_finite() || h < 0.0 => {
            Err(AppError::Validation(format!("invalid hours value: {h}")))
        }
        other => Ok(other),
    }
}

impl LessonLogic {
    pub fn add(pool: &mut DbPool, cfg: &Config, today: NaiveDate, input: NewLesson) -> AppResult<Vec<Lesson>> {
        cfg.schools.require_school(&input.school)?;
        for c in &input.classes {
            cfg.schools.require_class(&input.school, c)?;
        }

        let (start, end) = checked_times(
            input.start.as_deref().unwrap_or(&cfg.default_start_time),
            input.end.as_deref().unwrap_or(&cfg.default_end_time),
        )?;
        let hours = check_hours(input.hours)?.unwrap_or_else(|| stored_hours(&start, &end));
        let date = input.date.unwrap_or(today);

        let classes = if input.classes.is_empty() {
            vec![String::new()]
        } else {
            input.classes.clone()
        };

        let verified_at = input.verified.then(now_ts);
        let verified_by = if input.verified { cfg.operator.clone() } else { None };

        let mut created = Vec::with_capacity(classes.len());
        pool.with_transaction(|tx| {
            for class in &classes {
                let mut lesson = Lesson {
                    id: 0,
                    date,
                    start_time: start.clone(),
                    end_time: end.clone(),
                    school: input.school.clone(),
                    class: class.clone(),
                    hours,
                    completed: false,
                    attendance_verified: input.verified,
                    verified_at: verified_at.clone(),
                    verified_by: verified_by.clone(),
                    notes: input.notes.clone().unwrap_or_default(),
                };
                lesson.id = lessons::insert(tx, &lesson)?;
                created.push(lesson);
            }
            Ok(())
        })?;

        for l in &created {
            audit_quiet(
                &pool.conn,
                "add",
                &format!("lesson {}", l.id),
                &format!("{} {} {} {}", l.date, l.time_range(), l.school, l.class),
            );
        }

        Ok(created)
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<Lesson> {
        lessons::find(&pool.conn, id)?.ok_or_else(|| AppError::NotFound(format!("lesson {id}")))
    }

    /// Apply `patch`. Hours follow the times unless given explicitly.
    pub fn edit(pool: &mut DbPool, cfg: &Config, id: i64, patch: LessonPatch) -> AppResult<Lesson> {
        let mut lesson = Self::get(pool, id)?;

        if let Some(d) = patch.date {
            lesson.date = d;
        }
        if let Some(s) = patch.school {
            lesson.school = s;
        }
        if let Some(c) = patch.class {
            lesson.class = c;
        }
        cfg.schools.require_school(&lesson.school)?;
        if !lesson.class.is_empty() {
            cfg.schools.require_class(&lesson.school, &lesson.class)?;
        }

        let (start, end) = checked_times(
            patch.start.as_deref().unwrap_or(&lesson.start_time),
            patch.end.as_deref().unwrap_or(&lesson.end_time),
        )?;
        lesson.start_time = start;
        lesson.end_time = end;
        lesson.hours = check_hours(patch.hours)?
            .unwrap_or_else(|| stored_hours(&lesson.start_time, &lesson.end_time));

        if let Some(n) = patch.notes {
            lesson.notes = n.trim().to_string();
        }

        lessons::update(&pool.conn, &lesson)?;
        audit_quiet(
            &pool.conn,
            "edit",
            &format!("lesson {id}"),
            &format!("{} {} {} {}", lesson.date, lesson.time_range(), lesson.school, lesson.class),
        );

        Ok(lesson)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Lesson> {
        let lesson = Self::get(pool, id)?;
        lessons::delete(&pool.conn, id)?;
        audit_quiet(
            &pool.conn,
            "del",
            &format!("lesson {id}"),
            &format!("{} {} {}", lesson.date, lesson.school, lesson.class),
        );
        Ok(lesson)
    }

    /// Flip the completed flag.
    pub fn toggle_complete(pool: &mut DbPool, id: i64) -> AppResult<Lesson> {
        let mut lesson = Self::get(pool, id)?;
        lesson.completed = !lesson.completed;
        lessons::update(&pool.conn, &lesson)?;
        audit_quiet(
            &pool.conn,
            "edit",
            &format!("lesson {id}"),
            if lesson.completed {
                "marked completed"
            } else {
                "marked not completed"
            },
        );
        Ok(lesson)
    }

    pub fn month(
        pool: &DbPool,
        cfg: &Config,
        year: i32,
        month: u32,
        school: Option<&str>,
        class: Option<&str>,
    ) -> AppResult<LessonMonth> {
        let (from, to) = month_bounds(year, month)
            .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;

        let lessons = lessons::between(&pool.conn, from, to, school, class)?;
        let completed: Vec<&Lesson> = lessons.iter().filter(|l| l.completed).collect();

        let real_hours = compute_real_hours_with(&completed, cfg.merge_strategy);
        let stored: f64 = completed.iter().map(|l| l.hours).sum();

        Ok(LessonMonth {
            year,
            month,
            real_hours,
            billed_hours: stored.max(0.0).ceil() as u32,
            lessons,
        })
    }
}

impl LessonMonth {
    /// Ceiling hours of a single listed lesson.
    pub fn listed_hours(lesson: &Lesson) -> u32 {
        lesson_hours(&lesson.start_time, &lesson.end_time)
    }
}
