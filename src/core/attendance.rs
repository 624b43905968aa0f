use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::{activities, attendance, lessons, now_ts, students, verifications};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceRecord, Lesson, RegisterRow, RegisterView, Student, Verification};
use chrono::NaiveDate;

pub struct AttendanceLogic;

fn load_student(pool: &DbPool, id: i64) -> AppResult<Student> {
    students::find(&pool.conn, id)?.ok_or_else(|| AppError::NotFound(format!("student {id}")))
}

/// A new record for `student` on `date`, seeded from the current effective
/// state and the verification flag of the day's lesson.
fn next_record(pool: &DbPool, student: &Student, date: NaiveDate) -> AppResult<AttendanceRecord> {
    let current = attendance::latest_for_student(&pool.conn, student.id, date)?;
    let lesson = lessons::for_day(&pool.conn, date, &student.school, &student.class)?;

    let (verified, verified_at, verified_by) = match &lesson {
        Some(l) if l.attendance_verified => (true, l.verified_at.clone(), l.verified_by.clone()),
        _ => (false, None, None),
    };

    Ok(AttendanceRecord {
        id: 0,
        student_id: student.id,
        date,
        school: student.school.clone(),
        class: student.class.clone(),
        present: current.as_ref().map(|r| r.present).unwrap_or(true),
        notes: current.map(|r| r.notes).unwrap_or_default(),
        verified,
        verified_at,
        verified_by,
        timestamp: String::new(),
    })
}

impl AttendanceLogic {
    /// Record presence or absence. Notes already written for the day are kept.
    pub fn mark(pool: &mut DbPool, student_id: i64, date: NaiveDate, present: bool) -> AppResult<AttendanceRecord> {
        let student = load_student(pool, student_id)?;
        let mut rec = next_record(pool, &student, date)?;
        rec.present = present;

        rec.id = attendance::insert(&pool.conn, &rec)?;
        audit_quiet(
            &pool.conn,
            "attend",
            &format!("student {student_id}"),
            &format!(
                "{} marked {} on {date}",
                student.name,
                if present { "present" } else { "absent" }
            ),
        );
        Ok(rec)
    }

    /// Replace the note of a student for a day. Presence is kept.
    pub fn note(pool: &mut DbPool, student_id: i64, date: NaiveDate, notes: &str) -> AppResult<AttendanceRecord> {
        let student = load_student(pool, student_id)?;
        let mut rec = next_record(pool, &student, date)?;
        rec.notes = notes.trim().to_string();

        rec.id = attendance::insert(&pool.conn, &rec)?;
        audit_quiet(
            &pool.conn,
            "note",
            &format!("student {student_id}"),
            &format!("note for {} on {date}", student.name),
        );
        Ok(rec)
    }

    /// The register of a class for one day. Students without a record count
    /// as present.
    pub fn register(
        pool: &DbPool,
        cfg: &Config,
        school: &str,
        class: &str,
        date: NaiveDate,
    ) -> AppResult<RegisterView> {
        cfg.schools.require_class(school, class)?;
        Self::load_register(pool, school, class, date)
    }

    /// Like [`register`](Self::register) without the roster check, for
    /// lessons recorded before a class was removed from the configuration.
    pub fn load_register(pool: &DbPool, school: &str, class: &str, date: NaiveDate) -> AppResult<RegisterView> {
        let roster = students::list(&pool.conn, Some(school), Some(class))?;
        let mut marks = attendance::latest_for_day(&pool.conn, date, school, class)?;

        let rows = roster
            .into_iter()
            .map(|student| {
                let mark = marks.remove(&student.id);
                RegisterRow {
                    present: mark.as_ref().map(|m| m.present).unwrap_or(true),
                    notes: mark.map(|m| m.notes).unwrap_or_default(),
                    student,
                }
            })
            .collect();

        let lesson = lessons::for_day(&pool.conn, date, school, class)?;
        let activity = activities::first_for_day(&pool.conn, date, school, class)?;

        Ok(RegisterView {
            date,
            school: school.to_string(),
            class: class.to_string(),
            rows,
            verified: lesson.as_ref().map(|l| l.attendance_verified).unwrap_or(false),
            lesson,
            activity,
        })
    }

    /// Set the verification flag of the day's lesson. The lesson, a new
    /// verification row and every attendance record of the day change together
    /// or not at all.
    pub fn verify(
        pool: &mut DbPool,
        school: &str,
        class: &str,
        date: NaiveDate,
        verified: bool,
        by: Option<String>,
    ) -> AppResult<Lesson> {
        let mut lesson = lessons::for_day(&pool.conn, date, school, class)?.ok_or_else(|| {
            AppError::NotFound(format!("no lesson for {school} {class} on {date}"))
        })?;

        let now = now_ts();
        lesson.attendance_verified = verified;
        lesson.verified_at = Some(now.clone());
        lesson.verified_by = by.clone();

        pool.with_transaction(|tx| {
            lessons::update(tx, &lesson)?;
            verifications::insert(
                tx,
                &Verification {
                    id: 0,
                    lesson_id: lesson.id,
                    date,
                    school: school.to_string(),
                    class: class.to_string(),
                    verified,
                    verified_at: now.clone(),
                    verified_by: by.clone(),
                    timestamp: String::new(),
                },
            )?;
            attendance::set_verified_for_day(
                tx,
                date,
                school,
                class,
                verified,
                verified.then_some(now.as_str()),
                by.as_deref(),
            )?;
            Ok(())
        })?;

        audit_quiet(
            &pool.conn,
            if verified { "verify" } else { "unverify" },
            &format!("lesson {}", lesson.id),
            &format!("{school} {class} {date}"),
        );

        Ok(lesson)
    }
}
