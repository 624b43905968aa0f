use super::{Activity, Lesson, Student};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRow {
    pub student: Student,
    pub present: bool,
    pub notes: String,
}

/// The attendance register of one class on one day.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterView {
    pub date: NaiveDate,
    pub school: String,
    pub class: String,
    pub rows: Vec<RegisterRow>,
    pub verified: bool,
    pub lesson: Option<Lesson>,
    pub activity: Option<Activity>,
}

impl RegisterView {
    pub fn present_count(&self) -> usize {
        self.rows.iter().filter(|r| r.present).count()
    }

    pub fn absent_count(&self) -> usize {
        self.rows.len() - self.present_count()
    }
}
