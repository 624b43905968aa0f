use chrono::NaiveDate;
use serde::Serialize;

/// One presence mark. Records are append-only: the newest one for a
/// (student, date) pair is the effective state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub school: String,
    pub class: String,
    pub present: bool,
    pub notes: String,
    pub verified: bool,
    pub verified_at: Option<String>,
    pub verified_by: Option<String>,
    pub timestamp: String,
}
