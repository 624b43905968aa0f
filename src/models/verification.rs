use chrono::NaiveDate;
use serde::Serialize;

/// Audit row written every time a lesson's attendance is (un)verified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verification {
    pub id: i64,
    pub lesson_id: i64,
    pub date: NaiveDate,
    pub school: String,
    pub class: String,
    pub verified: bool,
    pub verified_at: String,
    pub verified_by: Option<String>,
    pub timestamp: String,
}
