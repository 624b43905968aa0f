use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyNote {
    pub id: i64,
    pub date: NaiveDate,
    pub content: String,
    pub timestamp: String,
}
