use crate::core::calculator::Scheduled;
use chrono::NaiveDate;
use serde::Serialize;

/// What was taught during a block of time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub id: i64,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub school: String,
    pub class: String,
    pub description: String,
    pub hours: f64,
}

impl Activity {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl Scheduled for Activity {
    fn day(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
    fn start(&self) -> Option<&str> {
        Some(self.start_time.as_str())
    }
    fn end(&self) -> Option<&str> {
        Some(self.end_time.as_str())
    }
}
