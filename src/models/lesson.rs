use crate::core::calculator::Scheduled;
use chrono::NaiveDate;
use serde::Serialize;

/// A scheduled time block for a class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    pub id: i64,
    pub date: NaiveDate,      // ⇔ lessons.date ("YYYY-MM-DD")
    pub start_time: String,   // ⇔ lessons.start_time ("HH:MM")
    pub end_time: String,     // ⇔ lessons.end_time ("HH:MM")
    pub school: String,
    pub class: String,        // may be empty for school-wide lessons
    pub hours: f64,           // stored hours, exact or manual
    pub completed: bool,
    pub attendance_verified: bool,
    pub verified_at: Option<String>,
    pub verified_by: Option<String>,
    pub notes: String,
}

/// Status shown next to a lesson in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStatus {
    Scheduled,
    Verified,
    ToVerify,
}

impl LessonStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LessonStatus::Scheduled => "scheduled",
            LessonStatus::Verified => "verified",
            LessonStatus::ToVerify => "to verify",
        }
    }
}

impl Lesson {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }

    /// Future lessons are only scheduled; past ones are either verified or pending.
    pub fn status_on(&self, today: NaiveDate) -> LessonStatus {
        if self.date > today {
            LessonStatus::Scheduled
        } else if self.attendance_verified {
            LessonStatus::Verified
        } else {
            LessonStatus::ToVerify
        }
    }
}

impl Scheduled for Lesson {
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
