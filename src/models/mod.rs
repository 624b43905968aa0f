//! Explicit schemas for every record kind kept in the register.

pub mod activity;
pub mod attendance;
pub mod daily_note;
pub mod lesson;
pub mod register;
pub mod roster;
pub mod student;
pub mod verification;

pub use activity::Activity;
pub use attendance::AttendanceRecord;
pub use daily_note::DailyNote;
pub use lesson::Lesson;
pub use register::{RegisterRow, RegisterView};
pub use roster::{Roster, SchoolRoster};
pub use student::Student;
pub use verification::Verification;
