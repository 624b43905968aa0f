//! Business logic. Each `*Logic` struct backs one group of commands.

pub mod activities;
pub mod attendance;
pub mod backup;
pub mod calculator;
pub mod lessons;
pub mod log;
pub mod notes;
pub mod query;
pub mod students;

pub use activities::ActivityLogic;
pub use attendance::AttendanceLogic;
pub use lessons::LessonLogic;
pub use notes::NoteLogic;
pub use students::StudentLogic;
