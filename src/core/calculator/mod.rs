//! Hour arithmetic over lessons and activities.

pub mod lesson_hours;
pub mod real_hours;
pub mod totals;

pub use lesson_hours::{activity_hours, lesson_hours, stored_hours};
pub use real_hours::{
    MergeStrategy, Scheduled, TimeSlot, compute_real_hours, compute_real_hours_with,
    merge_time_slots,
};
pub use totals::ActivityTotals;
