//! Real-hours reconciliation.
//!
//! Activities recorded for the same class often describe the same span of time
//! twice (two descriptions for one morning, a lesson re-entered with slightly
//! different bounds). Summing their durations would double count; instead the
//! ranges are merged into disjoint [`TimeSlot`]s and only the union is counted.
//!
//! Two merge strategies are available:
//!
//! * [`MergeStrategy::Legacy`] scans the slots built so far and folds each new
//!   range into the *first* slot it touches, without re-checking the other
//!   slots. Records are visited in `(date, start time as text)` order, so
//!   unpadded times such as `"9:00"` sort after `"10:00"` and two slots may end
//!   up overlapping. This is the historical behaviour and stays the default.
//! * [`MergeStrategy::FixedPoint`] runs the same pass, then sorts the slots by
//!   start and sweeps them once more, so the result no longer depends on input
//!   order.

use crate::utils::time::{parse_time, round2};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Anything carrying a calendar day and a start/end time of day.
///
/// Every accessor may be missing; empty strings count as missing.
pub trait Scheduled {
    fn day(&self) -> Option<NaiveDate>;
    fn start(&self) -> Option<&str>;
    fn end(&self) -> Option<&str>;
}

impl<T: Scheduled + ?Sized> Scheduled for &T {
    fn day(&self) -> Option<NaiveDate> {
        (**self).day()
    }
    fn start(&self) -> Option<&str> {
        (**self).start()
    }
    fn end(&self) -> Option<&str> {
        (**self).end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    #[default]
    Legacy,
    FixedPoint,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::Legacy => "legacy",
            MergeStrategy::FixedPoint => "fixed_point",
        }
    }
}

/// A merged interval. Bounds are inclusive when testing for overlap, so two
/// ranges that merely touch (`08:00-10:00`, `10:00-11:00`) end up in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSlot {
    fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }

    fn touches(&self, other: &TimeSlot) -> bool {
        self.contains(other.start)
            || self.contains(other.end)
            || (other.start <= self.start && other.end >= self.end)
    }

    fn absorb(&mut self, other: &TimeSlot) {
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
    }

    pub fn hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}

fn field(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Absolute bounds of one record, or `None` when it has to be skipped:
/// missing field, malformed time, or end before start.
fn materialize<R: Scheduled>(record: &R) -> Option<TimeSlot> {
    let day = record.day()?;
    let start = parse_time(field(record.start())?)?;
    let end = parse_time(field(record.end())?)?;

    if end < start {
        return None;
    }

    Some(TimeSlot {
        start: day.and_time(start),
        end: day.and_time(end),
    })
}

/// Build the disjoint slots covering `records`.
pub fn merge_time_slots<R: Scheduled>(records: &[R], strategy: MergeStrategy) -> Vec<TimeSlot> {
    let mut ordered: Vec<&R> = records.iter().filter(|r| r.day().is_some()).collect();
    ordered.sort_by(|a, b| {
        a.day()
            .cmp(&b.day())
            .then_with(|| a.start().unwrap_or("").cmp(b.start().unwrap_or("")))
    });

    let mut slots: Vec<TimeSlot> = Vec::new();

    for record in ordered {
        let Some(candidate) = materialize(record) else {
            continue;
        };

        // first match only
        match slots.iter_mut().find(|slot| slot.touches(&candidate)) {
            Some(slot) => slot.absorb(&candidate),
            None => slots.push(candidate),
        }
    }

    match strategy {
        MergeStrategy::Legacy => slots,
        MergeStrategy::FixedPoint => sweep(slots),
    }
}

fn sweep(mut slots: Vec<TimeSlot>) -> Vec<TimeSlot> {
    slots.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<TimeSlot> = Vec::with_capacity(slots.len());
    for slot in slots {
        if let Some(last) = merged.last_mut()
            && slot.start <= last.end
        {
            last.end = last.end.max(slot.end);
            continue;
        }
        merged.push(slot);
    }
    merged
}

/// De-duplicated hours across `records`, rounded to two decimals, using the
/// legacy single-pass merge.
pub fn compute_real_hours<R: Scheduled>(records: &[R]) -> f64 {
    compute_real_hours_with(records, MergeStrategy::Legacy)
}

pub fn compute_real_hours_with<R: Scheduled>(records: &[R], strategy: MergeStrategy) -> f64 {
    let total: f64 = merge_time_slots(records, strategy)
        .iter()
        .map(TimeSlot::hours)
        .sum();

    round2(total.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Raw(Option<NaiveDate>, Option<&'static str>, Option<&'static str>);

    impl Scheduled for Raw {
        fn day(&self) -> Option<NaiveDate> {
            self.0
        }
        fn start(&self) -> Option<&str> {
            self.1
        }
        fn end(&self) -> Option<&str> {
            self.2
        }
    }

    fn d(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 3, day)
    }

    #[test]
    fn touching_ranges_share_a_slot() {
        let recs = [
            Raw(d(3), Some("08:00"), Some("10:00")),
            Raw(d(3), Some("10:00"), Some("11:00")),
        ];
        let slots = merge_time_slots(&recs, MergeStrategy::Legacy);
        assert_eq!(slots.len(), 1);
        assert_eq!(compute_real_hours(&recs), 3.0);
    }

    #[test]
    fn missing_fields_are_skipped() {
        let recs = [
            Raw(None, Some("08:00"), Some("10:00")),
            Raw(d(3), None, Some("10:00")),
            Raw(d(3), Some("08:00"), Some("  ")),
            Raw(d(3), Some("12:00"), Some("13:15")),
        ];
        assert_eq!(compute_real_hours(&recs), 1.25);
    }

    #[test]
    fn inverted_range_is_ignored() {
        let recs = [
            Raw(d(3), Some("11:00"), Some("09:00")),
            Raw(d(3), Some("12:00"), Some("13:00")),
        ];
        assert_eq!(compute_real_hours(&recs), 1.0);
    }

    #[test]
    fn zero_length_range_contributes_nothing() {
        let recs = [Raw(d(3), Some("09:00"), Some("09:00"))];
        let slots = merge_time_slots(&recs, MergeStrategy::Legacy);
        assert_eq!(slots.len(), 1);
        assert_eq!(compute_real_hours(&recs), 0.0);
    }

    #[test]
    fn sweep_merges_overlapping_slots() {
        let at = |h: u32, m: u32| d(3).unwrap().and_hms_opt(h, m, 0).unwrap();
        let merged = sweep(vec![
            TimeSlot { start: at(9, 0), end: at(12, 0) },
            TimeSlot { start: at(8, 0), end: at(9, 30) },
            TimeSlot { start: at(13, 0), end: at(14, 0) },
        ]);
        assert_eq!(
            merged,
            vec![
                TimeSlot { start: at(8, 0), end: at(12, 0) },
                TimeSlot { start: at(13, 0), end: at(14, 0) },
            ]
        );
    }
}
