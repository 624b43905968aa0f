use chrono::NaiveDate;
use registro::core::calculator::{
    MergeStrategy, Scheduled, compute_real_hours, compute_real_hours_with, lesson_hours,
    merge_time_slots,
};
use registro::core::query::{ActivityQuery, Period, SortDirection};
use registro::models::Activity;

/// Minimal record with every field optional, as loose input arrives.
struct Slot {
    day: Option<NaiveDate>,
    start: Option<&'static str>,
    end: Option<&'static str>,
}

impl Scheduled for Slot {
    fn day(&self) -> Option<NaiveDate> {
        self.day
    }
    fn start(&self) -> Option<&str> {
        self.start.filter(|s| !s.is_empty())
    }
    fn end(&self) -> Option<&str> {
        self.end.filter(|s| !s.is_empty())
    }
}

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

fn slot(day: u32, start: &'static str, end: &'static str) -> Slot {
    Slot {
        day: Some(d(day)),
        start: Some(start),
        end: Some(end),
    }
}

const STRATEGIES: [MergeStrategy; 2] = [MergeStrategy::Legacy, MergeStrategy::FixedPoint];

fn activity(day: u32, start: &str, end: &str, hours: f64) -> Activity {
    Activity {
        id: 0,
        date: d(day),
        start_time: start.into(),
        end_time: end.into(),
        school: "Pitagora".into(),
        class: "4A".into(),
        description: "lesson".into(),
        hours,
    }
}

#[test]
fn test_empty_input_is_zero() {
    let none: Vec<Slot> = Vec::new();
    assert_eq!(compute_real_hours(&none), 0.0);
}

#[test]
fn test_overlaps_and_touching_ranges_merge() {
    let records = vec![
        slot(3, "08:00", "10:00"),
        slot(3, "09:00", "11:00"),
        slot(3, "11:00", "12:00"),
    ];
    assert_eq!(compute_real_hours(&records), 4.0);
}

#[test]
fn test_days_are_kept_apart() {
    let records = vec![slot(3, "08:00", "10:00"), slot(4, "08:00", "10:00")];
    assert_eq!(compute_real_hours(&records), 4.0);
    assert_eq!(merge_time_slots(&records, MergeStrategy::Legacy).len(), 2);
}

#[test]
fn test_separate_ranges_on_one_day_add_up() {
    let records = vec![slot(3, "08:00", "10:00"), slot(3, "11:00", "13:00")];
    for strategy in STRATEGIES {
        assert_eq!(compute_real_hours_with(&records, strategy), 4.0);
        assert_eq!(merge_time_slots(&records, strategy).len(), 2);
    }
}

#[test]
fn test_contained_range_counts_once() {
    let records = vec![slot(3, "08:00", "14:00"), slot(3, "09:00", "10:00")];
    for strategy in STRATEGIES {
        assert_eq!(compute_real_hours_with(&records, strategy), 6.0);
    }
}

#[test]
fn test_outer_range_visited_after_inner_absorbs_it() {
    // "10:00" sorts before "8:00", so the enclosing range arrives second and
    // neither of its bounds falls inside the existing slot.
    let records = vec![slot(3, "8:00", "12:00"), slot(3, "10:00", "11:00")];
    for strategy in STRATEGIES {
        let slots = merge_time_slots(&records, strategy);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].hours(), 4.0);
        assert_eq!(compute_real_hours_with(&records, strategy), 4.0);
    }
}

#[test]
fn test_lesson_hours_round_up_but_real_hours_do_not() {
    let records = vec![slot(3, "08:00", "08:30")];
    assert_eq!(lesson_hours("08:00", "08:30"), 1);
    for strategy in STRATEGIES {
        assert_eq!(compute_real_hours_with(&records, strategy), 0.5);
    }
}

#[test]
fn test_same_input_gives_same_result() {
    let records = vec![
        slot(3, "10:00", "12:00"),
        slot(3, "8:00", "9:30"),
        slot(3, "9:00", "10:00"),
        slot(4, "08:00", "14:00"),
        slot(4, "09:00", "10:00"),
    ];
    for strategy in STRATEGIES {
        let first = compute_real_hours_with(&records, strategy);
        assert_eq!(compute_real_hours_with(&records, strategy), first);
        assert_eq!(
            merge_time_slots(&records, strategy),
            merge_time_slots(&records, strategy)
        );
    }
}

#[test]
fn test_incomplete_and_malformed_records_are_skipped() {
    let records = vec![
        slot(3, "08:00", "09:00"),
        Slot {
            day: None,
            start: Some("10:00"),
            end: Some("11:00"),
        },
        Slot {
            day: Some(d(3)),
            start: Some(""),
            end: Some("11:00"),
        },
        slot(3, "25:00", "26:00"),
        slot(3, "8h", "9h"),
        slot(3, "12:00", "11:00"),
    ];
    assert_eq!(compute_real_hours(&records), 1.0);
}

#[test]
fn test_zero_length_range_counts_nothing() {
    let records = vec![slot(3, "10:00", "10:00")];
    assert_eq!(compute_real_hours(&records), 0.0);
}

#[test]
fn test_legacy_pass_depends_on_text_order() {
    // "10:00" sorts before "8:00" as text, so the legacy pass leaves two
    // overlapping slots behind; the fixed-point sweep merges them.
    let records = vec![
        slot(3, "10:00", "12:00"),
        slot(3, "8:00", "9:30"),
        slot(3, "9:00", "10:00"),
    ];
    assert_eq!(compute_real_hours(&records), 4.5);
    assert_eq!(compute_real_hours_with(&records, MergeStrategy::Legacy), 4.5);
    assert_eq!(compute_real_hours_with(&records, MergeStrategy::FixedPoint), 4.0);

    let slots = merge_time_slots(&records, MergeStrategy::FixedPoint);
    assert_eq!(slots.len(), 1);
}

#[test]
fn test_total_is_rounded_to_two_decimals() {
    let records = vec![slot(3, "08:00", "08:20")];
    assert_eq!(compute_real_hours(&records), 0.33);
}

#[test]
fn test_works_on_activities() {
    let list = vec![
        activity(3, "08:00", "10:00", 2.0),
        activity(3, "09:30", "10:30", 1.0),
    ];
    assert_eq!(compute_real_hours(&list), 2.5);
}

#[test]
fn test_activity_query_range_wins_over_period() {
    let list = vec![
        activity(2, "08:00", "09:00", 1.0),
        activity(10, "08:00", "09:00", 1.0),
        activity(20, "08:00", "09:00", 1.0),
    ];

    let query = ActivityQuery {
        period: Period::Week,
        range: Some("2025-03-05:2025-03-31".into()),
        sort: SortDirection::Asc,
        ..Default::default()
    };
    let out = query.apply(list, d(2)).unwrap();
    let days: Vec<NaiveDate> = out.iter().map(|a| a.date).collect();
    assert_eq!(days, vec![d(10), d(20)]);
}
