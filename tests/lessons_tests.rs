use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, open, reg, setup_test_db};

#[test]
fn test_lesson_add_for_several_classes() {
    let db_path = setup_test_db("lesson_add_classes");
    init_db(&db_path);

    reg(&db_path)
        .args([
            "lesson", "add", "--school", "Pitagora", "--class", "4A", "--class", "4C", "--date",
            "2025-03-04", "--start", "9:00", "--end", "10:30",
        ])
        .assert()
        .success()
        .stdout(contains("Lesson 1 added").and(contains("Lesson 2 added")));

    let conn = open(&db_path);
    let (start, hours): (String, f64) = conn
        .query_row("SELECT start_time, hours FROM lessons WHERE id = 2", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(start, "09:00", "times are stored zero-padded");
    assert_eq!(hours, 1.5, "stored hours are exact");
}

#[test]
fn test_lesson_without_class_is_school_wide() {
    let db_path = setup_test_db("lesson_school_wide");
    init_db(&db_path);

    reg(&db_path)
        .args(["lesson", "add", "--school", "Falcone", "--date", "2025-03-05"])
        .assert()
        .success()
        .stdout(contains("(whole school)"));

    let conn = open(&db_path);
    let (class, start, end): (String, String, String) = conn
        .query_row("SELECT class, start_time, end_time FROM lessons", [], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?))
        })
        .unwrap();
    assert_eq!(class, "");
    assert_eq!((start.as_str(), end.as_str()), ("08:00", "12:00"));
}

#[test]
fn test_lesson_rejects_inverted_times() {
    let db_path = setup_test_db("lesson_inverted");
    init_db(&db_path);

    reg(&db_path)
        .args([
            "lesson", "add", "--school", "Pitagora", "--class", "4A", "--start", "11:00", "--end",
            "10:00",
        ])
        .assert()
        .failure()
        .stderr(contains("must be after"));
}

#[test]
fn test_lesson_month_totals_count_completed_only() {
    let db_path = setup_test_db("lesson_month_totals");
    init_db(&db_path);

    // 08:00-09:30 and 09:00-10:15 overlap: real 2.25h, stored 1.5 + 1.25
    for (date, start, end) in [
        ("2025-03-10", "08:00", "09:30"),
        ("2025-03-10", "09:00", "10:15"),
        ("2025-03-11", "08:00", "12:00"),
    ] {
        reg(&db_path)
            .args([
                "lesson", "add", "--school", "Pitagora", "--class", "4A", "--date", date,
                "--start", start, "--end", end,
            ])
            .assert()
            .success();
    }

    reg(&db_path)
        .args(["lesson", "complete", "1"])
        .assert()
        .success()
        .stdout(contains("marked completed"));
    reg(&db_path).args(["lesson", "complete", "2"]).assert().success();

    reg(&db_path)
        .args(["lesson", "list", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(
            contains("Real hours (completed): 2.25h")
                .and(contains("Billed hours (completed): 3h"))
                .and(contains("to verify")),
        );

    reg(&db_path)
        .args(["lesson", "complete", "2"])
        .assert()
        .success()
        .stdout(contains("not completed"));
}

#[test]
fn test_lesson_edit_recomputes_hours_unless_manual() {
    let db_path = setup_test_db("lesson_edit_hours");
    init_db(&db_path);

    reg(&db_path)
        .args(["lesson", "add", "--school", "Pitagora", "--class", "4A", "--date", "2025-03-12"])
        .assert()
        .success();

    reg(&db_path)
        .args(["lesson", "edit", "1", "--end", "10:00"])
        .assert()
        .success()
        .stdout(contains("2h"));

    reg(&db_path)
        .args(["lesson", "edit", "1", "--hours", "3"])
        .assert()
        .success()
        .stdout(contains("3h"));

    reg(&db_path)
        .args(["lesson", "del", "1", "--yes"])
        .assert()
        .success();

    reg(&db_path)
        .args(["lesson", "complete", "1"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}
