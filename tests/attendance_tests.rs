use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, open, reg, setup_test_db};

fn register(db_path: &str) -> String {
    let out = reg(db_path)
        .args([
            "register", "--school", "Pitagora", "--class", "4A", "--date", "2025-03-03",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&out).to_string()
}

#[test]
fn test_register_defaults_to_present() {
    let db_path = setup_test_db("register_default_present");
    init_db_with_data(&db_path);

    let text = register(&db_path);
    assert!(text.contains("Present: 3 / 3"));
    assert!(text.contains("Lesson: 08:00 - 12:00"));
    assert!(text.contains("Activity: Fractions"));
    assert!(text.contains("to verify"));
    assert!(!text.contains("Day note"));

    reg(&db_path)
        .args(["day-note", "set", "Fire drill at 10", "--date", "2025-03-03"])
        .assert()
        .success();
    assert!(register(&db_path).contains("Day note: Fire drill at 10"));
}

#[test]
fn test_latest_mark_wins_and_keeps_notes() {
    let db_path = setup_test_db("register_latest_wins");
    init_db_with_data(&db_path);

    reg(&db_path)
        .args(["attend", "1", "--date", "2025-03-03", "--absent"])
        .assert()
        .success()
        .stdout(contains("marked absent"));

    reg(&db_path)
        .args(["note", "1", "late entry", "--date", "2025-03-03"])
        .assert()
        .success();

    let text = register(&db_path);
    assert!(text.contains("Present: 2 / 3"), "note keeps the absence");
    assert!(text.contains("late entry"));

    reg(&db_path)
        .args(["attend", "1", "--date", "2025-03-03", "--present"])
        .assert()
        .success();

    let text = register(&db_path);
    assert!(text.contains("Present: 3 / 3"));
    assert!(text.contains("late entry"), "marking keeps the note");

    let conn = open(&db_path);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM attendance WHERE student_id = 1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 3, "records are appended, never updated in place");
}

#[test]
fn test_latest_mark_wins_across_clock_change() {
    let db_path = setup_test_db("register_clock_change");
    init_db_with_data(&db_path);

    reg(&db_path)
        .args(["attend", "2", "--date", "2025-03-03", "--absent"])
        .assert()
        .success();
    reg(&db_path)
        .args(["attend", "2", "--date", "2025-03-03", "--present"])
        .assert()
        .success();

    // Fall-back hour: the second mark carries a timestamp that sorts first.
    let conn = open(&db_path);
    conn.execute(
        "UPDATE attendance SET timestamp = '2025-10-26T02:40:00+02:00' WHERE student_id = 2 AND present = 0",
        [],
    )
    .unwrap();
    conn.execute(
        "UPDATE attendance SET timestamp = '2025-10-26T02:10:00+01:00' WHERE student_id = 2 AND present = 1",
        [],
    )
    .unwrap();
    drop(conn);

    assert!(register(&db_path).contains("Present: 3 / 3"));
}

#[test]
fn test_attend_unknown_student_fails() {
    let db_path = setup_test_db("attend_unknown_student");
    init_db_with_data(&db_path);

    reg(&db_path)
        .args(["attend", "99", "--date", "2025-03-03"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_verify_updates_lesson_attendance_and_history() {
    let db_path = setup_test_db("verify_lesson");
    init_db_with_data(&db_path);

    reg(&db_path)
        .args(["attend", "3", "--date", "2025-03-03", "--absent"])
        .assert()
        .success();

    reg(&db_path)
        .args([
            "verify", "--school", "Pitagora", "--class", "4A", "--date", "2025-03-03", "--by",
            "prof. Neri",
        ])
        .assert()
        .success()
        .stdout(contains("Attendance verified"));

    assert!(register(&db_path).contains("verified"));

    let conn = open(&db_path);
    let (flag, by): (i64, Option<String>) = conn
        .query_row(
            "SELECT attendance_verified, verified_by FROM lessons WHERE id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(flag, 1);
    assert_eq!(by.as_deref(), Some("prof. Neri"));

    let unverified: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM attendance WHERE date = '2025-03-03' AND verified = 0",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(unverified, 0);

    reg(&db_path)
        .args([
            "verify", "--school", "Pitagora", "--class", "4A", "--date", "2025-03-03", "--undo",
        ])
        .assert()
        .success()
        .stdout(contains("Verification removed"));

    let history: i64 = conn
        .query_row("SELECT COUNT(*) FROM verifications WHERE lesson_id = 1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(history, 2);

    let at: Option<String> = conn
        .query_row(
            "SELECT verified_at FROM attendance WHERE student_id = 3 ORDER BY id DESC LIMIT 1",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(at.is_none(), "un-verifying clears the attendance timestamp");
}

#[test]
fn test_verify_without_lesson_fails() {
    let db_path = setup_test_db("verify_no_lesson");
    init_db_with_data(&db_path);

    reg(&db_path)
        .args([
            "verify", "--school", "Pitagora", "--class", "4A", "--date", "2025-03-04",
        ])
        .assert()
        .failure()
        .stderr(contains("no lesson").and(contains("2025-03-04")));
}
