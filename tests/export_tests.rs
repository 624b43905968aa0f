use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, init_db_with_data, reg, setup_test_db, temp_out};

fn export(db_path: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    reg(db_path).arg("export").args(args).assert()
}

#[test]
fn test_export_register_csv() {
    let db_path = setup_test_db("export_register_csv");
    init_db_with_data(&db_path);

    reg(&db_path)
        .args(["attend", "2", "--date", "2025-03-03", "--absent"])
        .assert()
        .success();

    let out = temp_out("export_register_csv", "csv");
    export(
        &db_path,
        &[
            "--kind", "register", "--format", "csv", "--file", &out, "--school", "Pitagora",
            "--class", "4A", "--date", "2025-03-03",
        ],
    )
    .success()
    .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("#,Student,Status,Notes"));
    assert!(content.contains("Bianchi Anna,absent"));
    assert!(content.contains("Present: 2 / 3"));
    assert!(content.contains("Activity: Fractions (08:00 - 12:00)"));
}

#[test]
fn test_export_register_needs_school_and_class() {
    let db_path = setup_test_db("export_register_missing_class");
    init_db_with_data(&db_path);

    let out = temp_out("export_register_missing_class", "pdf");
    export(&db_path, &["--kind", "register", "--format", "pdf", "--file", &out])
        .failure()
        .stderr(contains("--school and --class are required"));
}

#[test]
fn test_export_activities_json_with_total() {
    let db_path = setup_test_db("export_activities_json");
    init_db_with_data(&db_path);

    reg(&db_path)
        .args([
            "activity", "add", "Geometry", "--school", "Falcone", "--class", "4AX", "--date",
            "2025-03-03", "--start", "08:00", "--end", "10:00",
        ])
        .assert()
        .success();

    let out = temp_out("export_activities_json", "json");
    export(
        &db_path,
        &["--kind", "activities", "--format", "json", "--file", &out, "--range", "2025-03"],
    )
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let v: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = v["rows"].as_array().expect("rows array");

    assert_eq!(rows.len(), 3);
    // same day: more hours first
    assert_eq!(rows[0]["Description"], "Fractions");
    assert_eq!(rows[1]["School"], "Falcone");
    assert_eq!(rows[2]["Date"], "TOTAL");
    assert_eq!(rows[2]["Hours"], "6.00");
}

#[test]
fn test_export_lessons_xlsx_and_pdf() {
    let db_path = setup_test_db("export_lessons_files");
    init_db_with_data(&db_path);

    reg(&db_path)
        .args(["day-note", "set", "School trip", "--date", "2025-03-07"])
        .assert()
        .success();

    for ext in ["xlsx", "pdf"] {
        let out = temp_out("export_lessons_files", ext);
        export(
            &db_path,
            &[
                "--kind", "lessons", "--format", ext, "--file", &out, "--month", "2025-03",
                "--notes",
            ],
        )
        .success();

        let bytes = fs::read(&out).expect("read exported file");
        assert!(!bytes.is_empty());
        if ext == "pdf" {
            assert!(bytes.starts_with(b"%PDF"));
        } else {
            assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
        }
    }
}

#[test]
fn test_export_registers_only_verified() {
    let db_path = setup_test_db("export_registers");
    init_db_with_data(&db_path);

    let out = temp_out("export_registers", "json");
    export(&db_path, &["--kind", "registers", "--format", "json", "--file", &out])
        .success()
        .stdout(contains("No data found"));
    assert!(fs::metadata(&out).is_err(), "nothing written without verified lessons");

    reg(&db_path)
        .args([
            "verify", "--school", "Pitagora", "--class", "4A", "--date", "2025-03-03",
        ])
        .assert()
        .success();

    export(&db_path, &["--kind", "registers", "--format", "json", "--file", &out]).success();
    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("Rossi Mario"));
    assert!(content.contains("Attendance verified: yes"));
}

#[test]
fn test_export_database_json_and_csv_refused() {
    let db_path = setup_test_db("export_database");
    init_db_with_data(&db_path);

    let out = temp_out("export_database", "json");
    export(&db_path, &["--kind", "database", "--format", "json", "--file", &out]).success();

    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).expect("valid json");
    assert_eq!(v["students"].as_array().map(Vec::len), Some(3));
    assert_eq!(v["lessons"][0]["school"], "Pitagora");
    assert!(v["log"].as_array().is_some_and(|l| !l.is_empty()));

    let out = temp_out("export_database", "csv");
    export(&db_path, &["--kind", "database", "--format", "csv", "--file", &out])
        .failure()
        .stderr(contains("not supported"));
}

#[test]
fn test_export_rejects_relative_path_and_keeps_existing_file() {
    let db_path = setup_test_db("export_paths");
    init_db_with_data(&db_path);

    export(
        &db_path,
        &["--kind", "activities", "--format", "csv", "--file", "relative.csv"],
    )
    .failure()
    .stderr(contains("must be absolute"));

    let out = temp_out("export_paths", "csv");
    fs::write(&out, "keep me").unwrap();

    reg(&db_path)
        .args([
            "export", "--kind", "activities", "--format", "csv", "--file", &out, "--period", "all",
        ])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    export(
        &db_path,
        &[
            "--kind", "activities", "--format", "csv", "--file", &out, "--period", "all", "--force",
        ],
    )
    .success();
    assert!(fs::read_to_string(&out).unwrap().contains("Fractions"));
}

#[test]
fn test_export_empty_activities_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    init_db(&db_path);

    let out = temp_out("export_empty", "xlsx");
    export(&db_path, &["--kind", "activities", "--format", "xlsx", "--file", &out])
        .success()
        .stdout(contains("No data found").and(contains("XLSX export completed").not()));
    assert!(fs::metadata(&out).is_err());
}
