#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("registro")
}

/// `registro --db <db> --test ...`: every test runs against its own database
/// with the default roster, ignoring the user's configuration file.
pub fn reg(db_path: &str) -> Command {
    let mut cmd = rti();
    cmd.args(["--db", db_path, "--test"]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_registro.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    reg(db_path).arg("init").assert().success();
}

/// Initialize DB and add a small class with one lesson and one activity:
///
/// - Pitagora 4A: Rossi (id 1), Bianchi (id 2), Verdi (id 3)
/// - lesson 2025-03-03 08:00-12:00 for Pitagora 4A (id 1)
/// - activity 2025-03-03 "Fractions" with the lesson times (id 1)
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    for name in ["Rossi Mario", "Bianchi Anna", "Verdi Luca"] {
        reg(db_path)
            .args(["student", "add", name, "--school", "Pitagora", "--class", "4A"])
            .assert()
            .success();
    }

    reg(db_path)
        .args([
            "lesson", "add", "--school", "Pitagora", "--class", "4A", "--date", "2025-03-03",
        ])
        .assert()
        .success();

    reg(db_path)
        .args([
            "activity",
            "add",
            "Fractions",
            "--school",
            "Pitagora",
            "--class",
            "4A",
            "--date",
            "2025-03-03",
        ])
        .assert()
        .success();
}

pub fn open(db_path: &str) -> rusqlite::Connection {
    rusqlite::Connection::open(db_path).expect("open db")
}
