use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, init_db_with_data, open, reg, setup_test_db, temp_out};

#[test]
fn test_student_add_and_list_sorted() {
    let db_path = setup_test_db("student_add_list");
    init_db(&db_path);

    for name in ["zeta Paolo", "Abate Carla", "  Moro Ugo  "] {
        reg(&db_path)
            .args(["student", "add", name, "--school", "Falcone", "--class", "4AX"])
            .assert()
            .success();
    }

    let out = reg(&db_path)
        .args(["student", "list", "--school", "Falcone"])
        .assert()
        .success()
        .stdout(contains("3 student(s)"))
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);

    let abate = text.find("Abate Carla").expect("Abate listed");
    let moro = text.find("Moro Ugo").expect("name trimmed");
    let zeta = text.find("zeta Paolo").expect("zeta listed");
    assert!(abate < moro && moro < zeta, "names sorted case-insensitively");
}

#[test]
fn test_student_add_rejects_unknown_class() {
    let db_path = setup_test_db("student_bad_class");
    init_db(&db_path);

    reg(&db_path)
        .args(["student", "add", "Rossi", "--school", "Falcone", "--class", "4C"])
        .assert()
        .failure()
        .stderr(contains("Unknown class"));

    reg(&db_path)
        .args(["student", "add", "   ", "--school", "Falcone", "--class", "4AX"])
        .assert()
        .failure()
        .stderr(contains("cannot be empty"));
}

#[test]
fn test_student_rename_and_delete() {
    let db_path = setup_test_db("student_rename_delete");
    init_db_with_data(&db_path);

    reg(&db_path)
        .args(["student", "rename", "1", "Rossi Maria"])
        .assert()
        .success()
        .stdout(contains("Rossi Maria"));

    reg(&db_path)
        .args(["attend", "2", "--date", "2025-03-03", "--absent"])
        .assert()
        .success();

    reg(&db_path)
        .args(["student", "del", "2", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted Bianchi Anna"));

    let conn = open(&db_path);
    let left: i64 = conn
        .query_row("SELECT COUNT(*) FROM attendance WHERE student_id = 2", [], |r| r.get(0))
        .unwrap();
    assert_eq!(left, 0, "attendance of a deleted student is removed");

    reg(&db_path)
        .args(["student", "list"])
        .assert()
        .success()
        .stdout(contains("Bianchi").not());
}

#[test]
fn test_student_import_plain_and_refused_twice() {
    let db_path = setup_test_db("student_import");
    init_db(&db_path);

    let file = temp_out("student_import_names", "txt");
    fs::write(&file, "Neri Franco\n\nGallo Sara\nLupo Enzo\n").unwrap();

    reg(&db_path)
        .args(["student", "import", &file, "--school", "Pitagora", "--class", "4C"])
        .assert()
        .success()
        .stdout(contains("3 students imported"));

    reg(&db_path)
        .args(["student", "import", &file, "--school", "Pitagora", "--class", "4C"])
        .assert()
        .failure()
        .stderr(contains("already has students"));
}

#[test]
fn test_student_import_csv_with_name_column() {
    let db_path = setup_test_db("student_import_csv");
    init_db(&db_path);

    let file = temp_out("student_import_names", "csv");
    fs::write(&file, "id;name;email\n1;Costa Elena;e@x.it\n2;Fabbri Ivo;i@x.it\n").unwrap();

    reg(&db_path)
        .args(["student", "import", &file, "--school", "Falcone", "--class", "4BX"])
        .assert()
        .success()
        .stdout(contains("2 students imported"));

    reg(&db_path)
        .args(["student", "list", "--school", "Falcone", "--class", "4BX"])
        .assert()
        .success()
        .stdout(contains("Costa Elena").and(contains("Fabbri Ivo")));
}
