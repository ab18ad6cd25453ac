//! End-to-end tests for the resa binary.

use std::path::Path;

use assert_cmd::Command;
use chrono::Days;
use predicates::prelude::*;

fn resa(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("resa").expect("binary built");
    cmd.arg("--data-dir").arg(data_dir);
    for var in [
        "RESA_DATA_DIR",
        "RESA_USER",
        "RESA_PASSWORD",
        "RESA_ADMIN_USER",
        "RESA_ADMIN_PASSWORD",
        "RESA_HORIZON_DAYS",
        "RESA_LOG_MODE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn tomorrow() -> String {
    chrono::Local::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .expect("date arithmetic")
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn init_creates_data_files() {
    let dir = tempfile::tempdir().unwrap();
    resa(dir.path()).arg("init").assert().success();

    for name in [
        "users.txt",
        "books.txt",
        "tables.txt",
        "book_reservations.txt",
        "table_reservations.txt",
    ] {
        assert!(dir.path().join(name).exists(), "{name} should exist");
    }
}

#[test]
fn register_and_duplicate_rejection() {
    let dir = tempfile::tempdir().unwrap();
    resa(dir.path())
        .args(["register", "u100", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("u100"));

    resa(dir.path())
        .args(["register", "u100", "other"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn catalog_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    resa(dir.path())
        .args(["add-book", "Dune", "Frank Herbert"])
        .assert()
        .success();
    resa(dir.path()).args(["add-table", "4"]).assert().success();

    resa(dir.path())
        .arg("list-books")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune (Frank Herbert)"));
    resa(dir.path())
        .arg("list-tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("table 1 (capacity 4)"));
}

#[test]
fn list_books_json_output() {
    let dir = tempfile::tempdir().unwrap();
    resa(dir.path())
        .args(["add-book", "Dune", "Frank Herbert"])
        .assert()
        .success();

    let output = resa(dir.path())
        .args(["list-books", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["title"], "Dune");
    assert_eq!(parsed[0]["author"], "Frank Herbert");
}

#[test]
fn reserve_book_conflict_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let date = tomorrow();
    resa(dir.path())
        .args(["add-book", "Dune", "Frank Herbert"])
        .assert()
        .success();
    resa(dir.path())
        .args(["register", "u100", "secret"])
        .assert()
        .success();
    resa(dir.path())
        .args(["register", "u200", "secret"])
        .assert()
        .success();

    resa(dir.path())
        .args(["--user", "u100", "--password", "secret", "reserve-book", "Dune", &date])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reserved"));

    resa(dir.path())
        .args(["--user", "u200", "--password", "secret", "reserve-book", "Dune", &date])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("conflict"));
}

#[test]
fn malformed_date_exits_four() {
    let dir = tempfile::tempdir().unwrap();
    resa(dir.path())
        .args(["add-book", "Dune", "Frank Herbert"])
        .assert()
        .success();
    resa(dir.path())
        .args(["register", "u100", "secret"])
        .assert()
        .success();

    resa(dir.path())
        .args(["--user", "u100", "--password", "secret", "reserve-book", "Dune", "junk"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn missing_credentials_exit_four() {
    let dir = tempfile::tempdir().unwrap();
    resa(dir.path())
        .args(["reserve-book", "Dune", "2024-06-10"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("--user"));
}

#[test]
fn wrong_password_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    resa(dir.path())
        .args(["register", "u100", "secret"])
        .assert()
        .success();

    resa(dir.path())
        .args(["--user", "u100", "--password", "wrong", "list-reservations"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid credentials"));
}

#[test]
fn reserve_table_cancel_and_rereserve() {
    let dir = tempfile::tempdir().unwrap();
    let date = tomorrow();
    resa(dir.path()).args(["add-table", "4"]).assert().success();
    resa(dir.path())
        .args(["register", "u100", "secret"])
        .assert()
        .success();

    let creds = ["--user", "u100", "--password", "secret"];
    resa(dir.path())
        .args(creds)
        .args(["reserve-table", "1", &date, "10:00", "12:00"])
        .assert()
        .success();

    // Overlap rejected, back-to-back accepted.
    resa(dir.path())
        .args(creds)
        .args(["reserve-table", "1", &date, "11:00", "13:00"])
        .assert()
        .failure()
        .code(1);
    resa(dir.path())
        .args(creds)
        .args(["reserve-table", "1", &date, "12:00", "14:00"])
        .assert()
        .success();

    // Ids are reassigned per process in load order; the first record is 1.
    resa(dir.path())
        .args(creds)
        .args(["cancel", "table", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
    resa(dir.path())
        .args(creds)
        .args(["reserve-table", "1", &date, "10:00", "12:00"])
        .assert()
        .success();
}

#[test]
fn delete_book_requires_admin() {
    let dir = tempfile::tempdir().unwrap();
    resa(dir.path())
        .args(["add-book", "Dune", "Frank Herbert"])
        .assert()
        .success();
    resa(dir.path())
        .args(["register", "u100", "secret"])
        .assert()
        .success();

    resa(dir.path())
        .args(["--user", "u100", "--password", "secret", "delete-book", "Dune"])
        .assert()
        .failure()
        .code(1);

    resa(dir.path())
        .args(["--user", "admin", "--password", "admin123", "delete-book", "Dune"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted book 'Dune'"));
}

#[test]
fn admin_sees_all_reservations() {
    let dir = tempfile::tempdir().unwrap();
    let date = tomorrow();
    resa(dir.path())
        .args(["add-book", "Dune", "Frank Herbert"])
        .assert()
        .success();
    resa(dir.path())
        .args(["add-book", "Solaris", "Stanislaw Lem"])
        .assert()
        .success();
    for user in ["u100", "u200"] {
        resa(dir.path())
            .args(["register", user, "secret"])
            .assert()
            .success();
    }
    resa(dir.path())
        .args(["--user", "u100", "--password", "secret", "reserve-book", "Dune", &date])
        .assert()
        .success();
    resa(dir.path())
        .args(["--user", "u200", "--password", "secret", "reserve-book", "Solaris", &date])
        .assert()
        .success();

    // A member sees only their own record.
    resa(dir.path())
        .args(["--user", "u100", "--password", "secret", "list-reservations"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune").and(predicate::str::contains("Solaris").not()));

    resa(dir.path())
        .args(["--user", "admin", "--password", "admin123", "list-reservations"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune").and(predicate::str::contains("Solaris")));
}
