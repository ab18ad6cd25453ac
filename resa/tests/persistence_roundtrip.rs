//! Persistence behavior of the file-backed engine: round-trips, reopen
//! consistency, wire format, and corrupt-record reporting.

mod common;

use std::fs;

use chrono::Days;
use resa::{Book, Error, FileStorage, Storage, TableId};

fn in_window_date(days_ahead: u64) -> String {
    chrono::Local::now()
        .date_naive()
        .checked_add_days(Days::new(days_ahead))
        .expect("date arithmetic")
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn save_load_round_trip_preserves_records_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let storage: FileStorage<Book> = FileStorage::new(dir.path());

    let books = vec![
        Book::new("Dune", "Frank Herbert").unwrap(),
        Book::new("Solaris", "Stanislaw Lem").unwrap(),
        Book::new("Hyperion", "Dan Simmons").unwrap(),
    ];
    storage.save(&books).unwrap();
    assert_eq!(storage.load().unwrap(), books);

    // Saving the loaded collection reproduces the file byte for byte.
    let first = fs::read_to_string(storage.path()).unwrap();
    storage.save(&storage.load().unwrap()).unwrap();
    let second = fs::read_to_string(storage.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn engine_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let date = in_window_date(1);

    {
        let engine = common::file_engine(dir.path());
        engine.register("u100", "secret").unwrap();
        engine.add_book("Dune", "Frank Herbert").unwrap();
        engine.add_table(4).unwrap();

        let session = engine.login("u100", "secret").unwrap();
        engine.reserve_book(&session, "Dune", &date).unwrap();
        engine
            .reserve_table(&session, TableId::from(1), &date, "10:00", "12:00")
            .unwrap();
    }

    let engine = common::file_engine(dir.path());
    let session = engine.login("u100", "secret").unwrap();
    assert_eq!(engine.list_books().len(), 1);
    assert_eq!(engine.list_tables().len(), 1);

    let (books, tables) = engine.list_reservations(&session);
    assert_eq!(books.len(), 1);
    assert_eq!(tables.len(), 1);

    // Conflicts are still enforced against the reloaded records.
    let other = {
        engine.register("u200", "secret").unwrap();
        engine.login("u200", "secret").unwrap()
    };
    assert!(engine.reserve_book(&other, "Dune", &date).unwrap_err().is_conflict());
    assert!(engine
        .reserve_table(&other, TableId::from(1), &date, "11:00", "13:00")
        .unwrap_err()
        .is_conflict());
}

#[test]
fn reloaded_reservations_can_be_cancelled_by_fresh_id() {
    let dir = tempfile::tempdir().unwrap();
    let date = in_window_date(2);

    {
        let engine = common::file_engine(dir.path());
        engine.register("u100", "secret").unwrap();
        engine.add_book("Dune", "Frank Herbert").unwrap();
        let session = engine.login("u100", "secret").unwrap();
        engine.reserve_book(&session, "Dune", &date).unwrap();
    }

    // Ids are reassigned on load; the listed id is the one to cancel by.
    let engine = common::file_engine(dir.path());
    let session = engine.login("u100", "secret").unwrap();
    let (books, _) = engine.list_reservations(&session);
    assert!(engine.cancel_book(&session, books[0].id()).unwrap());

    let (books, _) = engine.list_reservations(&session);
    assert!(books.is_empty());
}

#[test]
fn wire_format_matches_expected_lines() {
    let dir = tempfile::tempdir().unwrap();
    let date = in_window_date(1);

    let engine = common::file_engine(dir.path());
    engine.register("u100", "secret").unwrap();
    engine.add_book("Dune", "Frank Herbert").unwrap();
    engine.add_table(4).unwrap();
    let session = engine.login("u100", "secret").unwrap();
    engine.reserve_book(&session, "Dune", &date).unwrap();
    engine
        .reserve_table(&session, TableId::from(1), &date, "09:00", "10:30")
        .unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("users.txt")).unwrap(),
        "u100,secret\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("books.txt")).unwrap(),
        "Dune,Frank Herbert\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("tables.txt")).unwrap(),
        "1,4\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("book_reservations.txt")).unwrap(),
        format!("u100,Dune,{date}\n")
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("table_reservations.txt")).unwrap(),
        format!("u100,1,{date},09:00,10:30\n")
    );
}

#[test]
fn no_temp_files_left_after_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let engine = common::file_engine(dir.path());
    engine.register("u100", "secret").unwrap();
    engine.add_book("Dune", "Frank Herbert").unwrap();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn corrupt_reservation_line_is_reported_with_location() {
    let dir = tempfile::tempdir().unwrap();
    {
        let engine = common::file_engine(dir.path());
        engine.add_book("Dune", "Frank Herbert").unwrap();
    }
    fs::write(
        dir.path().join("book_reservations.txt"),
        "u100,Dune,2024-06-10\nu200,Dune,not-a-date\n",
    )
    .unwrap();

    let config = resa::Config::builder()
        .skip_env()
        .data_dir(dir.path())
        .build()
        .unwrap();
    let Err(err) = resa::Engine::open(&config) else {
        panic!("corrupt record file must fail to load");
    };
    match err {
        Error::CorruptRecord { line, file, .. } => {
            assert_eq!(line, 2);
            assert!(file.ends_with("book_reservations.txt"));
        }
        other => panic!("expected CorruptRecord, got {other}"),
    }
}

#[test]
fn rejected_request_performs_no_write() {
    let dir = tempfile::tempdir().unwrap();
    let date = in_window_date(1);

    let engine = common::file_engine(dir.path());
    engine.register("u100", "secret").unwrap();
    engine.register("u200", "secret").unwrap();
    engine.add_book("Dune", "Frank Herbert").unwrap();
    let alice = engine.login("u100", "secret").unwrap();
    let bob = engine.login("u200", "secret").unwrap();
    engine.reserve_book(&alice, "Dune", &date).unwrap();

    let before = fs::read_to_string(dir.path().join("book_reservations.txt")).unwrap();
    assert!(engine.reserve_book(&bob, "Dune", &date).is_err());
    let after = fs::read_to_string(dir.path().join("book_reservations.txt")).unwrap();
    assert_eq!(before, after);
}
