//! The line-oriented record format.
//!
//! Every persisted entity serializes to one comma-separated line with a
//! fixed field order and no escaping; commas are rejected at the input
//! boundary instead. Dates are `YYYY-MM-DD`, times `HH:MM`. Reservation
//! ids are deliberately absent from the wire format; the store reassigns
//! them on every load.

use crate::catalog::{Book, Table, TableId};
use crate::identity::User;
use crate::reservation::{
    parse_date, parse_time, BookReservation, TableReservation, DATE_FORMAT, TIME_FORMAT,
};

/// An entity with a one-line wire representation.
///
/// `parse` reports failures as a plain reason string; the storage layer
/// wraps them with the file and line number into
/// [`Error::CorruptRecord`](crate::Error::CorruptRecord).
pub trait Record: Clone + Send + Sync + 'static {
    /// The data-file name this record kind lives in.
    const FILE_NAME: &'static str;

    /// Serializes the record to its line form, without the newline.
    fn to_line(&self) -> String;

    /// Parses a record from one line.
    ///
    /// # Errors
    ///
    /// Returns a reason string when the line has the wrong field count or
    /// a field fails to parse.
    fn parse(line: &str) -> std::result::Result<Self, String>
    where
        Self: Sized;
}

fn split_fields(line: &str, expected: usize) -> std::result::Result<Vec<&str>, String> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() == expected {
        Ok(fields)
    } else {
        Err(format!(
            "expected {expected} fields, found {}",
            fields.len()
        ))
    }
}

impl Record for User {
    const FILE_NAME: &'static str = "users.txt";

    fn to_line(&self) -> String {
        format!("{},{}", self.user_id, self.password)
    }

    fn parse(line: &str) -> std::result::Result<Self, String> {
        let fields = split_fields(line, 2)?;
        if fields[0].trim().is_empty() {
            return Err("empty user id".to_string());
        }
        Ok(Self::from_parts(
            fields[0].trim().to_string(),
            fields[1].trim().to_string(),
        ))
    }
}

impl Record for Book {
    const FILE_NAME: &'static str = "books.txt";

    fn to_line(&self) -> String {
        format!("{},{}", self.title, self.author)
    }

    fn parse(line: &str) -> std::result::Result<Self, String> {
        let fields = split_fields(line, 2)?;
        Self::new(fields[0], fields[1]).map_err(|e| e.to_string())
    }
}

impl Record for Table {
    const FILE_NAME: &'static str = "tables.txt";

    fn to_line(&self) -> String {
        format!("{},{}", self.id, self.capacity)
    }

    fn parse(line: &str) -> std::result::Result<Self, String> {
        let fields = split_fields(line, 2)?;
        let id: u32 = fields[0]
            .trim()
            .parse()
            .map_err(|_| format!("invalid table id '{}'", fields[0]))?;
        let capacity: u32 = fields[1]
            .trim()
            .parse()
            .map_err(|_| format!("invalid capacity '{}'", fields[1]))?;
        if capacity == 0 {
            return Err("capacity must be a positive integer".to_string());
        }
        Ok(Self::from_parts(TableId::from(id), capacity))
    }
}

impl Record for BookReservation {
    const FILE_NAME: &'static str = "book_reservations.txt";

    fn to_line(&self) -> String {
        format!(
            "{},{},{}",
            self.user_id,
            self.book_title,
            self.date.format(DATE_FORMAT)
        )
    }

    fn parse(line: &str) -> std::result::Result<Self, String> {
        let fields = split_fields(line, 3)?;
        let date = parse_date(fields[2]).map_err(|e| e.to_string())?;
        Self::new(fields[0], fields[1], date).map_err(|e| e.to_string())
    }
}

impl Record for TableReservation {
    const FILE_NAME: &'static str = "table_reservations.txt";

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.user_id,
            self.table_id,
            self.date.format(DATE_FORMAT),
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }

    fn parse(line: &str) -> std::result::Result<Self, String> {
        let fields = split_fields(line, 5)?;
        let table_id: u32 = fields[1]
            .trim()
            .parse()
            .map_err(|_| format!("invalid table id '{}'", fields[1]))?;
        let date = parse_date(fields[2]).map_err(|e| e.to_string())?;
        let start = parse_time(fields[3]).map_err(|e| e.to_string())?;
        let end = parse_time(fields[4]).map_err(|e| e.to_string())?;
        Self::new(fields[0], TableId::from(table_id), date, start, end).map_err(|e| e.to_string())
    }
}
