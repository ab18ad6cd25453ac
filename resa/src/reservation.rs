//! Reservation record types and date/time parsing.
//!
//! This module provides the committed-reservation record types for both
//! resource kinds, the synthetic per-record identifier used for
//! cancellation, and the strict date/time parsers applied to caller input
//! before anything reaches the conflict checker.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::catalog::TableId;
use crate::error::{Error, Result};

/// Wire format for calendar dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for times of day (`HH:MM`, 24-hour, minute resolution).
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a calendar date from `YYYY-MM-DD` input.
///
/// # Errors
///
/// Returns [`Error::FormatError`] if the value does not parse as a valid
/// calendar date.
///
/// # Examples
///
/// ```
/// use resa::parse_date;
///
/// assert!(parse_date("2024-06-10").is_ok());
/// assert!(parse_date("10.06.2024").is_err());
/// assert!(parse_date("2024-02-30").is_err());
/// ```
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::FormatError {
        value: value.to_string(),
        reason: "expected a calendar date in YYYY-MM-DD form".to_string(),
    })
}

/// Parses a time of day from `HH:MM` input (24-hour clock).
///
/// # Errors
///
/// Returns [`Error::FormatError`] if the value does not parse as a valid
/// time, including out-of-range hours or minutes.
///
/// # Examples
///
/// ```
/// use resa::parse_time;
///
/// assert!(parse_time("09:30").is_ok());
/// assert!(parse_time("24:00").is_err());
/// assert!(parse_time("9am").is_err());
/// ```
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| Error::FormatError {
        value: value.to_string(),
        reason: "expected a time in HH:MM form (24-hour)".to_string(),
    })
}

/// Validates a free-text record field.
///
/// Fields are trimmed and must be non-empty. The persisted line format
/// uses an unescaped comma delimiter, so embedded commas are rejected at
/// the boundary rather than silently corrupting the store.
pub(crate) fn validated_field(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput {
            field: field.to_string(),
            reason: "must be non-empty".to_string(),
        });
    }
    if trimmed.contains(',') {
        return Err(Error::InvalidInput {
            field: field.to_string(),
            reason: "must not contain a comma".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// A synthetic unique identifier for a reservation record.
///
/// Identifiers are assigned by the [`ReservationStore`](crate::ReservationStore)
/// when a record is loaded or committed, and are never persisted: the line
/// format carries only the natural fields, and records are re-identified on
/// every load. Within one store instance an identifier is never reused, so
/// cancellation by id is unambiguous even when two records are otherwise
/// field-for-field identical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ReservationId(u64);

impl ReservationId {
    /// Placeholder id carried by candidate records before commit.
    pub(crate) const UNASSIGNED: Self = Self(0);

    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value of this identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for ReservationId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed (or candidate) book reservation.
///
/// A book is atomically exclusive for an entire calendar date: at most one
/// active `BookReservation` may exist per `(book_title, date)` pair,
/// regardless of the requesting user.
///
/// # Examples
///
/// ```
/// use resa::BookReservation;
///
/// let date = resa::parse_date("2024-06-10").unwrap();
/// let reservation = BookReservation::new("u100", "Dune", date).unwrap();
/// assert_eq!(reservation.book_title(), "Dune");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReservation {
    pub(crate) id: ReservationId,
    pub(crate) user_id: String,
    pub(crate) book_title: String,
    pub(crate) date: NaiveDate,
}

impl BookReservation {
    /// Creates a candidate book reservation.
    ///
    /// The record receives its [`ReservationId`] only when committed to a
    /// store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the user id or book title is
    /// empty after trimming, or contains a comma.
    pub fn new(
        user_id: impl AsRef<str>,
        book_title: impl AsRef<str>,
        date: NaiveDate,
    ) -> Result<Self> {
        Ok(Self {
            id: ReservationId::UNASSIGNED,
            user_id: validated_field("user id", user_id.as_ref())?,
            book_title: validated_field("book title", book_title.as_ref())?,
            date,
        })
    }

    /// Returns the synthetic record identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the id of the user who holds this reservation.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the title of the reserved book.
    #[must_use]
    pub fn book_title(&self) -> &str {
        &self.book_title
    }

    /// Returns the reserved date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for BookReservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "book '{}' on {} for {}",
            self.book_title,
            self.date.format(DATE_FORMAT),
            self.user_id
        )
    }
}

/// A committed (or candidate) table reservation.
///
/// Table reservations hold a half-open time slot `[start, end)` on one
/// calendar date; no two active reservations for the same `(table_id, date)`
/// may overlap.
///
/// # Examples
///
/// ```
/// use resa::{BookReservation, TableId, TableReservation};
///
/// let date = resa::parse_date("2024-06-10").unwrap();
/// let start = resa::parse_time("09:00").unwrap();
/// let end = resa::parse_time("10:00").unwrap();
/// let reservation = TableReservation::new("u100", TableId::from(1), date, start, end).unwrap();
/// assert_eq!(reservation.table_id(), TableId::from(1));
///
/// // Reversed or empty slots are rejected.
/// assert!(TableReservation::new("u100", TableId::from(1), date, end, start).is_err());
/// assert!(TableReservation::new("u100", TableId::from(1), date, start, start).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReservation {
    pub(crate) id: ReservationId,
    pub(crate) user_id: String,
    pub(crate) table_id: TableId,
    pub(crate) date: NaiveDate,
    pub(crate) start: NaiveTime,
    pub(crate) end: NaiveTime,
}

impl TableReservation {
    /// Creates a candidate table reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the user id is empty or contains
    /// a comma, and [`Error::FormatError`] unless `start` is strictly
    /// earlier than `end`.
    pub fn new(
        user_id: impl AsRef<str>,
        table_id: TableId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self> {
        if start >= end {
            return Err(Error::FormatError {
                value: format!("{}-{}", start.format(TIME_FORMAT), end.format(TIME_FORMAT)),
                reason: "start time must be strictly earlier than end time".to_string(),
            });
        }
        Ok(Self {
            id: ReservationId::UNASSIGNED,
            user_id: validated_field("user id", user_id.as_ref())?,
            table_id,
            date,
            start,
            end,
        })
    }

    /// Returns the synthetic record identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the id of the user who holds this reservation.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the id of the reserved table.
    #[must_use]
    pub const fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Returns the reserved date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the inclusive start of the reserved slot.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the exclusive end of the reserved slot.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }
}

impl fmt::Display for TableReservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table {} on {} {}-{} for {}",
            self.table_id,
            self.date.format(DATE_FORMAT),
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT),
            self.user_id
        )
    }
}
