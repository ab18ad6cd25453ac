//! Conflict detection for book and table reservations.
//!
//! Books are exclusive per calendar date; tables are exclusive per
//! half-open time slot on a date. These predicates are pure functions over
//! reservation snapshots, so the engine can run them both as a cheap
//! pre-check and again under the store's write lock at commit time.

use chrono::{NaiveDate, NaiveTime};

use crate::catalog::TableId;
use crate::reservation::{BookReservation, TableReservation};

/// Returns true if two half-open time slots `[a_start, a_end)` and
/// `[b_start, b_end)` overlap.
///
/// Slots that merely touch (one ends exactly when the other starts) do
/// not overlap.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use resa::slots_overlap;
///
/// let t = |s| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
///
/// assert!(slots_overlap(t("10:00"), t("12:00"), t("11:00"), t("13:00")));
/// // Back-to-back slots are fine.
/// assert!(!slots_overlap(t("10:00"), t("12:00"), t("12:00"), t("14:00")));
/// ```
#[must_use]
pub fn slots_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Returns the existing reservation that blocks reserving `title` on
/// `date`, if any.
///
/// A book is blocked by any reservation for the same title on the same
/// date, regardless of who holds it.
#[must_use]
pub fn book_conflict<'a>(
    existing: &'a [BookReservation],
    title: &str,
    date: NaiveDate,
) -> Option<&'a BookReservation> {
    existing
        .iter()
        .find(|r| r.book_title() == title && r.date() == date)
}

/// Returns the existing reservation that blocks reserving `table` for
/// `[start, end)` on `date`, if any.
///
/// Only reservations for the same table on the same date are considered;
/// among those, any half-open overlap blocks.
#[must_use]
pub fn table_conflict<'a>(
    existing: &'a [TableReservation],
    table: TableId,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> Option<&'a TableReservation> {
    existing.iter().find(|r| {
        r.table_id() == table
            && r.date() == date
            && slots_overlap(r.start(), r.end(), start, end)
    })
}
