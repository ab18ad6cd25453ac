//! Reservation request planning.
//!
//! A request moves through a fixed pipeline: field and format validation,
//! the booking-window check, the catalog identity check, and a conflict
//! pre-check against a store snapshot. The first failing stage is
//! terminal and maps to one error class; only a request that clears every
//! stage yields a plan with a create action. The pre-check is advisory:
//! the authoritative conflict check runs again at commit time under the
//! store's write lock.

use chrono::{Days, NaiveDate};

use crate::catalog::{Catalog, TableId};
use crate::conflict::{book_conflict, table_conflict};
use crate::error::{Error, Result};
use crate::identity::Session;
use crate::reservation::{
    parse_date, parse_time, BookReservation, TableReservation, DATE_FORMAT,
};
use crate::store::ReservationStore;

use super::plan::{OperationPlan, PlanAction};

/// A request to reserve a book for one calendar date.
#[derive(Debug, Clone)]
pub struct ReserveBookRequest {
    /// The authenticated requester.
    pub session: Session,
    /// Title of the book to reserve.
    pub book_title: String,
    /// Requested date, `YYYY-MM-DD`.
    pub date: String,
}

impl ReserveBookRequest {
    /// Creates a book reservation request.
    #[must_use]
    pub fn new(session: Session, book_title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            session,
            book_title: book_title.into(),
            date: date.into(),
        }
    }
}

/// A request to reserve a table for a half-open time slot on one date.
#[derive(Debug, Clone)]
pub struct ReserveTableRequest {
    /// The authenticated requester.
    pub session: Session,
    /// Identity of the table to reserve.
    pub table_id: TableId,
    /// Requested date, `YYYY-MM-DD`.
    pub date: String,
    /// Inclusive slot start, `HH:MM`.
    pub start: String,
    /// Exclusive slot end, `HH:MM`.
    pub end: String,
}

impl ReserveTableRequest {
    /// Creates a table reservation request.
    #[must_use]
    pub fn new(
        session: Session,
        table_id: TableId,
        date: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            session,
            table_id,
            date: date.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Plans reservation requests against a booking window anchored at an
/// explicit `today`.
///
/// The anchor is injectable so tests can pin the window to a fixed date;
/// production callers use [`ReservePlan::for_today`].
#[derive(Debug, Clone, Copy)]
pub struct ReservePlan {
    today: NaiveDate,
    horizon_days: u32,
}

impl ReservePlan {
    /// Creates a planner with an explicit window anchor.
    #[must_use]
    pub const fn new(today: NaiveDate, horizon_days: u32) -> Self {
        Self {
            today,
            horizon_days,
        }
    }

    /// Creates a planner anchored at the current local date.
    #[must_use]
    pub fn for_today(horizon_days: u32) -> Self {
        Self::new(chrono::Local::now().date_naive(), horizon_days)
    }

    /// Returns the window anchor.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Checks that `date` falls inside the booking window: from the anchor
    /// through `horizon_days` days ahead, both ends inclusive.
    fn check_window(&self, date: NaiveDate) -> Result<()> {
        if date < self.today {
            return Err(Error::InvalidInput {
                field: "date".to_string(),
                reason: format!("{} is in the past", date.format(DATE_FORMAT)),
            });
        }
        let last = self
            .today
            .checked_add_days(Days::new(u64::from(self.horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        if date > last {
            return Err(Error::InvalidInput {
                field: "date".to_string(),
                reason: format!(
                    "{} is beyond the {}-day booking window",
                    date.format(DATE_FORMAT),
                    self.horizon_days
                ),
            });
        }
        Ok(())
    }

    /// Builds a plan for a book reservation request.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for empty fields or an out-of-window date
    /// - [`Error::FormatError`] for an unparseable date
    /// - [`Error::NotFound`] if the book is not in the catalog
    /// - [`Error::Conflict`] if the (title, date) slot is already taken
    pub fn build_book_plan(
        &self,
        request: &ReserveBookRequest,
        catalog: &Catalog,
        store: &ReservationStore,
    ) -> Result<OperationPlan> {
        let date = parse_date(&request.date)?;
        let candidate =
            BookReservation::new(request.session.user_id(), &request.book_title, date)?;
        self.check_window(date)?;

        if !catalog.book_exists(candidate.book_title()) {
            return Err(Error::NotFound {
                resource: format!("book '{}'", candidate.book_title()),
            });
        }

        let snapshot = store.book_snapshot();
        if book_conflict(&snapshot, candidate.book_title(), date).is_some() {
            return Err(Error::Conflict {
                details: format!(
                    "book '{}' is already reserved on {}",
                    candidate.book_title(),
                    date.format(DATE_FORMAT)
                ),
            });
        }

        log::info!("planned {candidate}");
        Ok(OperationPlan::new(format!("Reserve {candidate}"))
            .add_action(PlanAction::CreateBookReservation(candidate)))
    }

    /// Builds a plan for a table reservation request.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for empty fields or an out-of-window date
    /// - [`Error::FormatError`] for unparseable date/times or a slot whose
    ///   start is not strictly earlier than its end
    /// - [`Error::NotFound`] if the table is not in the catalog
    /// - [`Error::Conflict`] if the slot overlaps an existing reservation
    pub fn build_table_plan(
        &self,
        request: &ReserveTableRequest,
        catalog: &Catalog,
        store: &ReservationStore,
    ) -> Result<OperationPlan> {
        let date = parse_date(&request.date)?;
        let start = parse_time(&request.start)?;
        let end = parse_time(&request.end)?;
        let candidate = TableReservation::new(
            request.session.user_id(),
            request.table_id,
            date,
            start,
            end,
        )?;
        self.check_window(date)?;

        if !catalog.table_exists(candidate.table_id()) {
            return Err(Error::NotFound {
                resource: format!("table {}", candidate.table_id()),
            });
        }

        let snapshot = store.table_snapshot();
        if table_conflict(&snapshot, candidate.table_id(), date, start, end).is_some() {
            return Err(Error::Conflict {
                details: format!(
                    "table {} is already reserved in an overlapping slot on {}",
                    candidate.table_id(),
                    date.format(DATE_FORMAT)
                ),
            });
        }

        log::info!("planned {candidate}");
        Ok(OperationPlan::new(format!("Reserve {candidate}"))
            .add_action(PlanAction::CreateTableReservation(candidate)))
    }
}
