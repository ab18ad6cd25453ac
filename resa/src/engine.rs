//! The reservation engine facade.
//!
//! `Engine` wires the catalog, store, and user directory together and
//! exposes one-call wrappers over the plan/execute pipeline. The wrappers
//! add no semantics of their own: each builds a plan and executes it.

use crate::catalog::{Book, Catalog, Table, TableId};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::identity::{Session, User, UserDirectory};
use crate::operations::{
    AdminPlan, CancelPlan, CancelRequest, Commitment, PlanExecutor, ReservationKind,
    ReserveBookRequest, ReservePlan, ReserveTableRequest,
};
use crate::reservation::{BookReservation, ReservationId, TableReservation};
use crate::store::{ensure_data_dir, FileStorage, ReservationStore};

/// The reservation engine.
///
/// All methods take `&self`; the components synchronize internally, so an
/// `Engine` can be shared across threads.
pub struct Engine {
    catalog: Catalog,
    store: ReservationStore,
    users: UserDirectory,
    horizon_days: u32,
}

impl Engine {
    /// Opens an engine over file-backed storage in the configured data
    /// directory, creating the directory and data files if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be prepared or a
    /// data file fails to load.
    pub fn open(config: &Config) -> Result<Self> {
        ensure_data_dir(&config.data_dir)?;
        let catalog = Catalog::open(
            Box::new(FileStorage::new(&config.data_dir)),
            Box::new(FileStorage::new(&config.data_dir)),
        )?;
        let store = ReservationStore::open(
            Box::new(FileStorage::new(&config.data_dir)),
            Box::new(FileStorage::new(&config.data_dir)),
        )?;
        let users = UserDirectory::open(
            Box::new(FileStorage::new(&config.data_dir)),
            config.admin.clone(),
        )?;
        Ok(Self::from_components(
            catalog,
            store,
            users,
            config.horizon_days,
        ))
    }

    /// Assembles an engine from already-opened components.
    ///
    /// Used by tests and callers that supply their own storage backends.
    #[must_use]
    pub const fn from_components(
        catalog: Catalog,
        store: ReservationStore,
        users: UserDirectory,
        horizon_days: u32,
    ) -> Self {
        Self {
            catalog,
            store,
            users,
            horizon_days,
        }
    }

    /// Returns the resource catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the reservation store.
    #[must_use]
    pub const fn store(&self) -> &ReservationStore {
        &self.store
    }

    /// Returns the booking horizon: the number of days past today a
    /// reservation may target.
    #[must_use]
    pub const fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Registers a new member account.
    ///
    /// # Errors
    ///
    /// See [`UserDirectory::register`].
    pub fn register(&self, user_id: &str, password: &str) -> Result<User> {
        self.users.register(user_id, password)
    }

    /// Authenticates a caller.
    ///
    /// # Errors
    ///
    /// See [`UserDirectory::authenticate`].
    pub fn login(&self, user_id: &str, password: &str) -> Result<Session> {
        self.users.authenticate(user_id, password)
    }

    /// Adds a book to the catalog.
    ///
    /// # Errors
    ///
    /// See [`Catalog::add_book`].
    pub fn add_book(&self, title: &str, author: &str) -> Result<Book> {
        self.catalog.add_book(title, author)
    }

    /// Adds a table to the catalog.
    ///
    /// # Errors
    ///
    /// See [`Catalog::add_table`].
    pub fn add_table(&self, capacity: u32) -> Result<Table> {
        self.catalog.add_table(capacity)
    }

    /// Lists the catalog's books.
    #[must_use]
    pub fn list_books(&self) -> Vec<Book> {
        self.catalog.list_books()
    }

    /// Lists the catalog's tables.
    #[must_use]
    pub fn list_tables(&self) -> Vec<Table> {
        self.catalog.list_tables()
    }

    /// Reserves a book for one calendar date within the booking window.
    ///
    /// # Errors
    ///
    /// See [`ReservePlan::build_book_plan`]; additionally surfaces a
    /// commit-time [`Error::Conflict`] if a concurrent request takes the
    /// slot between planning and execution.
    pub fn reserve_book(
        &self,
        session: &Session,
        book_title: &str,
        date: &str,
    ) -> Result<BookReservation> {
        let request = ReserveBookRequest::new(session.clone(), book_title, date);
        let plan = ReservePlan::for_today(self.horizon_days).build_book_plan(
            &request,
            &self.catalog,
            &self.store,
        )?;
        let result = PlanExecutor::new(&self.catalog, &self.store).execute(&plan)?;
        match result.commitment {
            Some(Commitment::Book(record)) => Ok(record),
            _ => Err(Error::Conflict {
                details: format!("book '{book_title}' reservation was not committed"),
            }),
        }
    }

    /// Reserves a table for a half-open time slot within the booking
    /// window.
    ///
    /// # Errors
    ///
    /// See [`ReservePlan::build_table_plan`]; additionally surfaces a
    /// commit-time [`Error::Conflict`] for a lost race.
    pub fn reserve_table(
        &self,
        session: &Session,
        table_id: TableId,
        date: &str,
        start: &str,
        end: &str,
    ) -> Result<TableReservation> {
        let request = ReserveTableRequest::new(session.clone(), table_id, date, start, end);
        let plan = ReservePlan::for_today(self.horizon_days).build_table_plan(
            &request,
            &self.catalog,
            &self.store,
        )?;
        let result = PlanExecutor::new(&self.catalog, &self.store).execute(&plan)?;
        match result.commitment {
            Some(Commitment::Table(record)) => Ok(record),
            _ => Err(Error::Conflict {
                details: format!("table {table_id} reservation was not committed"),
            }),
        }
    }

    /// Cancels a book reservation by id.
    ///
    /// Returns `true` if a record was removed. A non-owned or absent id
    /// is a `false` no-op.
    ///
    /// # Errors
    ///
    /// Returns an error only if the save fails.
    pub fn cancel_book(&self, session: &Session, id: ReservationId) -> Result<bool> {
        let request = CancelRequest::new(session.clone(), ReservationKind::Book, id);
        let plan = CancelPlan::build_plan(&request, &self.store)?;
        let result = PlanExecutor::new(&self.catalog, &self.store).execute(&plan)?;
        Ok(result.removed)
    }

    /// Cancels a table reservation by id. Semantics mirror
    /// [`Self::cancel_book`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the save fails.
    pub fn cancel_table(&self, session: &Session, id: ReservationId) -> Result<bool> {
        let request = CancelRequest::new(session.clone(), ReservationKind::Table, id);
        let plan = CancelPlan::build_plan(&request, &self.store)?;
        let result = PlanExecutor::new(&self.catalog, &self.store).execute(&plan)?;
        Ok(result.removed)
    }

    /// Deletes a book from the catalog. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] for a member session, and
    /// any storage error from the save.
    pub fn delete_book(&self, session: &Session, title: &str) -> Result<bool> {
        let plan = AdminPlan::delete_book_plan(session, title, &self.catalog)?;
        let result = PlanExecutor::new(&self.catalog, &self.store).execute(&plan)?;
        Ok(result.removed)
    }

    /// Deletes a table from the catalog. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] for a member session, and
    /// any storage error from the save.
    pub fn delete_table(&self, session: &Session, id: TableId) -> Result<bool> {
        let plan = AdminPlan::delete_table_plan(session, id, &self.catalog)?;
        let result = PlanExecutor::new(&self.catalog, &self.store).execute(&plan)?;
        Ok(result.removed)
    }

    /// Lists reservations visible to the session: all of them for an
    /// admin, the session's own otherwise.
    #[must_use]
    pub fn list_reservations(
        &self,
        session: &Session,
    ) -> (Vec<BookReservation>, Vec<TableReservation>) {
        if session.is_admin() {
            (self.store.book_snapshot(), self.store.table_snapshot())
        } else {
            self.store.reservations_for_user(session.user_id())
        }
    }
}
