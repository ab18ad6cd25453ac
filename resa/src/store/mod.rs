//! Reservation persistence and the atomic check-and-commit store.
//!
//! The store owns both reservation collections behind a single lock. All
//! admission decisions that gate a write run inside the same write-lock
//! critical section as the write itself, which is what keeps two
//! concurrent requests for the same slot from both committing.

pub mod file;
pub mod record;

pub use file::{ensure_data_dir, FileStorage, MemoryStorage, Storage};
pub use record::Record;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Result;
use crate::reservation::{BookReservation, ReservationId, TableReservation};

// A poisoned lock means another thread panicked while holding it; the
// collections stay structurally valid, so recover the guard.
pub(crate) fn lock_read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn lock_write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

struct Collections {
    books: Vec<BookReservation>,
    tables: Vec<TableReservation>,
}

/// The reservation store.
///
/// Holds the committed book and table reservations, persists every
/// mutation through the backing storages, and serializes all writes
/// behind one lock. A rejected request never reaches the storage layer,
/// and a failed save rolls the in-memory collection back, so there is no
/// partially committed state to observe.
///
/// Records get a fresh [`ReservationId`] when loaded or committed; ids
/// are never persisted and never reused within one store instance.
pub struct ReservationStore {
    inner: RwLock<Collections>,
    next_id: AtomicU64,
    book_storage: Box<dyn Storage<BookReservation>>,
    table_storage: Box<dyn Storage<TableReservation>>,
}

impl ReservationStore {
    /// Opens a store over the given storages, loading and re-identifying
    /// all persisted reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if either storage fails to load.
    pub fn open(
        book_storage: Box<dyn Storage<BookReservation>>,
        table_storage: Box<dyn Storage<TableReservation>>,
    ) -> Result<Self> {
        let mut books = book_storage.load()?;
        let mut tables = table_storage.load()?;

        let next_id = AtomicU64::new(1);
        for reservation in &mut books {
            reservation.id = ReservationId::new(next_id.fetch_add(1, Ordering::Relaxed));
        }
        for reservation in &mut tables {
            reservation.id = ReservationId::new(next_id.fetch_add(1, Ordering::Relaxed));
        }
        log::debug!(
            "reservation store loaded: {} book, {} table reservation(s)",
            books.len(),
            tables.len()
        );

        Ok(Self {
            inner: RwLock::new(Collections { books, tables }),
            next_id,
            book_storage,
            table_storage,
        })
    }

    /// Returns a snapshot of all book reservations, in store order.
    #[must_use]
    pub fn book_snapshot(&self) -> Vec<BookReservation> {
        lock_read(&self.inner).books.clone()
    }

    /// Returns a snapshot of all table reservations, in store order.
    #[must_use]
    pub fn table_snapshot(&self) -> Vec<TableReservation> {
        lock_read(&self.inner).tables.clone()
    }

    /// Returns the reservations held by one user.
    #[must_use]
    pub fn reservations_for_user(
        &self,
        user_id: &str,
    ) -> (Vec<BookReservation>, Vec<TableReservation>) {
        let inner = lock_read(&self.inner);
        let books = inner
            .books
            .iter()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect();
        let tables = inner
            .tables
            .iter()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect();
        (books, tables)
    }

    /// Finds a book reservation by id.
    #[must_use]
    pub fn find_book(&self, id: ReservationId) -> Option<BookReservation> {
        lock_read(&self.inner).books.iter().find(|r| r.id == id).cloned()
    }

    /// Finds a table reservation by id.
    #[must_use]
    pub fn find_table(&self, id: ReservationId) -> Option<TableReservation> {
        lock_read(&self.inner).tables.iter().find(|r| r.id == id).cloned()
    }

    /// Commits a candidate book reservation if `admit` accepts it against
    /// the live collection.
    ///
    /// The admission check and the append happen inside one write-lock
    /// critical section. `Ok(None)` means the commit-time re-check turned
    /// the candidate away and nothing was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails; the collection is rolled back.
    pub(crate) fn commit_book(
        &self,
        candidate: BookReservation,
        admit: impl FnOnce(&[BookReservation]) -> bool,
    ) -> Result<Option<BookReservation>> {
        let mut inner = lock_write(&self.inner);
        if !admit(&inner.books) {
            return Ok(None);
        }
        let mut record = candidate;
        record.id = ReservationId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        inner.books.push(record.clone());
        if let Err(e) = self.book_storage.save(&inner.books) {
            inner.books.pop();
            return Err(e);
        }
        Ok(Some(record))
    }

    /// Commits a candidate table reservation if `admit` accepts it against
    /// the live collection. Semantics mirror [`Self::commit_book`].
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails; the collection is rolled back.
    pub(crate) fn commit_table(
        &self,
        candidate: TableReservation,
        admit: impl FnOnce(&[TableReservation]) -> bool,
    ) -> Result<Option<TableReservation>> {
        let mut inner = lock_write(&self.inner);
        if !admit(&inner.tables) {
            return Ok(None);
        }
        let mut record = candidate;
        record.id = ReservationId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        inner.tables.push(record.clone());
        if let Err(e) = self.table_storage.save(&inner.tables) {
            inner.tables.pop();
            return Err(e);
        }
        Ok(Some(record))
    }

    /// Removes the book reservation with the given id.
    ///
    /// Removal is best-effort idempotent: an absent id is a `false` no-op
    /// and performs no write.
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails; the collection is rolled back.
    pub(crate) fn remove_book(&self, id: ReservationId) -> Result<bool> {
        let mut inner = lock_write(&self.inner);
        let Some(position) = inner.books.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        let removed = inner.books.remove(position);
        if let Err(e) = self.book_storage.save(&inner.books) {
            inner.books.insert(position, removed);
            return Err(e);
        }
        Ok(true)
    }

    /// Removes the table reservation with the given id. Semantics mirror
    /// [`Self::remove_book`].
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails; the collection is rolled back.
    pub(crate) fn remove_table(&self, id: ReservationId) -> Result<bool> {
        let mut inner = lock_write(&self.inner);
        let Some(position) = inner.tables.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        let removed = inner.tables.remove(position);
        if let Err(e) = self.table_storage.save(&inner.tables) {
            inner.tables.insert(position, removed);
            return Err(e);
        }
        Ok(true)
    }
}
