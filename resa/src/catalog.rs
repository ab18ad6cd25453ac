//! Resource catalog: the set of reservable books and tables.
//!
//! The catalog is the leaf component of the system. It owns the `Book` and
//! `Table` collections, validates additions, and serves the identity checks
//! the reservation engine performs before admitting a request.

use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reservation::validated_field;
use crate::store::{lock_read, lock_write, Storage};

/// A reservable book.
///
/// The title acts as the natural key for conflict purposes; duplicate
/// titles are not rejected at catalog-add time.
///
/// # Examples
///
/// ```
/// use resa::Book;
///
/// let book = Book::new("Dune", "Frank Herbert").unwrap();
/// assert_eq!(book.title(), "Dune");
///
/// // Empty fields are rejected.
/// assert!(Book::new("", "Frank Herbert").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub(crate) title: String,
    pub(crate) author: String,
}

impl Book {
    /// Creates a new book entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the title or author is empty
    /// after trimming, or contains a comma.
    pub fn new(title: impl AsRef<str>, author: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            title: validated_field("title", title.as_ref())?,
            author: validated_field("author", author.as_ref())?,
        })
    }

    /// Returns the book title (the natural key).
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the author name.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.author)
    }
}

/// The numeric identity of a table.
///
/// Identities are assigned by the catalog from a monotonically increasing
/// counter and are never reused after a deletion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TableId(u32);

impl TableId {
    /// Returns the numeric value of this identity.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for TableId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reservable study table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub(crate) id: TableId,
    pub(crate) capacity: u32,
}

impl Table {
    pub(crate) const fn from_parts(id: TableId, capacity: u32) -> Self {
        Self { id, capacity }
    }

    /// Returns the table identity.
    #[must_use]
    pub const fn id(&self) -> TableId {
        self.id
    }

    /// Returns the seating capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table {} (capacity {})", self.id, self.capacity)
    }
}

struct TablesInner {
    tables: Vec<Table>,
    next_id: u32,
}

/// The catalog of reservable resources.
///
/// Mutations persist immediately through the backing storages; a failed
/// save rolls the in-memory collection back, so the catalog never holds
/// state the storage does not.
///
/// # Examples
///
/// ```
/// use resa::{Catalog, MemoryStorage};
///
/// let catalog = Catalog::open(
///     Box::new(MemoryStorage::new()),
///     Box::new(MemoryStorage::new()),
/// )
/// .unwrap();
///
/// catalog.add_book("Dune", "Frank Herbert").unwrap();
/// let table = catalog.add_table(4).unwrap();
/// assert_eq!(table.id().value(), 1);
/// assert_eq!(catalog.list_books().len(), 1);
/// ```
pub struct Catalog {
    books: RwLock<Vec<Book>>,
    tables: RwLock<TablesInner>,
    book_storage: Box<dyn Storage<Book>>,
    table_storage: Box<dyn Storage<Table>>,
}

impl Catalog {
    /// Opens a catalog over the given storages, loading both collections.
    ///
    /// The table id counter is seeded with one past the highest persisted
    /// id, so identities survive a reload without reuse.
    ///
    /// # Errors
    ///
    /// Returns an error if either storage fails to load.
    pub fn open(
        book_storage: Box<dyn Storage<Book>>,
        table_storage: Box<dyn Storage<Table>>,
    ) -> Result<Self> {
        let books = book_storage.load()?;
        let tables = table_storage.load()?;
        let next_id = tables.iter().map(|t| t.id.value()).max().unwrap_or(0) + 1;
        log::debug!(
            "catalog loaded: {} book(s), {} table(s)",
            books.len(),
            tables.len()
        );
        Ok(Self {
            books: RwLock::new(books),
            tables: RwLock::new(TablesInner { tables, next_id }),
            book_storage,
            table_storage,
        })
    }

    /// Returns a snapshot of all books, in catalog order.
    #[must_use]
    pub fn list_books(&self) -> Vec<Book> {
        lock_read(&self.books).clone()
    }

    /// Returns a snapshot of all tables, in catalog order.
    #[must_use]
    pub fn list_tables(&self) -> Vec<Table> {
        lock_read(&self.tables).tables.clone()
    }

    /// Returns true if a book with the given title exists.
    #[must_use]
    pub fn book_exists(&self, title: &str) -> bool {
        lock_read(&self.books).iter().any(|b| b.title == title)
    }

    /// Returns true if a table with the given identity exists.
    #[must_use]
    pub fn table_exists(&self, id: TableId) -> bool {
        lock_read(&self.tables).tables.iter().any(|t| t.id == id)
    }

    /// Adds a book to the catalog and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty or comma-bearing title
    /// or author, and any storage error from the save.
    pub fn add_book(&self, title: &str, author: &str) -> Result<Book> {
        let book = Book::new(title, author)?;
        let mut books = lock_write(&self.books);
        books.push(book.clone());
        if let Err(e) = self.book_storage.save(&books) {
            books.pop();
            return Err(e);
        }
        Ok(book)
    }

    /// Adds a table with the given capacity and persists it.
    ///
    /// The identity comes from the catalog's monotonic counter; deleted
    /// identities are never reassigned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] unless the capacity is at least 1,
    /// and any storage error from the save.
    pub fn add_table(&self, capacity: u32) -> Result<Table> {
        if capacity == 0 {
            return Err(Error::InvalidInput {
                field: "capacity".to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }
        let mut inner = lock_write(&self.tables);
        let table = Table::from_parts(TableId(inner.next_id), capacity);
        inner.tables.push(table.clone());
        if let Err(e) = self.table_storage.save(&inner.tables) {
            inner.tables.pop();
            return Err(e);
        }
        inner.next_id += 1;
        Ok(table)
    }

    /// Removes the book with the given title, if present.
    ///
    /// Deletion is idempotent: removing an absent title is a `false`
    /// no-op, never an error. When duplicate titles exist every matching
    /// entry is removed, mirroring a delete keyed on the natural key.
    pub(crate) fn delete_book(&self, title: &str) -> Result<bool> {
        let mut books = lock_write(&self.books);
        let before = books.len();
        let removed: Vec<(usize, Book)> = {
            let mut kept = Vec::with_capacity(before);
            let mut removed = Vec::new();
            for (index, book) in books.drain(..).enumerate() {
                if book.title == title {
                    removed.push((index, book));
                } else {
                    kept.push(book);
                }
            }
            *books = kept;
            removed
        };
        if removed.is_empty() {
            return Ok(false);
        }
        if let Err(e) = self.book_storage.save(&books) {
            for (index, book) in removed {
                let position = index.min(books.len());
                books.insert(position, book);
            }
            return Err(e);
        }
        Ok(true)
    }

    /// Removes the table with the given identity, if present.
    ///
    /// Deletion is idempotent; the identity is never reassigned afterwards.
    pub(crate) fn delete_table(&self, id: TableId) -> Result<bool> {
        let mut inner = lock_write(&self.tables);
        let Some(position) = inner.tables.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        let table = inner.tables.remove(position);
        if let Err(e) = self.table_storage.save(&inner.tables) {
            inner.tables.insert(position, table);
            return Err(e);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    fn open_catalog() -> Catalog {
        Catalog::open(
            Box::new(MemoryStorage::new()),
            Box::new(MemoryStorage::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_add_and_list_books() {
        let catalog = open_catalog();
        catalog.add_book("Dune", "Frank Herbert").unwrap();
        catalog.add_book("Solaris", "Stanislaw Lem").unwrap();

        let books = catalog.list_books();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title(), "Dune");
        assert_eq!(books[1].author(), "Stanislaw Lem");
    }

    #[test]
    fn test_add_book_rejects_empty_fields() {
        let catalog = open_catalog();
        assert!(catalog.add_book("", "Frank Herbert").is_err());
        assert!(catalog.add_book("Dune", "  ").is_err());
        assert!(catalog.list_books().is_empty());
    }

    #[test]
    fn test_add_book_rejects_embedded_comma() {
        let catalog = open_catalog();
        let err = catalog.add_book("Dune, Part Two", "Frank Herbert").unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn test_duplicate_titles_allowed() {
        let catalog = open_catalog();
        catalog.add_book("Dune", "Frank Herbert").unwrap();
        catalog.add_book("Dune", "Someone Else").unwrap();
        assert_eq!(catalog.list_books().len(), 2);
    }

    #[test]
    fn test_add_table_assigns_sequential_ids() {
        let catalog = open_catalog();
        let t1 = catalog.add_table(4).unwrap();
        let t2 = catalog.add_table(6).unwrap();
        assert_eq!(t1.id().value(), 1);
        assert_eq!(t2.id().value(), 2);
        assert_eq!(t2.capacity(), 6);
    }

    #[test]
    fn test_add_table_rejects_zero_capacity() {
        let catalog = open_catalog();
        let err = catalog.add_table(0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn test_table_ids_not_reused_after_delete() {
        let catalog = open_catalog();
        let t1 = catalog.add_table(4).unwrap();
        let t2 = catalog.add_table(4).unwrap();
        assert!(catalog.delete_table(t2.id()).unwrap());

        // The counter keeps advancing past the deleted id.
        let t3 = catalog.add_table(4).unwrap();
        assert_eq!(t3.id().value(), 3);
        assert!(catalog.table_exists(t1.id()));
        assert!(!catalog.table_exists(t2.id()));
    }

    #[test]
    fn test_id_counter_seeded_from_persisted_tables() {
        let storage = MemoryStorage::new();
        storage
            .save(&[
                Table::from_parts(TableId(1), 2),
                Table::from_parts(TableId(5), 8),
            ])
            .unwrap();

        let catalog = Catalog::open(Box::new(MemoryStorage::new()), Box::new(storage)).unwrap();
        let table = catalog.add_table(4).unwrap();
        assert_eq!(table.id().value(), 6);
    }

    #[test]
    fn test_delete_book_idempotent() {
        let catalog = open_catalog();
        catalog.add_book("Dune", "Frank Herbert").unwrap();

        assert!(catalog.delete_book("Dune").unwrap());
        assert!(!catalog.delete_book("Dune").unwrap());
        assert!(!catalog.book_exists("Dune"));
    }

    #[test]
    fn test_delete_book_removes_all_duplicates() {
        let catalog = open_catalog();
        catalog.add_book("Dune", "Frank Herbert").unwrap();
        catalog.add_book("Dune", "Someone Else").unwrap();
        catalog.add_book("Solaris", "Stanislaw Lem").unwrap();

        assert!(catalog.delete_book("Dune").unwrap());
        let books = catalog.list_books();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title(), "Solaris");
    }

    #[test]
    fn test_delete_book_failed_save_rolls_back() {
        let storage = MemoryStorage::new();
        let catalog = Catalog::open(Box::new(storage.clone()), Box::new(MemoryStorage::new()))
            .unwrap();
        catalog.add_book("Dune", "Frank Herbert").unwrap();
        catalog.add_book("Solaris", "Stanislaw Lem").unwrap();
        catalog.add_book("Dune", "Someone Else").unwrap();

        storage.fail_saves(true);
        assert!(catalog.delete_book("Dune").is_err());

        // Every removed entry is restored at its original position.
        let books = catalog.list_books();
        assert_eq!(books.len(), 3);
        assert_eq!(books[0].author(), "Frank Herbert");
        assert_eq!(books[1].title(), "Solaris");
        assert_eq!(books[2].author(), "Someone Else");
    }

    #[test]
    fn test_delete_table_failed_save_rolls_back() {
        let storage = MemoryStorage::new();
        let catalog = Catalog::open(Box::new(MemoryStorage::new()), Box::new(storage.clone()))
            .unwrap();
        let table = catalog.add_table(4).unwrap();

        storage.fail_saves(true);
        assert!(catalog.delete_table(table.id()).is_err());
        assert!(catalog.table_exists(table.id()));
    }

    #[test]
    fn test_delete_table_idempotent() {
        let catalog = open_catalog();
        let table = catalog.add_table(4).unwrap();
        assert!(catalog.delete_table(table.id()).unwrap());
        assert!(!catalog.delete_table(table.id()).unwrap());
    }

    #[test]
    fn test_exists_checks() {
        let catalog = open_catalog();
        catalog.add_book("Dune", "Frank Herbert").unwrap();
        let table = catalog.add_table(4).unwrap();

        assert!(catalog.book_exists("Dune"));
        assert!(!catalog.book_exists("Solaris"));
        assert!(catalog.table_exists(table.id()));
        assert!(!catalog.table_exists(TableId::from(99)));
    }
}
