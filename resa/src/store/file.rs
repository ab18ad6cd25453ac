//! File-backed and in-memory storage for line-oriented records.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::catalog::{Book, Table};
use crate::error::{Error, Result};
use crate::identity::User;
use crate::reservation::{BookReservation, TableReservation};
use crate::store::record::Record;

/// A persistence backend for one record kind.
///
/// `load` materializes the full collection; `save` replaces it. The store
/// and catalog always save the complete collection after a mutation, so a
/// backend never needs to diff.
pub trait Storage<R: Record>: Send + Sync {
    /// Loads all records.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or a record is
    /// malformed.
    fn load(&self) -> Result<Vec<R>>;

    /// Replaces the persisted collection with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written. A failed save
    /// must leave the previously persisted collection intact.
    fn save(&self, records: &[R]) -> Result<()>;
}

/// Storage over a newline-delimited text file.
///
/// A missing file loads as an empty collection. Saves are atomic at the
/// file level: the new contents go to a sibling temporary file which is
/// then renamed over the target, so a crash mid-save leaves either the
/// old file or the new one, never a truncated mix.
pub struct FileStorage<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> FileStorage<R> {
    /// Creates a storage for this record kind inside `data_dir`.
    ///
    /// The file name is fixed per record kind
    /// ([`Record::FILE_NAME`]).
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(R::FILE_NAME),
            _record: PhantomData,
        }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: Record> Storage<R> for FileStorage<R> {
    fn load(&self) -> Result<Vec<R>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record = R::parse(line).map_err(|reason| Error::CorruptRecord {
                file: self.path.clone(),
                line: index + 1,
                reason,
            })?;
            records.push(record);
        }
        log::debug!(
            "loaded {} record(s) from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn save(&self, records: &[R]) -> Result<()> {
        let mut contents = String::new();
        for record in records {
            contents.push_str(&record.to_line());
            contents.push('\n');
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

struct MemoryInner<R> {
    records: Vec<R>,
    fail_saves: bool,
}

/// An in-memory storage backend for tests and examples.
///
/// Clones share the same underlying collection, so a test can keep a
/// handle to the storage it handed into a component and inspect what was
/// saved.
pub struct MemoryStorage<R> {
    inner: Arc<Mutex<MemoryInner<R>>>,
}

impl<R> Clone for MemoryStorage<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> Default for MemoryStorage<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> MemoryStorage<R> {
    /// Creates an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner {
                records: Vec::new(),
                fail_saves: false,
            })),
        }
    }

    /// Makes every subsequent `save` fail with an I/O error.
    ///
    /// Test hook for exercising rollback-on-save-failure paths.
    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Record> Storage<R> for MemoryStorage<R> {
    fn load(&self) -> Result<Vec<R>> {
        Ok(self.lock().records.clone())
    }

    fn save(&self, records: &[R]) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_saves {
            return Err(Error::Io(io::Error::other("injected save failure")));
        }
        inner.records = records.to_vec();
        Ok(())
    }
}

/// Creates the data directory and the five record files if absent.
///
/// Existing files are left untouched.
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be created.
pub fn ensure_data_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    for name in [
        User::FILE_NAME,
        Book::FILE_NAME,
        Table::FILE_NAME,
        BookReservation::FILE_NAME,
        TableReservation::FILE_NAME,
    ] {
        let path = dir.join(name);
        match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }
    }
    log::debug!("data directory ready at {}", dir.display());
    Ok(())
}
