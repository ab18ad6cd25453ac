//! Error types for the resa library.
//!
//! This module provides a comprehensive error hierarchy for all operations
//! in the resa library, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a resa error.
///
/// # Examples
///
/// ```
/// use resa::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the resa library.
///
/// This enum encompasses all possible error conditions that can occur
/// during catalog and reservation operations. Every variant is recoverable
/// at the caller; the library never terminates the process on bad input.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was empty or otherwise malformed.
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput {
        /// The field that failed validation.
        field: String,
        /// The reason the field is invalid.
        reason: String,
    },

    /// A date or time value could not be parsed, or a time range was
    /// not strictly ordered.
    #[error("format error for '{value}': {reason}")]
    FormatError {
        /// The value that failed to parse.
        value: String,
        /// The reason the value is malformed.
        reason: String,
    },

    /// The referenced book, table, or record was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A reservation conflict occurred (duplicate book/date or an
    /// overlapping table time slot).
    #[error("reservation conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// An entity with the same identity already exists.
    #[error("already exists: {resource}")]
    AlreadyExists {
        /// The resource that already exists.
        resource: String,
    },

    /// Login failed or the session lacks the required admin capability.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A persisted record line could not be parsed.
    #[error("corrupt record in {} at line {line}: {reason}", file.display())]
    CorruptRecord {
        /// The file containing the corrupt record.
        file: PathBuf,
        /// The 1-based line number of the corrupt record.
        line: usize,
        /// The reason the record is corrupt.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),
}

impl Error {
    /// Check if error indicates a reservation conflict.
    ///
    /// # Examples
    ///
    /// ```
    /// use resa::Error;
    ///
    /// let err = Error::Conflict { details: "slot taken".to_string() };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use resa::Error;
    ///
    /// let err = Error::NotFound { resource: "book 'Dune'".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error indicates rejected input (validation or format).
    #[must_use]
    pub fn is_rejected_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::FormatError { .. })
    }
}
