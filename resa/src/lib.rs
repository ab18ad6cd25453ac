#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # resa
//!
//! A library for managing shared-resource reservations with conflict
//! detection.
//!
//! This library provides core types and functionality for reserving library
//! books (exclusive per calendar date) and study tables (exclusive per
//! half-open time slot), keeping the reservation records consistent under
//! cancellation, administrative deletion, and concurrent access.
//!
//! ## Core Types
//!
//! - [`Book`] and [`Table`]: Reservable resources held in the [`Catalog`]
//! - [`BookReservation`] and [`TableReservation`]: Committed reservations
//! - [`Engine`]: Orchestrates validation, conflict checking, and commits
//! - [`Session`]: Authenticated caller identity with an admin capability
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use resa::{
//!     AdminConfig, Catalog, Engine, MemoryStorage, ReservationStore, UserDirectory,
//! };
//!
//! let catalog = Catalog::open(
//!     Box::new(MemoryStorage::new()),
//!     Box::new(MemoryStorage::new()),
//! )
//! .unwrap();
//! let store = ReservationStore::open(
//!     Box::new(MemoryStorage::new()),
//!     Box::new(MemoryStorage::new()),
//! )
//! .unwrap();
//! let users = UserDirectory::open(Box::new(MemoryStorage::new()), AdminConfig::default()).unwrap();
//! let engine = Engine::from_components(catalog, store, users, 14);
//!
//! engine.register("u100", "secret").unwrap();
//! let session = engine.login("u100", "secret").unwrap();
//! engine.add_book("Dune", "Frank Herbert").unwrap();
//!
//! let date = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
//! let commitment = engine.reserve_book(&session, "Dune", &date).unwrap();
//! assert!(engine.reserve_book(&session, "Dune", &date).is_err());
//! # drop(commitment);
//! ```

pub mod catalog;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod identity;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod store;

// Re-export key types at crate root for convenience
pub use catalog::{Book, Catalog, Table, TableId};
pub use config::{default_data_dir, AdminConfig, Config, ConfigBuilder};
pub use conflict::{book_conflict, slots_overlap, table_conflict};
pub use engine::Engine;
pub use error::{Error, Result};
pub use identity::{Session, User, UserDirectory};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    AdminPlan, CancelPlan, CancelRequest, Commitment, ExecutionResult, OperationPlan, PlanAction,
    PlanExecutor, ReservationKind, ReserveBookRequest, ReservePlan, ReserveTableRequest,
};
pub use reservation::{parse_date, parse_time, BookReservation, ReservationId, TableReservation};
pub use store::{ensure_data_dir, FileStorage, MemoryStorage, Record, ReservationStore, Storage};
