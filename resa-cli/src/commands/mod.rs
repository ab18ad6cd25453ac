//! Command implementations.

mod cancel;
mod catalog;
mod init;
mod list;
mod register;
mod reserve;

pub use cancel::CancelCommand;
pub use catalog::{AddBookCommand, AddTableCommand, DeleteBookCommand, DeleteTableCommand};
pub use init::InitCommand;
pub use list::{ListBooksCommand, ListReservationsCommand, ListTablesCommand};
pub use register::RegisterCommand;
pub use reserve::{ReserveBookCommand, ReserveTableCommand};
