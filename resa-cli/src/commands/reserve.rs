//! Reserve command implementations.
//!
//! Both commands authenticate, hand the raw date/time strings to the
//! engine, and report the committed record with its id. Validation and
//! conflict detection live entirely in the library.

use clap::Args;
use resa::TableId;

use crate::error::CliError;
use crate::utils::{authenticate, open_engine, GlobalOptions};

/// Reserve a book for a calendar date.
#[derive(Args)]
pub struct ReserveBookCommand {
    /// Title of the book to reserve
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Date to reserve, YYYY-MM-DD
    #[arg(value_name = "DATE")]
    pub date: String,
}

impl ReserveBookCommand {
    /// Execute the reserve-book command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let session = authenticate(&engine, global)?;
        let reservation = engine.reserve_book(&session, &self.title, &self.date)?;
        if !global.quiet {
            println!("[{}] Reserved {reservation}", reservation.id());
        }
        Ok(())
    }
}

/// Reserve a table for a time slot.
#[derive(Args)]
pub struct ReserveTableCommand {
    /// Id of the table to reserve
    #[arg(value_name = "TABLE")]
    pub table: u32,

    /// Date to reserve, YYYY-MM-DD
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Slot start, HH:MM (inclusive)
    #[arg(value_name = "START")]
    pub start: String,

    /// Slot end, HH:MM (exclusive)
    #[arg(value_name = "END")]
    pub end: String,
}

impl ReserveTableCommand {
    /// Execute the reserve-table command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let session = authenticate(&engine, global)?;
        let reservation = engine.reserve_table(
            &session,
            TableId::from(self.table),
            &self.date,
            &self.start,
            &self.end,
        )?;
        if !global.quiet {
            println!("[{}] Reserved {reservation}", reservation.id());
        }
        Ok(())
    }
}
