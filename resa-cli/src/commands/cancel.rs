//! Cancel command implementation.

use clap::{Args, ValueEnum};
use resa::ReservationId;

use crate::error::CliError;
use crate::utils::{authenticate, open_engine, GlobalOptions};

/// The reservation kind being cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CancelKind {
    /// A book reservation.
    Book,
    /// A table reservation.
    Table,
}

/// Cancel a reservation by id.
#[derive(Args)]
pub struct CancelCommand {
    /// Kind of reservation to cancel
    #[arg(value_enum, value_name = "KIND")]
    pub kind: CancelKind,

    /// Reservation id, as shown by list-reservations
    #[arg(value_name = "ID")]
    pub id: u64,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let session = authenticate(&engine, global)?;
        let id = ReservationId::from(self.id);
        let removed = match self.kind {
            CancelKind::Book => engine.cancel_book(&session, id)?,
            CancelKind::Table => engine.cancel_table(&session, id)?,
        };
        if !global.quiet {
            if removed {
                println!("Cancelled reservation {id}");
            } else {
                println!("No cancellable reservation with id {id}");
            }
        }
        Ok(())
    }
}
