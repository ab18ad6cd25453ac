//! Listing commands: books, tables, and reservations.
//!
//! Listings support text and JSON output. Reservation listings are
//! scoped by the session: admins see every record, members their own.

use clap::Args;
use serde_json::json;

use crate::error::CliError;
use crate::utils::{authenticate, open_engine, GlobalOptions, OutputFormat};

/// List the catalog's books.
#[derive(Args)]
pub struct ListBooksCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListBooksCommand {
    /// Execute the list-books command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let books = engine.list_books();
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&books).unwrap_or_default());
            }
            OutputFormat::Text => {
                if books.is_empty() {
                    println!("No books in the catalog");
                }
                for book in books {
                    println!("{book}");
                }
            }
        }
        Ok(())
    }
}

/// List the catalog's tables.
#[derive(Args)]
pub struct ListTablesCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListTablesCommand {
    /// Execute the list-tables command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let tables = engine.list_tables();
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&tables).unwrap_or_default());
            }
            OutputFormat::Text => {
                if tables.is_empty() {
                    println!("No tables in the catalog");
                }
                for table in tables {
                    println!("{table}");
                }
            }
        }
        Ok(())
    }
}

/// List reservations visible to the authenticated user.
#[derive(Args)]
pub struct ListReservationsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListReservationsCommand {
    /// Execute the list-reservations command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let session = authenticate(&engine, global)?;
        let (books, tables) = engine.list_reservations(&session);
        match self.format {
            OutputFormat::Json => {
                let doc = json!({ "books": books, "tables": tables });
                println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_default());
            }
            OutputFormat::Text => {
                if books.is_empty() && tables.is_empty() {
                    println!("No reservations");
                }
                for reservation in books {
                    println!("[{}] {reservation}", reservation.id());
                }
                for reservation in tables {
                    println!("[{}] {reservation}", reservation.id());
                }
            }
        }
        Ok(())
    }
}
