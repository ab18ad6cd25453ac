//! Catalog management commands: adding and deleting books and tables.
//!
//! Deletions require admin credentials; the library enforces the
//! capability, the CLI only supplies the session.

use clap::Args;
use resa::TableId;

use crate::error::CliError;
use crate::utils::{authenticate, open_engine, GlobalOptions};

/// Add a book to the catalog.
#[derive(Args)]
pub struct AddBookCommand {
    /// Book title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Author name
    #[arg(value_name = "AUTHOR")]
    pub author: String,
}

impl AddBookCommand {
    /// Execute the add-book command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let book = engine.add_book(&self.title, &self.author)?;
        if !global.quiet {
            println!("Added {book}");
        }
        Ok(())
    }
}

/// Add a table to the catalog.
#[derive(Args)]
pub struct AddTableCommand {
    /// Seating capacity (at least 1)
    #[arg(value_name = "CAPACITY")]
    pub capacity: u32,
}

impl AddTableCommand {
    /// Execute the add-table command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let table = engine.add_table(self.capacity)?;
        if !global.quiet {
            println!("Added {table}");
        }
        Ok(())
    }
}

/// Delete a book from the catalog (admin only).
#[derive(Args)]
pub struct DeleteBookCommand {
    /// Title of the book to delete
    #[arg(value_name = "TITLE")]
    pub title: String,
}

impl DeleteBookCommand {
    /// Execute the delete-book command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let session = authenticate(&engine, global)?;
        let removed = engine.delete_book(&session, &self.title)?;
        if !global.quiet {
            if removed {
                println!("Deleted book '{}'", self.title);
            } else {
                println!("Book '{}' was not in the catalog", self.title);
            }
        }
        Ok(())
    }
}

/// Delete a table from the catalog (admin only).
#[derive(Args)]
pub struct DeleteTableCommand {
    /// Id of the table to delete
    #[arg(value_name = "TABLE")]
    pub table: u32,
}

impl DeleteTableCommand {
    /// Execute the delete-table command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let session = authenticate(&engine, global)?;
        let id = TableId::from(self.table);
        let removed = engine.delete_table(&session, id)?;
        if !global.quiet {
            if removed {
                println!("Deleted table {id}");
            } else {
                println!("Table {id} was not in the catalog");
            }
        }
        Ok(())
    }
}
