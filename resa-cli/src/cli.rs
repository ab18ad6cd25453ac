//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddBookCommand, AddTableCommand, CancelCommand, DeleteBookCommand, DeleteTableCommand,
    InitCommand, ListBooksCommand, ListReservationsCommand, ListTablesCommand, RegisterCommand,
    ReserveBookCommand, ReserveTableCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for library book and table reservations.
#[derive(Parser)]
#[command(name = "resa")]
#[command(version, about = "Manage book and table reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "RESA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// User id to authenticate as
    #[arg(long, value_name = "USER", global = true, env = "RESA_USER")]
    pub user: Option<String>,

    /// Password for the authenticating user
    #[arg(long, value_name = "PASSWORD", global = true, env = "RESA_PASSWORD")]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the data directory and empty data files
    Init(InitCommand),

    /// Register a new member account
    Register(RegisterCommand),

    /// Add a book to the catalog
    AddBook(AddBookCommand),

    /// Add a table to the catalog
    AddTable(AddTableCommand),

    /// List the catalog's books
    ListBooks(ListBooksCommand),

    /// List the catalog's tables
    ListTables(ListTablesCommand),

    /// Reserve a book for a calendar date
    ReserveBook(ReserveBookCommand),

    /// Reserve a table for a time slot
    ReserveTable(ReserveTableCommand),

    /// Cancel a reservation by id
    Cancel(CancelCommand),

    /// List reservations (admin sees all, members their own)
    ListReservations(ListReservationsCommand),

    /// Delete a book from the catalog (admin only)
    DeleteBook(DeleteBookCommand),

    /// Delete a table from the catalog (admin only)
    DeleteTable(DeleteTableCommand),
}
