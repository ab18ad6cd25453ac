//! Main entry point for the resa CLI.
//!
//! Command-line interface for the resa reservation engine. It provides
//! commands for catalog management, account registration, and reserving,
//! cancelling, and listing book and table reservations. Each invocation
//! authenticates independently; no login state is kept between runs.

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _logger = resa::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        user: cli.user,
        password: cli.password,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Register(cmd) => cmd.execute(&global),
        cli::Command::AddBook(cmd) => cmd.execute(&global),
        cli::Command::AddTable(cmd) => cmd.execute(&global),
        cli::Command::ListBooks(cmd) => cmd.execute(&global),
        cli::Command::ListTables(cmd) => cmd.execute(&global),
        cli::Command::ReserveBook(cmd) => cmd.execute(&global),
        cli::Command::ReserveTable(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::ListReservations(cmd) => cmd.execute(&global),
        cli::Command::DeleteBook(cmd) => cmd.execute(&global),
        cli::Command::DeleteTable(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
