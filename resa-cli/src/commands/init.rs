//! Init command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};

/// Create the data directory and empty data files.
#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        resa::ensure_data_dir(&config.data_dir)?;
        if !global.quiet {
            println!("Initialized data directory at {}", config.data_dir.display());
        }
        Ok(())
    }
}
