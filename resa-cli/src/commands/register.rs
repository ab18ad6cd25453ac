//! Register command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{open_engine, GlobalOptions};

/// Register a new member account.
#[derive(Args)]
pub struct RegisterCommand {
    /// User id for the new account
    #[arg(value_name = "USER")]
    pub user_id: String,

    /// Password for the new account
    #[arg(value_name = "PASSWORD")]
    pub new_password: String,
}

impl RegisterCommand {
    /// Execute the register command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;
        let user = engine.register(&self.user_id, &self.new_password)?;
        if !global.quiet {
            println!("Registered {user}");
        }
        Ok(())
    }
}
