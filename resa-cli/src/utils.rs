//! Shared helpers for command implementations.

use std::path::PathBuf;

use clap::ValueEnum;
use resa::{Config, Engine, Session};

use crate::error::CliError;

/// Options shared by every command, resolved from the global CLI flags.
pub struct GlobalOptions {
    /// Quiet output requested.
    pub quiet: bool,
    /// Data directory override.
    pub data_dir: Option<PathBuf>,
    /// User id for authentication.
    pub user: Option<String>,
    /// Password for authentication.
    pub password: Option<String>,
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// A JSON document.
    Json,
}

/// Resolves the effective configuration from defaults, the config file,
/// the environment, and the global flags.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = Config::builder();
    if let Some(dir) = &global.data_dir {
        builder = builder.data_dir(dir);
    }
    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Opens the engine over the configured data directory.
pub fn open_engine(global: &GlobalOptions) -> Result<Engine, CliError> {
    let config = load_configuration(global)?;
    Ok(Engine::open(&config)?)
}

/// Authenticates with the global `--user`/`--password` credentials.
pub fn authenticate(engine: &Engine, global: &GlobalOptions) -> Result<Session, CliError> {
    let (Some(user), Some(password)) = (&global.user, &global.password) else {
        return Err(CliError::MissingCredentials);
    };
    Ok(engine.login(user, password)?)
}
