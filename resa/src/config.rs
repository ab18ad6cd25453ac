//! Configuration loading and the configuration builder.
//!
//! Configuration is resolved in layers. From weakest to strongest:
//!
//! 1. Built-in defaults
//! 2. A `resa.yaml` file in the data directory (or an explicit path)
//! 3. `RESA_*` environment variables
//! 4. Programmatic overrides on the builder
//!
//! The data directory is resolved before the file layer, since the file
//! lives inside it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable naming the data directory.
pub const ENV_DATA_DIR: &str = "RESA_DATA_DIR";
/// Environment variable overriding the admin username.
pub const ENV_ADMIN_USER: &str = "RESA_ADMIN_USER";
/// Environment variable overriding the admin password.
pub const ENV_ADMIN_PASSWORD: &str = "RESA_ADMIN_PASSWORD";
/// Environment variable overriding the reservation horizon in days.
pub const ENV_HORIZON_DAYS: &str = "RESA_HORIZON_DAYS";

/// Name of the optional configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "resa.yaml";

/// Default booking horizon: reservations may target today through this
/// many days ahead, inclusive.
pub const DEFAULT_HORIZON_DAYS: u32 = 14;

/// Returns the default data directory, `~/.resa`.
///
/// Falls back to `.resa` in the current directory when the home directory
/// cannot be determined.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    home::home_dir().map_or_else(|| PathBuf::from(".resa"), |home| home.join(".resa"))
}

/// Credentials for the single administrator account.
///
/// The administrator is configured, never registered, and never written
/// to the user file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// The admin login name.
    pub username: String,
    /// The admin password.
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Resolved configuration for an engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the data files.
    pub data_dir: PathBuf,
    /// Administrator credentials.
    pub admin: AdminConfig,
    /// Booking horizon: reservations may target today through this many
    /// days ahead, inclusive.
    pub horizon_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            admin: AdminConfig::default(),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl Config {
    /// Creates a builder for layered configuration resolution.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Loads configuration using defaults, the config file, and the
    /// environment, with no programmatic overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self> {
        Self::builder().build()
    }
}

/// The on-disk configuration schema.
///
/// Every field is optional; absent fields fall through to weaker layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    admin_username: Option<String>,
    admin_password: Option<String>,
    horizon_days: Option<u32>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        let parsed = serde_yaml::from_str(&contents)?;
        log::debug!("loaded config file {}", path.display());
        Ok(Some(parsed))
    }
}

/// Builder for [`Config`].
///
/// # Examples
///
/// ```
/// use resa::Config;
///
/// let config = Config::builder()
///     .data_dir("/tmp/resa-doctest")
///     .admin_username("root")
///     .horizon_days(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.horizon_days, 7);
/// assert_eq!(config.admin.username, "root");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    admin_username: Option<String>,
    admin_password: Option<String>,
    horizon_days: Option<u32>,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Sets the data directory.
    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Sets an explicit config file path instead of `<data_dir>/resa.yaml`.
    #[must_use]
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Overrides the admin username.
    #[must_use]
    pub fn admin_username(mut self, username: impl Into<String>) -> Self {
        self.admin_username = Some(username.into());
        self
    }

    /// Overrides the admin password.
    #[must_use]
    pub fn admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = Some(password.into());
        self
    }

    /// Overrides the reservation horizon in days.
    #[must_use]
    pub const fn horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = Some(days);
        self
    }

    /// Ignores `RESA_*` environment variables during resolution.
    ///
    /// Intended for tests that must not observe the ambient environment.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    fn env_var(&self, name: &str) -> Option<String> {
        if self.skip_env {
            None
        } else {
            env::var(name).ok()
        }
    }

    /// Resolves the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed, or if `RESA_HORIZON_DAYS` is set to a non-numeric value.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        // The data directory only has default, env, and programmatic
        // layers; the file lives inside it.
        if let Some(dir) = self.env_var(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }

        let file_path = self
            .config_file
            .clone()
            .unwrap_or_else(|| config.data_dir.join(CONFIG_FILE_NAME));
        if let Some(file) = FileConfig::load(&file_path)? {
            if let Some(username) = file.admin_username {
                config.admin.username = username;
            }
            if let Some(password) = file.admin_password {
                config.admin.password = password;
            }
            if let Some(days) = file.horizon_days {
                config.horizon_days = days;
            }
        }

        if let Some(username) = self.env_var(ENV_ADMIN_USER) {
            config.admin.username = username;
        }
        if let Some(password) = self.env_var(ENV_ADMIN_PASSWORD) {
            config.admin.password = password;
        }
        if let Some(days) = self.env_var(ENV_HORIZON_DAYS) {
            let parsed = days.parse::<u32>().map_err(|_| crate::Error::InvalidInput {
                field: ENV_HORIZON_DAYS.to_string(),
                reason: format!("expected a number of days, got '{days}'"),
            })?;
            config.horizon_days = parsed;
        }

        if let Some(username) = self.admin_username {
            config.admin.username = username;
        }
        if let Some(password) = self.admin_password {
            config.admin.password = password;
        }
        if let Some(days) = self.horizon_days {
            config.horizon_days = days;
        }

        Ok(config)
    }
}
