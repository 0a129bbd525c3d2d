//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve store location and logging settings from `ANIMAL_*` variables.
//! - Turn a resolved config into a live store handle and logger.
//!
//! # Invariants
//! - Unset or blank `ANIMAL_DB_PATH` selects a private in-memory store.
//! - Unset `ANIMAL_LOG_DIR` leaves logging disabled.

use crate::db::{AnimalStore, DbResult};
use crate::logging::{default_log_level, init_logging, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "ANIMAL_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "ANIMAL_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ANIMAL_LOG_DIR";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.message)
    }
}

impl Error for ConfigError {}

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file; `None` means in-memory.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// Absolute log directory; `None` disables logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let db_path = non_blank(DB_PATH_VAR).map(|value| PathBuf::from(value.trim()));

        let log_level = match non_blank(LOG_LEVEL_VAR) {
            Some(value) => normalize_level(&value).map_err(|message| ConfigError {
                variable: LOG_LEVEL_VAR,
                message,
            })?,
            None => default_log_level(),
        };

        let log_dir = non_blank(LOG_DIR_VAR)
            .map(|value| normalize_log_dir(&value))
            .transpose()
            .map_err(|message| ConfigError {
                variable: LOG_DIR_VAR,
                message,
            })?;

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Opens the configured store, applying migrations.
    pub fn open_store(&self) -> DbResult<AnimalStore> {
        match &self.db_path {
            Some(path) => AnimalStore::open(path),
            None => AnimalStore::open_in_memory(),
        }
    }

    /// Starts logging when a directory is configured.
    ///
    /// Returns `Ok(false)` when logging is disabled.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir `{}` is not valid UTF-8", log_dir.display()))?;
        init_logging(self.log_level, log_dir)?;
        Ok(true)
    }
}
