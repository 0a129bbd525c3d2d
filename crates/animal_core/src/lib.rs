//! Core domain logic for the animal registry.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use db::AnimalStore;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::animal::{Animal, AnimalId, AnimalValidationError};
pub use repo::animal_repo::{AnimalRepository, RepoError, RepoResult, SqliteAnimalRepository};
pub use service::animal_manager::{AnimalManager, ManagerError, ManagerResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
