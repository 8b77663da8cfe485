//! Core catalog logic for the zoo animal registry.
//! This crate owns the record rules and the storage contract behind them.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::animal::{AnimalRecord, AnimalValidationError};
pub use repo::animal_repo::{
    AnimalQuery, AnimalRepository, RepoError, RepoResult, SqliteAnimalRepository,
};
pub use service::animals_manager::{AnimalsManager, ManagerError, ManagerResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
