//! directus-migrate library
//!
//! Copies the data model of a Directus instance (collections, fields and
//! relations) to another instance. The binary in `main.rs` wires these
//! modules to the command line; they are exposed here for integration tests.

pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod migrate;
pub mod progress;

pub use error::{CliError, CliResult};
pub use migrate::{MigrationAborted, MigrationStats, Migrator};
