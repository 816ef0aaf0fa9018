//! Migration engine, languages bootstrap and result accounting

pub mod engine;
pub mod languages;
pub mod stats;

pub use engine::{MigrationAborted, Migrator};
pub use languages::languages_collection;
pub use stats::{EntityCounts, MigrationStats};
