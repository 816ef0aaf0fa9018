//! # Directus Client
//!
//! Typed access to the schema of a Directus instance: collections, fields
//! and relations.
//!
//! ## Example
//!
//! ```ignore
//! use directus_client::{DirectusClient, DirectusConfig, SchemaAccessor};
//!
//! let config = DirectusConfig::new("https://cms.example.com", "static-token");
//! let client = DirectusClient::new(config)?;
//!
//! for collection in client.list_collections().await {
//!     println!("{}", collection.collection);
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod traits;

// Re-exports
pub use client::DirectusClient;
pub use config::DirectusConfig;
pub use error::{DirectusError, DirectusResult};
pub use models::{
    is_system_collection, Collection, CollectionMeta, CollectionSchema, Field, FieldMeta,
    FieldSchema, Relation, RelationMeta, RelationSchema, SchemaEntity, LANGUAGES_COLLECTION,
    SYSTEM_COLLECTION_PREFIX,
};
pub use traits::SchemaAccessor;
