//! Schema accessor trait
//!
//! Read/write access to the schema of one Directus instance.
//!
//! Reads never fail: a failed list comes back empty and a failed lookup comes
//! back as `None`, which biases a migration toward creating rather than
//! aborting. Writes surface every failure to the caller.

use async_trait::async_trait;

use crate::error::DirectusResult;
use crate::models::{Collection, Field, Relation};

/// Schema operations on one Directus instance.
#[async_trait]
pub trait SchemaAccessor: Send + Sync {
    /// Label used in logs (usually the base URL).
    fn display_name(&self) -> &str;

    /// List user collections, excluding `directus_*` and `languages`.
    async fn list_collections(&self) -> Vec<Collection>;

    /// Look up one collection by name.
    async fn get_collection(&self, name: &str) -> Option<Collection>;

    /// Create a collection, including any inline `fields`.
    async fn create_collection(&self, collection: &Collection) -> DirectusResult<()>;

    /// Push the collection's `meta` block. `schema` is left untouched.
    async fn update_collection(&self, collection: &Collection) -> DirectusResult<()>;

    /// Delete a collection and its data.
    async fn delete_collection(&self, name: &str) -> DirectusResult<()>;

    /// List the fields of a collection whose primary-key flag equals `primary_key`.
    ///
    /// Server-assigned `meta.id` values are stripped.
    async fn list_fields(&self, collection: &str, primary_key: bool) -> Vec<Field>;

    /// Create a field in `collection`.
    async fn create_field(&self, collection: &str, field: &Field) -> DirectusResult<()>;

    /// Push a field's `meta` block.
    async fn update_field(&self, collection: &str, field: &Field) -> DirectusResult<()>;

    /// Delete a field and its column.
    async fn delete_field(&self, collection: &str, field: &str) -> DirectusResult<()>;

    /// List the relations whose "many" side is `collection`.
    ///
    /// Server-assigned `meta.id` values are stripped.
    async fn list_relations(&self, collection: &str) -> Vec<Relation>;

    /// Create a relation.
    async fn create_relation(&self, relation: &Relation) -> DirectusResult<()>;

    /// Push a relation's `meta` block.
    async fn update_relation(&self, relation: &Relation) -> DirectusResult<()>;
}
