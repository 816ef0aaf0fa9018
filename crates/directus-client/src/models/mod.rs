//! Typed representations of the Directus schema entities
//!
//! `meta` blocks are modelled field by field. Keys the server returns that
//! are not modelled are kept in an ordered map so they still take part in
//! equality and are sent back unchanged. A null unmodelled `meta` key is
//! dropped on read, so it compares equal to a missing one.

mod collection;
mod field;
mod relation;

pub use collection::{Collection, CollectionMeta, CollectionMetaUpdate, CollectionSchema};
pub use field::{Field, FieldMeta, FieldSchema, FieldUpdate};
pub use relation::{Relation, RelationMeta, RelationSchema, RelationUpdate};

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Unmodelled keys of a `meta` or `schema` block.
pub type Extra = BTreeMap<String, serde_json::Value>;

/// Reads the unmodelled keys of a `meta` block, skipping null values.
pub(crate) fn extra_without_nulls<'de, D>(deserializer: D) -> Result<Extra, D::Error>
where
    D: Deserializer<'de>,
{
    let mut extra = Extra::deserialize(deserializer)?;
    extra.retain(|_, value| !value.is_null());
    Ok(extra)
}

/// Prefix of collections owned by Directus itself.
pub const SYSTEM_COLLECTION_PREFIX: &str = "directus_";

/// Name of the built-in languages collection.
pub const LANGUAGES_COLLECTION: &str = "languages";

/// Whether a collection is managed by the system and must never be migrated.
pub fn is_system_collection(name: &str) -> bool {
    name.starts_with(SYSTEM_COLLECTION_PREFIX) || name == LANGUAGES_COLLECTION
}

/// Standard Directus response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// An entity with a user-editable `meta` block.
pub trait SchemaEntity {
    /// The `meta` record of this entity kind.
    type Meta: PartialEq;

    /// The entity's `meta` block, if the server returned one.
    fn meta(&self) -> Option<&Self::Meta>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_collections() {
        assert!(is_system_collection("directus_users"));
        assert!(is_system_collection("directus_files"));
        assert!(is_system_collection("languages"));
        assert!(!is_system_collection("articles"));
        assert!(!is_system_collection("languages_translations"));
        assert!(!is_system_collection("my_directus_things"));
    }

    #[test]
    fn test_data_envelope() {
        let envelope: DataEnvelope<Vec<Collection>> =
            serde_json::from_str(r#"{"data": [{"collection": "articles"}]}"#).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].collection, "articles");
    }

    #[test]
    fn test_null_unmodelled_meta_key_equals_missing_key() {
        let with_null: FieldMeta =
            serde_json::from_str(r#"{"interface": "input", "future_key": null}"#).unwrap();
        let without: FieldMeta = serde_json::from_str(r#"{"interface": "input"}"#).unwrap();
        assert!(with_null.extra.is_empty());
        assert_eq!(with_null, without);

        let set: FieldMeta =
            serde_json::from_str(r#"{"interface": "input", "future_key": 1}"#).unwrap();
        assert_ne!(set, without);
    }

    #[test]
    fn test_null_unmodelled_key_ignored_on_every_meta_kind() {
        let collection: CollectionMeta = serde_json::from_str(r#"{"future_key": null}"#).unwrap();
        let relation: RelationMeta = serde_json::from_str(r#"{"future_key": null}"#).unwrap();
        assert_eq!(collection, CollectionMeta::default());
        assert_eq!(relation, RelationMeta::default());
    }
}
