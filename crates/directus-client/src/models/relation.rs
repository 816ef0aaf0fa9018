//! Relation models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Extra, SchemaEntity};

/// A Directus relation, identified by its "many" side `(collection, field)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub collection: String,

    pub field: String,

    /// The "one" side. `None` for many-to-any relations.
    #[serde(default)]
    pub related_collection: Option<String>,

    /// Junction, allowed-collections and deselect configuration.
    #[serde(default)]
    pub meta: Option<RelationMeta>,

    /// Foreign-key constraint attributes.
    #[serde(default)]
    pub schema: Option<RelationSchema>,
}

impl Relation {
    /// Create a relation from `collection.field` to `related_collection`.
    pub fn new(
        collection: impl Into<String>,
        field: impl Into<String>,
        related_collection: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            field: field.into(),
            related_collection: Some(related_collection.into()),
            meta: None,
            schema: None,
        }
    }

    /// Set the meta block.
    pub fn with_meta(mut self, meta: RelationMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Set the schema block.
    pub fn with_schema(mut self, schema: RelationSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Drop the server-assigned `meta.id`.
    pub fn without_server_id(mut self) -> Self {
        if let Some(meta) = self.meta.as_mut() {
            meta.id = None;
        }
        self
    }
}

impl SchemaEntity for Relation {
    type Meta = RelationMeta;

    fn meta(&self) -> Option<&RelationMeta> {
        self.meta.as_ref()
    }
}

/// Relation `meta` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationMeta {
    /// Server-assigned row id. Read but never serialized.
    #[serde(default, skip_serializing)]
    pub id: Option<Value>,
    #[serde(default)]
    pub many_collection: Option<String>,
    #[serde(default)]
    pub many_field: Option<String>,
    #[serde(default)]
    pub one_collection: Option<String>,
    #[serde(default)]
    pub one_field: Option<String>,
    #[serde(default)]
    pub one_collection_field: Option<String>,
    /// Comma separated string or list, depending on server version.
    #[serde(default)]
    pub one_allowed_collections: Option<Value>,
    #[serde(default)]
    pub junction_field: Option<String>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub one_deselect_action: Option<String>,
    #[serde(flatten, deserialize_with = "super::extra_without_nulls")]
    pub extra: Extra,
}

/// Relation `schema` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `PATCH /relations/{collection}/{field}`.
#[derive(Debug, Serialize)]
pub struct RelationUpdate<'a> {
    pub collection: &'a str,
    pub field: &'a str,
    pub related_collection: Option<&'a str>,
    pub meta: Option<&'a RelationMeta>,
}

impl<'a> From<&'a Relation> for RelationUpdate<'a> {
    fn from(relation: &'a Relation) -> Self {
        Self {
            collection: &relation.collection,
            field: &relation.field,
            related_collection: relation.related_collection.as_deref(),
            meta: relation.meta.as_ref(),
        }
    }
}
