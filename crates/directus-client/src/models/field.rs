//! Field models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Extra, SchemaEntity};

/// A Directus field, identified by `(collection, field)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    pub field: String,

    /// Storage type (e.g. "string", "integer", "alias").
    #[serde(rename = "type")]
    pub field_type: String,

    /// Interface, display and validation configuration.
    #[serde(default)]
    pub meta: Option<FieldMeta>,

    /// Column attributes. `None` for alias fields.
    #[serde(default)]
    pub schema: Option<FieldSchema>,
}

impl Field {
    /// Create a field with a name and storage type.
    pub fn new(field: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            collection: None,
            field: field.into(),
            field_type: field_type.into(),
            meta: None,
            schema: None,
        }
    }

    /// Set the owning collection.
    pub fn in_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set the meta block.
    pub fn with_meta(mut self, meta: FieldMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Set the schema block.
    pub fn with_schema(mut self, schema: FieldSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Whether this field is the collection's primary key.
    pub fn is_primary_key(&self) -> bool {
        self.schema
            .as_ref()
            .and_then(|s| s.is_primary_key)
            .unwrap_or(false)
    }

    /// Drop the server-assigned `meta.id` so it is never compared or sent back.
    pub fn without_server_id(mut self) -> Self {
        if let Some(meta) = self.meta.as_mut() {
            meta.id = None;
        }
        self
    }
}

impl SchemaEntity for Field {
    type Meta = FieldMeta;

    fn meta(&self) -> Option<&FieldMeta> {
        self.meta.as_ref()
    }
}

/// Field `meta` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// Server-assigned row id. Read but never serialized.
    #[serde(default, skip_serializing)]
    pub id: Option<Value>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    /// A single special flag or a list of them.
    #[serde(default)]
    pub special: Option<Value>,
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub display_options: Option<Value>,
    #[serde(default)]
    pub readonly: Option<bool>,
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub sort: Option<i64>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub translations: Option<Value>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub conditions: Option<Value>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub validation: Option<Value>,
    #[serde(default)]
    pub validation_message: Option<String>,
    #[serde(flatten, deserialize_with = "super::extra_without_nulls")]
    pub extra: Extra,
}

/// Field `schema` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_precision: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_scale: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary_key: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_auto_increment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `PATCH /fields/{collection}/{field}`.
///
/// Carries the identity and type for the server's benefit; only `meta` is
/// meant to change.
#[derive(Debug, Serialize)]
pub struct FieldUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<&'a str>,
    pub field: &'a str,
    #[serde(rename = "type")]
    pub field_type: &'a str,
    pub meta: Option<&'a FieldMeta>,
}

impl<'a> From<&'a Field> for FieldUpdate<'a> {
    fn from(field: &'a Field) -> Self {
        Self {
            collection: field.collection.as_deref(),
            field: &field.field,
            field_type: &field.field_type,
            meta: field.meta.as_ref(),
        }
    }
}
