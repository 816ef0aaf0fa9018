//! Collection models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Extra, Field, SchemaEntity};

/// A Directus collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique collection name.
    pub collection: String,

    /// Fields created together with the collection. Only used on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,

    /// Display and behavior configuration.
    #[serde(default)]
    pub meta: Option<CollectionMeta>,

    /// Storage attributes. `None` for folder collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<CollectionSchema>,
}

impl Collection {
    /// Create a collection with only a name.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            fields: None,
            meta: None,
            schema: None,
        }
    }

    /// Set the meta block.
    pub fn with_meta(mut self, meta: CollectionMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Set the schema block.
    pub fn with_schema(mut self, schema: CollectionSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Attach fields to create inline with the collection.
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = Some(fields);
        self
    }
}

impl SchemaEntity for Collection {
    type Meta = CollectionMeta;

    fn meta(&self) -> Option<&CollectionMeta> {
        self.meta.as_ref()
    }
}

/// Collection `meta` block.
///
/// `None` serializes as `null` so that pushing a meta block clears values the
/// source does not set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionMeta {
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub display_template: Option<String>,
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub singleton: Option<bool>,
    #[serde(default)]
    pub translations: Option<Value>,
    #[serde(default)]
    pub archive_field: Option<String>,
    #[serde(default)]
    pub archive_app_filter: Option<bool>,
    #[serde(default)]
    pub archive_value: Option<String>,
    #[serde(default)]
    pub unarchive_value: Option<String>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub accountability: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub item_duplication_fields: Option<Value>,
    #[serde(default)]
    pub sort: Option<i64>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub collapse: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub versioning: Option<bool>,
    #[serde(flatten, deserialize_with = "super::extra_without_nulls")]
    pub extra: Extra,
}

/// Collection `schema` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl CollectionSchema {
    /// Schema block for a table with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Body of `PATCH /collections/{name}`: only the meta block is sent.
#[derive(Debug, Serialize)]
pub struct CollectionMetaUpdate<'a> {
    pub meta: Option<&'a CollectionMeta>,
}

impl<'a> From<&'a Collection> for CollectionMetaUpdate<'a> {
    fn from(collection: &'a Collection) -> Self {
        Self {
            meta: collection.meta.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_unmodelled_keys() {
        let collection: Collection = serde_json::from_value(json!({
            "collection": "articles",
            "meta": {
                "collection": "articles",
                "icon": "article",
                "singleton": false,
                "some_future_key": {"a": 1}
            },
            "schema": {"name": "articles", "comment": null, "schema": "public"}
        }))
        .unwrap();

        let meta = collection.meta.as_ref().unwrap();
        assert_eq!(meta.icon.as_deref(), Some("article"));
        assert_eq!(meta.singleton, Some(false));
        assert_eq!(meta.extra.get("some_future_key"), Some(&json!({"a": 1})));

        let schema = collection.schema.as_ref().unwrap();
        assert_eq!(schema.name.as_deref(), Some("articles"));
        assert_eq!(schema.extra.get("schema"), Some(&json!("public")));
    }

    #[test]
    fn test_folder_collection_has_no_schema() {
        let collection: Collection =
            serde_json::from_value(json!({"collection": "folder", "meta": null, "schema": null}))
                .unwrap();
        assert!(collection.meta.is_none());
        assert!(collection.schema.is_none());

        let value = serde_json::to_value(&collection).unwrap();
        assert!(value.get("schema").is_none());
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn test_meta_equality_ignores_key_order() {
        let a: CollectionMeta =
            serde_json::from_value(json!({"icon": "article", "x": {"b": 1, "a": 2}})).unwrap();
        let b: CollectionMeta =
            serde_json::from_value(json!({"x": {"a": 2, "b": 1}, "icon": "article"})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_meta_equality_absent_equals_null() {
        let a: CollectionMeta = serde_json::from_value(json!({"icon": "article"})).unwrap();
        let b: CollectionMeta =
            serde_json::from_value(json!({"icon": "article", "note": null})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_meta_update_sends_only_meta() {
        let collection = Collection::new("articles")
            .with_meta(CollectionMeta {
                icon: Some("article".into()),
                ..CollectionMeta::default()
            })
            .with_schema(CollectionSchema::named("articles"));

        let body = serde_json::to_value(CollectionMetaUpdate::from(&collection)).unwrap();
        let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["meta".to_string()]);
        assert_eq!(body["meta"]["icon"], "article");
        assert!(body["meta"]["note"].is_null());
    }
}
