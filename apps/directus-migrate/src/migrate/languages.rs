//! Bootstrap definition of the `languages` collection
//!
//! Translation interfaces expect this collection on every instance. It is
//! created before any user collection when the target lacks it.

use directus_client::{
    Collection, CollectionMeta, CollectionSchema, Field, FieldMeta, FieldSchema,
    LANGUAGES_COLLECTION,
};
use serde_json::json;

/// The `languages` collection with its two fields inline.
pub fn languages_collection() -> Collection {
    Collection::new(LANGUAGES_COLLECTION)
        .with_meta(CollectionMeta {
            collection: Some(LANGUAGES_COLLECTION.to_string()),
            icon: Some("translate".to_string()),
            display_template: Some("{{name}}".to_string()),
            singleton: Some(false),
            archive_app_filter: Some(true),
            ..Default::default()
        })
        .with_schema(CollectionSchema::named(LANGUAGES_COLLECTION))
        .with_fields(vec![code_field(), name_field()])
}

fn code_field() -> Field {
    Field::new("code", "string")
        .with_meta(FieldMeta {
            interface: Some("input".to_string()),
            options: Some(json!({ "iconLeft": "vpn_key" })),
            width: Some("half".to_string()),
            hidden: Some(false),
            readonly: Some(false),
            ..Default::default()
        })
        .with_schema(FieldSchema {
            max_length: Some(255),
            is_primary_key: Some(true),
            has_auto_increment: Some(false),
            ..Default::default()
        })
}

fn name_field() -> Field {
    Field::new("name", "string")
        .with_meta(FieldMeta {
            interface: Some("input".to_string()),
            options: Some(json!({ "iconLeft": "translate" })),
            width: Some("half".to_string()),
            ..Default::default()
        })
        .with_schema(FieldSchema {
            is_nullable: Some(true),
            is_unique: Some(false),
            ..Default::default()
        })
}
