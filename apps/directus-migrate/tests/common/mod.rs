//! Shared fixtures for directus-migrate integration tests
//!
//! `FakeAccessor` keeps a schema in memory, applies writes to it and records
//! every successful write, so a second migration run sees the result of the
//! first.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use directus_client::{
    is_system_collection, Collection, CollectionMeta, CollectionSchema, DirectusError,
    DirectusResult, Field, FieldMeta, FieldSchema, Relation, RelationMeta, SchemaAccessor,
};
use directus_migrate::progress::ProgressReporter;
use serde_json::json;

// ============================================================================
// Fake accessor
// ============================================================================

/// A write that reached the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    CreateCollection { name: String, inline_fields: Vec<String> },
    UpdateCollection(String),
    DeleteCollection(String),
    CreateField(String, String),
    UpdateField(String, String),
    DeleteField(String, String),
    CreateRelation(String, String),
    UpdateRelation(String, String),
}

impl Write {
    fn kind(&self) -> &'static str {
        match self {
            Write::CreateCollection { .. } => "create_collection",
            Write::UpdateCollection(_) => "update_collection",
            Write::DeleteCollection(_) => "delete_collection",
            Write::CreateField(..) => "create_field",
            Write::UpdateField(..) => "update_field",
            Write::DeleteField(..) => "delete_field",
            Write::CreateRelation(..) => "create_relation",
            Write::UpdateRelation(..) => "update_relation",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub collections: Vec<Collection>,
    pub fields: BTreeMap<String, Vec<Field>>,
    pub relations: BTreeMap<String, Vec<Relation>>,
}

pub struct FakeAccessor {
    name: String,
    state: Mutex<Snapshot>,
    writes: Mutex<Vec<Write>>,
    reads: Mutex<Vec<String>>,
    fail_on: Mutex<Option<(&'static str, String)>>,
}

impl FakeAccessor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Mutex::new(Snapshot::default()),
            writes: Mutex::new(Vec::new()),
            reads: Mutex::new(Vec::new()),
            fail_on: Mutex::new(None),
        }
    }

    /// A target that already has the languages collection.
    pub fn with_languages(name: &str) -> Self {
        let fake = Self::new(name);
        fake.add_collection(Collection::new("languages").with_meta(CollectionMeta {
            icon: Some("translate".to_string()),
            ..Default::default()
        }));
        fake
    }

    pub fn add_collection(&self, collection: Collection) {
        self.state.lock().unwrap().collections.push(collection);
    }

    pub fn add_field(&self, collection: &str, field: Field) {
        self.state
            .lock()
            .unwrap()
            .fields
            .entry(collection.to_string())
            .or_default()
            .push(field.in_collection(collection));
    }

    pub fn add_relation(&self, relation: Relation) {
        self.state
            .lock()
            .unwrap()
            .relations
            .entry(relation.collection.clone())
            .or_default()
            .push(relation);
    }

    /// Make the write of `kind` ("update_relation", ...) whose target
    /// contains `key` fail with a 400.
    pub fn fail_on(&self, kind: &'static str, key: &str) {
        *self.fail_on.lock().unwrap() = Some((kind, key.to_string()));
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().unwrap().clone()
    }

    pub fn collection(&self, name: &str) -> Option<Collection> {
        self.snapshot()
            .collections
            .into_iter()
            .find(|c| c.collection == name)
    }

    pub fn fields(&self, collection: &str) -> Vec<Field> {
        self.snapshot()
            .fields
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn relations(&self, collection: &str) -> Vec<Relation> {
        self.snapshot()
            .relations
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn read(&self, what: String) {
        self.reads.lock().unwrap().push(what);
    }

    fn record(&self, write: Write, key: &str) -> DirectusResult<()> {
        if let Some((kind, fail_key)) = self.fail_on.lock().unwrap().as_ref() {
            if *kind == write.kind() && key.contains(fail_key.as_str()) {
                return Err(DirectusError::Api {
                    method: "PATCH",
                    path: key.to_string(),
                    status: 400,
                    body: r#"{"errors":[{"message":"rejected"}]}"#.to_string(),
                });
            }
        }
        self.writes.lock().unwrap().push(write);
        Ok(())
    }
}

#[async_trait]
impl SchemaAccessor for FakeAccessor {
    fn display_name(&self) -> &str {
        &self.name
    }

    async fn list_collections(&self) -> Vec<Collection> {
        self.read("collections".to_string());
        self.snapshot()
            .collections
            .into_iter()
            .filter(|c| !is_system_collection(&c.collection))
            .collect()
    }

    async fn get_collection(&self, name: &str) -> Option<Collection> {
        self.read(format!("collections/{name}"));
        self.collection(name)
    }

    async fn create_collection(&self, collection: &Collection) -> DirectusResult<()> {
        let inline = collection.fields.clone().unwrap_or_default();
        self.record(
            Write::CreateCollection {
                name: collection.collection.clone(),
                inline_fields: inline.iter().map(|f| f.field.clone()).collect(),
            },
            &collection.collection,
        )?;

        let mut stored = collection.clone();
        stored.fields = None;
        let mut state = self.state.lock().unwrap();
        state.collections.push(stored);
        state
            .fields
            .entry(collection.collection.clone())
            .or_default()
            .extend(inline.into_iter().map(|f| f.in_collection(&collection.collection)));
        Ok(())
    }

    async fn update_collection(&self, collection: &Collection) -> DirectusResult<()> {
        self.record(
            Write::UpdateCollection(collection.collection.clone()),
            &collection.collection,
        )?;
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .collections
            .iter_mut()
            .find(|c| c.collection == collection.collection)
        {
            existing.meta = collection.meta.clone();
        }
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> DirectusResult<()> {
        self.record(Write::DeleteCollection(name.to_string()), name)?;
        let mut state = self.state.lock().unwrap();
        state.collections.retain(|c| c.collection != name);
        state.fields.remove(name);
        Ok(())
    }

    async fn list_fields(&self, collection: &str, primary_key: bool) -> Vec<Field> {
        self.read(format!("fields/{collection}?pk={primary_key}"));
        self.fields(collection)
            .into_iter()
            .filter(|f| f.is_primary_key() == primary_key)
            .map(Field::without_server_id)
            .collect()
    }

    async fn create_field(&self, collection: &str, field: &Field) -> DirectusResult<()> {
        let key = format!("{collection}.{}", field.field);
        self.record(
            Write::CreateField(collection.to_string(), field.field.clone()),
            &key,
        )?;
        self.add_field(collection, field.clone());
        Ok(())
    }

    async fn update_field(&self, collection: &str, field: &Field) -> DirectusResult<()> {
        let key = format!("{collection}.{}", field.field);
        self.record(
            Write::UpdateField(collection.to_string(), field.field.clone()),
            &key,
        )?;
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .fields
            .get_mut(collection)
            .and_then(|fields| fields.iter_mut().find(|f| f.field == field.field))
        {
            existing.meta = field.meta.clone();
        }
        Ok(())
    }

    async fn delete_field(&self, collection: &str, field: &str) -> DirectusResult<()> {
        let key = format!("{collection}.{field}");
        self.record(
            Write::DeleteField(collection.to_string(), field.to_string()),
            &key,
        )?;
        if let Some(fields) = self.state.lock().unwrap().fields.get_mut(collection) {
            fields.retain(|f| f.field != field);
        }
        Ok(())
    }

    async fn list_relations(&self, collection: &str) -> Vec<Relation> {
        self.read(format!("relations/{collection}"));
        self.relations(collection)
            .into_iter()
            .map(Relation::without_server_id)
            .collect()
    }

    async fn create_relation(&self, relation: &Relation) -> DirectusResult<()> {
        let key = format!("{}.{}", relation.collection, relation.field);
        self.record(
            Write::CreateRelation(relation.collection.clone(), relation.field.clone()),
            &key,
        )?;
        self.add_relation(relation.clone());
        Ok(())
    }

    async fn update_relation(&self, relation: &Relation) -> DirectusResult<()> {
        let key = format!("{}.{}", relation.collection, relation.field);
        self.record(
            Write::UpdateRelation(relation.collection.clone(), relation.field.clone()),
            &key,
        )?;
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .relations
            .get_mut(&relation.collection)
            .and_then(|relations| relations.iter_mut().find(|r| r.field == relation.field))
        {
            existing.meta = relation.meta.clone();
        }
        Ok(())
    }
}

// ============================================================================
// Progress recorder
// ============================================================================

#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub total: Option<u64>,
    pub start_message: Option<String>,
    pub increments: Vec<Option<String>>,
    pub finished: bool,
}

impl ProgressReporter for RecordingProgress {
    fn start(&mut self, total: u64, message: &str) {
        self.total = Some(total);
        self.start_message = Some(message.to_string());
    }

    fn increment(&mut self, message: Option<&str>) {
        self.increments.push(message.map(String::from));
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

// ============================================================================
// Schema fixtures
// ============================================================================

pub fn collection(name: &str, icon: &str) -> Collection {
    Collection::new(name)
        .with_meta(CollectionMeta {
            collection: Some(name.to_string()),
            icon: Some(icon.to_string()),
            ..Default::default()
        })
        .with_schema(CollectionSchema::named(name))
}

/// Auto-increment integer `id`, as the server creates it.
pub fn pk_field(collection: &str) -> Field {
    Field::new("id", "integer")
        .in_collection(collection)
        .with_meta(FieldMeta {
            id: Some(json!(1)),
            collection: Some(collection.to_string()),
            field: Some("id".to_string()),
            interface: Some("input".to_string()),
            hidden: Some(true),
            readonly: Some(true),
            ..Default::default()
        })
        .with_schema(FieldSchema {
            is_primary_key: Some(true),
            has_auto_increment: Some(true),
            ..Default::default()
        })
}

pub fn field(collection: &str, name: &str, interface: &str) -> Field {
    Field::new(name, "string")
        .in_collection(collection)
        .with_meta(FieldMeta {
            collection: Some(collection.to_string()),
            field: Some(name.to_string()),
            interface: Some(interface.to_string()),
            ..Default::default()
        })
        .with_schema(FieldSchema {
            max_length: Some(255),
            is_nullable: Some(true),
            ..Default::default()
        })
}

pub fn relation(collection: &str, field: &str, related: &str, sort_field: Option<&str>) -> Relation {
    Relation::new(collection, field, related).with_meta(RelationMeta {
        many_collection: Some(collection.to_string()),
        many_field: Some(field.to_string()),
        one_collection: Some(related.to_string()),
        sort_field: sort_field.map(String::from),
        ..Default::default()
    })
}
