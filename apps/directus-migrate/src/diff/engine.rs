//! Diff engine for schema snapshots
//!
//! Partitions source entities into those missing from the target and those
//! whose `meta` block drifted. Comparison is structural: unordered on object
//! keys, ordered on arrays.

use std::collections::HashMap;

use directus_client::{is_system_collection, Collection, Field, Relation, SchemaEntity};

/// Outcome of comparing one kind of entity between source and target.
#[derive(Debug)]
pub struct MetaDiff<'a, T> {
    /// Source entities with no target counterpart, in source order.
    pub to_create: Vec<&'a T>,
    /// Source entities whose `meta` differs from the target's, in source order.
    pub to_update: Vec<&'a T>,
    /// Source entities already in sync.
    pub unchanged: usize,
}

impl<'a, T> MetaDiff<'a, T> {
    fn new() -> Self {
        Self {
            to_create: Vec::new(),
            to_update: Vec::new(),
            unchanged: 0,
        }
    }

    /// Check if there is nothing to do.
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty()
    }

    /// Number of entities that need a write.
    pub fn pending(&self) -> usize {
        self.to_create.len() + self.to_update.len()
    }
}

/// Compare source and target entities matched by `key`.
///
/// Target-only keys are ignored.
pub fn diff_by_key<'a, 'b, T, F>(
    source: impl IntoIterator<Item = &'a T>,
    target: impl IntoIterator<Item = &'b T>,
    key: F,
) -> MetaDiff<'a, T>
where
    T: SchemaEntity + 'a + 'b,
    F: Fn(&T) -> &str,
{
    let target_map: HashMap<&str, &T> = target.into_iter().map(|t| (key(t), t)).collect();

    let mut diff = MetaDiff::new();
    for entity in source {
        match target_map.get(key(entity)) {
            None => diff.to_create.push(entity),
            Some(existing) if entity.meta() != existing.meta() => diff.to_update.push(entity),
            Some(_) => diff.unchanged += 1,
        }
    }
    diff
}

/// Compare collections by name. System collections are never classified.
pub fn diff_collections<'a>(
    source: &'a [Collection],
    target: &[Collection],
) -> MetaDiff<'a, Collection> {
    diff_by_key(
        source
            .iter()
            .filter(|c| !is_system_collection(&c.collection)),
        target
            .iter()
            .filter(|c| !is_system_collection(&c.collection)),
        |c| c.collection.as_str(),
    )
}

/// Compare the fields of one collection by field name.
pub fn diff_fields<'a>(source: &'a [Field], target: &[Field]) -> MetaDiff<'a, Field> {
    diff_by_key(source, target, |f| f.field.as_str())
}

/// Compare the relations of one collection by their "many" field.
pub fn diff_relations<'a>(source: &'a [Relation], target: &[Relation]) -> MetaDiff<'a, Relation> {
    diff_by_key(source, target, |r| r.field.as_str())
}
