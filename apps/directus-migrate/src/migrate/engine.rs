//! Schema reconciliation engine
//!
//! Runs in three passes against the target:
//!
//! 1. create the `languages` collection when it is missing;
//! 2. create missing collections (with their primary keys inline) and push
//!    drifted collection `meta`;
//! 3. for each collection in the chosen order, reconcile non-primary-key
//!    fields, then relations.
//!
//! Every call is awaited before the next one starts. The first failed write
//! stops the run.

use std::future::Future;

use directus_client::{
    is_system_collection, Collection, DirectusError, DirectusResult, SchemaAccessor,
    LANGUAGES_COLLECTION,
};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use super::languages::languages_collection;
use super::stats::MigrationStats;
use crate::diff::{diff_collections, diff_fields, diff_relations};
use crate::progress::ProgressReporter;

/// A write failed. Carries the counters accumulated before the failure.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct MigrationAborted {
    /// The write that failed, e.g. "create field 'articles.title'".
    pub operation: String,
    pub stats: MigrationStats,
    #[source]
    pub source: DirectusError,
}

struct WriteFailure {
    operation: String,
    source: DirectusError,
}

/// Reconciles the target schema with the source schema.
pub struct Migrator<'a> {
    source: &'a dyn SchemaAccessor,
    target: &'a dyn SchemaAccessor,
    dry_run: bool,
}

impl<'a> Migrator<'a> {
    pub fn new(source: &'a dyn SchemaAccessor, target: &'a dyn SchemaAccessor, dry_run: bool) -> Self {
        Self {
            source,
            target,
            dry_run,
        }
    }

    /// Migrate `order` (source collections, in the order to process them).
    ///
    /// In dry-run mode every decision and counter is computed but no write
    /// reaches the target.
    #[instrument(skip_all, fields(source = self.source.display_name(), target = self.target.display_name(), dry_run = self.dry_run))]
    pub async fn run(
        &self,
        order: &[Collection],
        progress: &mut dyn ProgressReporter,
    ) -> Result<MigrationStats, MigrationAborted> {
        let mut stats = MigrationStats::default();
        let result = self.reconcile(order, progress, &mut stats).await;
        progress.finish();

        match result {
            Ok(()) => {
                info!(changes = stats.total_changes(), "migration finished");
                Ok(stats)
            }
            Err(WriteFailure { operation, source }) => {
                error!(operation = %operation, error = %source, "migration aborted");
                Err(MigrationAborted {
                    operation,
                    stats,
                    source,
                })
            }
        }
    }

    async fn reconcile(
        &self,
        order: &[Collection],
        progress: &mut dyn ProgressReporter,
        stats: &mut MigrationStats,
    ) -> Result<(), WriteFailure> {
        let target_collections = self.target.list_collections().await;
        let languages_missing = self.target.get_collection(LANGUAGES_COLLECTION).await.is_none();
        let collections = diff_collections(order, &target_collections);
        let order: Vec<&Collection> = order
            .iter()
            .filter(|c| !is_system_collection(&c.collection))
            .collect();
        debug!(
            create = collections.to_create.len(),
            update = collections.to_update.len(),
            unchanged = collections.unchanged,
            languages_missing,
            "collection diff"
        );

        let total = order.len() + collections.pending() + 1 + usize::from(languages_missing);
        progress.start(
            total as u64,
            if languages_missing {
                "adding languages collection"
            } else {
                "adding collections"
            },
        );

        if languages_missing {
            let languages = languages_collection();
            self.apply(
                format!("create collection '{LANGUAGES_COLLECTION}'"),
                self.target.create_collection(&languages),
            )
            .await?;
            stats.languages = true;
            progress.increment(Some("adding collections"));
        }

        for collection in &collections.to_create {
            let name = &collection.collection;
            self.apply(format!("create collection '{name}'"), async {
                let payload = self.with_primary_keys(collection).await;
                self.target.create_collection(&payload).await
            })
            .await?;
            stats.collections.created += 1;
            progress.increment(Some("updating collections"));
        }

        for collection in &collections.to_update {
            self.apply(
                format!("update collection '{}'", collection.collection),
                self.target.update_collection(collection),
            )
            .await?;
            stats.collections.updated += 1;
            progress.increment(Some("updating fields"));
        }

        for collection in order {
            let name = collection.collection.as_str();
            progress.increment(Some(format!("migrating {name}").as_str()));
            self.migrate_fields(name, stats).await?;
            self.migrate_relations(name, stats).await?;
        }

        progress.increment(None);
        Ok(())
    }

    /// Copy of `collection` carrying its source primary-key fields.
    async fn with_primary_keys(&self, collection: &Collection) -> Collection {
        let primary_keys = self.source.list_fields(&collection.collection, true).await;
        if primary_keys.is_empty() {
            warn!(
                collection = %collection.collection,
                "no primary key found in source, creating without inline fields"
            );
        }
        collection.clone().with_fields(primary_keys)
    }

    async fn migrate_fields(
        &self,
        collection: &str,
        stats: &mut MigrationStats,
    ) -> Result<(), WriteFailure> {
        let source_fields = self.source.list_fields(collection, false).await;
        let target_fields = self.target.list_fields(collection, false).await;
        let diff = diff_fields(&source_fields, &target_fields);
        debug!(
            collection,
            create = diff.to_create.len(),
            update = diff.to_update.len(),
            "field diff"
        );

        for field in diff.to_create {
            self.apply(
                format!("create field '{collection}.{}'", field.field),
                self.target.create_field(collection, field),
            )
            .await?;
            stats.fields.created += 1;
        }

        for field in diff.to_update {
            self.apply(
                format!("update field '{collection}.{}'", field.field),
                self.target.update_field(collection, field),
            )
            .await?;
            stats.fields.updated += 1;
        }

        Ok(())
    }

    async fn migrate_relations(
        &self,
        collection: &str,
        stats: &mut MigrationStats,
    ) -> Result<(), WriteFailure> {
        let source_relations = self.source.list_relations(collection).await;
        let target_relations = self.target.list_relations(collection).await;
        let diff = diff_relations(&source_relations, &target_relations);
        debug!(
            collection,
            create = diff.to_create.len(),
            update = diff.to_update.len(),
            "relation diff"
        );

        for relation in diff.to_create {
            self.apply(
                format!("create relation '{collection}.{}'", relation.field),
                self.target.create_relation(relation),
            )
            .await?;
            stats.relations.created += 1;
        }

        for relation in diff.to_update {
            self.apply(
                format!("update relation '{collection}.{}'", relation.field),
                self.target.update_relation(relation),
            )
            .await?;
            stats.relations.updated += 1;
        }

        Ok(())
    }

    /// Await `write` unless this is a dry run. Futures are lazy, so a skipped
    /// write never touches the network.
    async fn apply(
        &self,
        operation: String,
        write: impl Future<Output = DirectusResult<()>>,
    ) -> Result<(), WriteFailure> {
        if self.dry_run {
            debug!(operation = %operation, "dry run, write skipped");
            return Ok(());
        }

        match write.await {
            Ok(()) => {
                info!(operation = %operation, "applied");
                Ok(())
            }
            Err(source) => Err(WriteFailure { operation, source }),
        }
    }
}
