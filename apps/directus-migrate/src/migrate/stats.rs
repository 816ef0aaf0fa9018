//! Migration result accounting

use serde::Serialize;

/// Created/updated counters for one kind of entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub created: usize,
    pub updated: usize,
}

impl EntityCounts {
    pub fn total(&self) -> usize {
        self.created + self.updated
    }
}

/// What a run did (or, in dry-run mode, would have done).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStats {
    /// The languages collection was bootstrapped.
    pub languages: bool,
    pub collections: EntityCounts,
    pub fields: EntityCounts,
    pub relations: EntityCounts,
}

impl MigrationStats {
    /// Check if the run changed anything.
    pub fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }

    /// Number of writes, counting the languages bootstrap as one.
    pub fn total_changes(&self) -> usize {
        usize::from(self.languages)
            + self.collections.total()
            + self.fields.total()
            + self.relations.total()
    }

    /// One line per non-zero counter.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.languages {
            lines.push("Created languages collection.".to_string());
        }

        let counters = [
            ("Created", self.collections.created, "collections"),
            ("Updated", self.collections.updated, "collections"),
            ("Created", self.fields.created, "fields"),
            ("Updated", self.fields.updated, "fields"),
            ("Created", self.relations.created, "relations"),
            ("Updated", self.relations.updated, "relations"),
        ];
        for (verb, count, kind) in counters {
            if count > 0 {
                lines.push(format!("{verb} {count} {kind}."));
            }
        }
        lines
    }
}
