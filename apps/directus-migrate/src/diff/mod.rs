//! Metadata diff between two schema snapshots
//!
//! Only `meta` blocks are compared. Entities that exist only in the target
//! are never reported.

pub mod engine;

pub use engine::{diff_by_key, diff_collections, diff_fields, diff_relations, MetaDiff};
