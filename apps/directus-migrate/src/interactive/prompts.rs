//! Migration order prompts.
//!
//! Foreign-key dependencies between collections are not resolved
//! automatically. The order in which collections are migrated is chosen by a
//! human, one collection at a time, or supplied up front.

use std::collections::{HashSet, VecDeque};
use std::io::IsTerminal;

use dialoguer::Select;
use directus_client::Collection;

use crate::error::{CliError, CliResult};

/// Checks if both stdin and stdout are connected to a terminal.
pub fn is_interactive_terminal() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Requires an interactive terminal, returning an error if not available.
pub fn require_interactive() -> CliResult<()> {
    if !is_interactive_terminal() {
        return Err(CliError::Validation(
            "Choosing the migration order requires a terminal.\n\
             Use --order or the `order` config key for scripting."
                .into(),
        ));
    }
    Ok(())
}

/// Source of the next collection to migrate.
pub trait OrderResolver {
    /// Pick one name out of `remaining`, which is never empty.
    fn next_collection(&mut self, remaining: &[String]) -> CliResult<String>;
}

/// Asks the user through a select list.
#[derive(Debug, Default)]
pub struct PromptOrder;

impl OrderResolver for PromptOrder {
    fn next_collection(&mut self, remaining: &[String]) -> CliResult<String> {
        let index = Select::new()
            .with_prompt("Next collection:")
            .items(remaining)
            .default(0)
            .interact()
            .map_err(|e| CliError::InputError(e.to_string()))?;

        remaining
            .get(index)
            .cloned()
            .ok_or_else(|| CliError::InputError(format!("no collection at index {index}")))
    }
}

/// Replays an order given up front.
#[derive(Debug, Clone)]
pub struct PresetOrder {
    order: VecDeque<String>,
}

impl PresetOrder {
    pub fn new(order: impl IntoIterator<Item = String>) -> Self {
        Self {
            order: order.into_iter().collect(),
        }
    }

    /// Check that the order names every available collection exactly once.
    pub fn validate(&self, available: &[String]) -> CliResult<()> {
        let mut seen = HashSet::new();
        let duplicates: Vec<&str> = self
            .order
            .iter()
            .filter(|name| !seen.insert(name.as_str()))
            .map(String::as_str)
            .collect();

        let known: HashSet<&str> = available.iter().map(String::as_str).collect();
        let unknown: Vec<&str> = self
            .order
            .iter()
            .map(String::as_str)
            .filter(|name| !known.contains(name))
            .collect();
        let missing: Vec<&str> = available
            .iter()
            .map(String::as_str)
            .filter(|name| !seen.contains(name))
            .collect();

        let mut problems = Vec::new();
        if !duplicates.is_empty() {
            problems.push(format!("listed more than once: {}", duplicates.join(", ")));
        }
        if !unknown.is_empty() {
            problems.push(format!("not in the source: {}", unknown.join(", ")));
        }
        if !missing.is_empty() {
            problems.push(format!("missing from the order: {}", missing.join(", ")));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CliError::Config(format!(
                "invalid migration order ({})",
                problems.join("; ")
            )))
        }
    }
}

impl OrderResolver for PresetOrder {
    fn next_collection(&mut self, remaining: &[String]) -> CliResult<String> {
        self.order.pop_front().ok_or_else(|| {
            CliError::Config(format!(
                "migration order ends before: {}",
                remaining.join(", ")
            ))
        })
    }
}

/// Build the migration order by asking `resolver` until no collection is left.
///
/// The result is a permutation of `collections`.
pub fn resolve_order(
    collections: Vec<Collection>,
    resolver: &mut dyn OrderResolver,
) -> CliResult<Vec<Collection>> {
    let mut remaining = collections;
    let mut ordered = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let names: Vec<String> = remaining.iter().map(|c| c.collection.clone()).collect();
        let next = resolver.next_collection(&names)?;

        let index = names.iter().position(|n| *n == next).ok_or_else(|| {
            CliError::Validation(format!("'{next}' is not one of the remaining collections"))
        })?;
        ordered.push(remaining.remove(index));
    }

    Ok(ordered)
}
