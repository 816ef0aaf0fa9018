//! Migrate the data model from the source instance to the target instance

use clap::Args;
use directus_client::{Collection, DirectusClient, SchemaAccessor};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::config::MigrationConfig;
use crate::error::{CliError, CliResult};
use crate::interactive::{
    is_interactive_terminal, require_interactive, resolve_order, PresetOrder, PromptOrder,
};
use crate::migrate::{MigrationAborted, MigrationStats, Migrator};
use crate::progress::{BarProgress, ProgressReporter, SilentProgress};

/// Copy collections, fields and relations from one Directus instance to another
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Path to the configuration file (JSON, or YAML with a .yaml/.yml extension)
    pub config: PathBuf,

    /// Report what would change without writing to the target
    #[arg(long)]
    pub dry_run: bool,

    /// Migration order as a comma-separated list of collections (skips the prompt)
    #[arg(long, value_delimiter = ',')]
    pub order: Option<Vec<String>>,

    /// Output the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Final report in `--json` mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub dry_run: bool,
    pub status: &'static str,
    pub stats: MigrationStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MigrationReport {
    pub fn new(dry_run: bool, outcome: &Result<MigrationStats, MigrationAborted>) -> Self {
        match outcome {
            Ok(stats) => Self {
                dry_run,
                status: "complete",
                stats: stats.clone(),
                error: None,
            },
            Err(aborted) => Self {
                dry_run,
                status: "aborted",
                stats: aborted.stats.clone(),
                error: Some(aborted.to_string()),
            },
        }
    }
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs) -> CliResult<()> {
    let config = load_config(&args)?;

    let source = DirectusClient::new(config.source.clone())?;
    let target = DirectusClient::new(config.target.clone())?;

    if !args.json {
        println!("{}", banner(config.dry_run));
    }

    let order = choose_order(&source, config.order.clone()).await?;
    info!(collections = order.len(), "migration order chosen");

    let mut progress: Box<dyn ProgressReporter> = if args.json || !is_interactive_terminal() {
        Box::new(SilentProgress)
    } else {
        Box::new(BarProgress::new())
    };

    let outcome = Migrator::new(&source, &target, config.dry_run)
        .run(&order, progress.as_mut())
        .await;

    report(outcome, config.dry_run, args.json)
}

/// Load the config file and apply command-line overrides.
pub fn load_config(args: &MigrateArgs) -> CliResult<MigrationConfig> {
    let mut config = MigrationConfig::load(&args.config)?;
    if args.dry_run {
        config.dry_run = true;
    }
    if let Some(order) = &args.order {
        config.order = Some(order.clone());
    }
    config.validate()?;
    Ok(config)
}

/// List the source collections and put them in migration order.
///
/// A preset order is checked against the source before anything is written.
/// Without one, the user is asked for each collection in turn.
pub async fn choose_order(
    source: &dyn SchemaAccessor,
    preset: Option<Vec<String>>,
) -> CliResult<Vec<Collection>> {
    let collections = source.list_collections().await;

    match preset {
        Some(order) => {
            let names: Vec<String> = collections.iter().map(|c| c.collection.clone()).collect();
            let mut preset = PresetOrder::new(order);
            preset.validate(&names)?;
            resolve_order(collections, &mut preset)
        }
        None => {
            if collections.is_empty() {
                return Ok(collections);
            }
            require_interactive()?;
            println!("Select migration order:");
            resolve_order(collections, &mut PromptOrder)
        }
    }
}

pub fn banner(dry_run: bool) -> String {
    if dry_run {
        "Migrate Directus data model [dry run]".to_string()
    } else {
        "Migrate Directus data model".to_string()
    }
}

/// Text output for a finished run.
pub fn completion_lines(stats: &MigrationStats, dry_run: bool) -> Vec<String> {
    let headline = if dry_run {
        "Dry run complete."
    } else {
        "Migration complete."
    };

    std::iter::once(headline.to_string())
        .chain(stats.summary_lines())
        .collect()
}

/// Print the outcome. An aborted run still prints what it managed to do.
fn report(outcome: Result<MigrationStats, MigrationAborted>, dry_run: bool, json: bool) -> CliResult<()> {
    if json {
        let report = MigrationReport::new(dry_run, &outcome);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    match outcome {
        Ok(stats) => {
            if !json {
                println!();
                for line in completion_lines(&stats, dry_run) {
                    println!("{}", line);
                }
            }
            Ok(())
        }
        Err(aborted) => {
            if !json && aborted.stats.has_changes() {
                println!();
                println!("Applied before the failure:");
                for line in aborted.stats.summary_lines() {
                    println!("  {}", line);
                }
            }
            Err(CliError::from(aborted))
        }
    }
}
