//! Migration configuration
//!
//! A run is described by one JSON (or YAML) document:
//!
//! ```json
//! {
//!   "dryRun": false,
//!   "source": { "url": "https://old.example.com", "token": "..." },
//!   "target": { "url": "https://new.example.com", "token": "..." }
//! }
//! ```

use directus_client::DirectusConfig;
use serde::Deserialize;
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Environment variable overriding the source token.
pub const SOURCE_TOKEN_ENV: &str = "DIRECTUS_MIGRATE_SOURCE_TOKEN";

/// Environment variable overriding the target token.
pub const TARGET_TOKEN_ENV: &str = "DIRECTUS_MIGRATE_TARGET_TOKEN";

/// Everything a migration run needs, loaded once and never changed afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    /// Compute and report changes without writing to the target.
    #[serde(default, alias = "dry", alias = "dry_run")]
    pub dry_run: bool,

    /// Instance the schema is read from.
    pub source: DirectusConfig,

    /// Instance the schema is written to.
    pub target: DirectusConfig,

    /// Preset migration order. Skips the interactive prompt.
    #[serde(default)]
    pub order: Option<Vec<String>>,
}

impl MigrationConfig {
    /// Load and validate a configuration file.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else
    /// as JSON. Token overrides from the environment are applied before
    /// validation.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            _ => Self::from_json(&content)?,
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document.
    pub fn from_json(content: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a YAML document.
    pub fn from_yaml(content: &str) -> CliResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Replace tokens with the values of the override variables, when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_token_overrides(
            std::env::var(SOURCE_TOKEN_ENV).ok(),
            std::env::var(TARGET_TOKEN_ENV).ok(),
        );
    }

    pub fn apply_token_overrides(&mut self, source: Option<String>, target: Option<String>) {
        if let Some(token) = source.filter(|t| !t.is_empty()) {
            self.source.token = token;
        }
        if let Some(token) = target.filter(|t| !t.is_empty()) {
            self.target.token = token;
        }
    }

    /// Check both endpoints.
    pub fn validate(&self) -> CliResult<()> {
        self.source
            .validate()
            .map_err(|e| CliError::Config(format!("source: {}", e)))?;
        self.target
            .validate()
            .map_err(|e| CliError::Config(format!("target: {}", e)))?;

        if self.source.url.trim_end_matches('/') == self.target.url.trim_end_matches('/') {
            return Err(CliError::Config(
                "source and target point to the same instance".to_string(),
            ));
        }

        if let Some(order) = &self.order {
            if order.iter().any(|name| name.trim().is_empty()) {
                return Err(CliError::Config(
                    "order contains an empty collection name".to_string(),
                ));
            }
        }

        Ok(())
    }
}
