//! CLI error types and exit codes

use directus_client::DirectusError;
use thiserror::Error;

use crate::migrate::MigrationAborted;

/// Exit codes for the CLI
/// - 0: Success
/// - 1: Configuration or input error
/// - 3: Network error
/// - 4: Validation error or rejected request
/// - 5: Server error
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error(transparent)]
    Client(#[from] DirectusError),

    #[error("Migration aborted: {0}")]
    Aborted(#[from] Box<MigrationAborted>),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::InputError(_) => 1,
            CliError::Validation(_) => 4,
            CliError::Client(e) => client_exit_code(e),
            CliError::Aborted(aborted) => client_exit_code(&aborted.source),
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    /// Get a suggested action for this error
    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::Config(_) => Some("Usage: directus-migrate <path/to/config.json>"),
            CliError::Aborted(aborted) if aborted.source.is_transport() => Some(
                "Check that both instances are reachable and run the migration again.",
            ),
            CliError::Aborted(_) => Some(
                "Fix the cause and run the migration again. Changes that were already applied are skipped.",
            ),
            _ => None,
        }
    }
}

fn client_exit_code(error: &DirectusError) -> i32 {
    match error {
        DirectusError::Transport { .. } => 3,
        DirectusError::InvalidConfiguration(_) => 1,
        DirectusError::Decode { .. } => 4,
        DirectusError::Api { .. } if error.is_server_error() => 5,
        DirectusError::Api { .. } => 4,
    }
}

impl From<MigrationAborted> for CliError {
    fn from(e: MigrationAborted) -> Self {
        CliError::Aborted(Box::new(e))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Config(format!("JSON error: {}", e))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::Config(format!("YAML error: {}", e))
    }
}
