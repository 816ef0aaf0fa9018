//! Logging setup using tracing.
//!
//! Logs go to stderr so that stdout only carries the migration report.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given verbosity flags.
///
/// `quiet` wins over any number of `-v`.
pub fn filter_directive(verbose: u8, quiet: bool) -> String {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    if level == "warn" || level == "error" {
        level.to_string()
    } else {
        format!("warn,directus_migrate={level},directus_client={level}")
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence over the flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let directive = filter_directive(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second initialization (e.g. from tests) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
