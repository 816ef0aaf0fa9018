//! directus-migrate - copy a Directus data model between instances
//!
//! Reads collections, fields and relations from a source instance and
//! creates or updates them on a target instance. Row data is never touched.

use clap::Parser;

use directus_migrate::commands;
use directus_migrate::logging;

/// Migrate the Directus data model from one instance to another
#[derive(Parser)]
#[command(name = "directus-migrate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    migrate: commands::migrate::MigrateArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    match commands::migrate::execute(cli.migrate).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}
