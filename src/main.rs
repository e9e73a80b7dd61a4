//! colgen
//!
//! Collection schema and query-surface generator for PostgreSQL/Supabase.
//!
//! This is the command-line entry point. Argument handling and the commands
//! themselves live in `colgen_cli`.

use clap::Parser;
use colgen_cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner
    if !cli.quiet {
        eprintln!();
        eprintln!("╔═══════════════════════════════════════════════════════════╗");
        eprintln!("║   colgen v{:<48}║", colgen_cli::VERSION);
        eprintln!("║   PostgreSQL schemas and Supabase queries from collections║");
        eprintln!("╚═══════════════════════════════════════════════════════════╝");
        eprintln!();
    }

    colgen_cli::run(cli).await
}
