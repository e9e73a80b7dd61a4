//! # colgen CLI
//!
//! Command-line interface for colgen.
//!
//! ## Commands
//!
//! - `generate` - Read a collection manifest and write the migration and
//!   query surface, optionally applying the migration
//! - `normalize` - Print the table identifier for each given name
//! - `sync` - Apply an existing migration file with `psql`
//!

pub mod commands;
pub mod config;
pub mod sync;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colgen_core::SchemaShape;

// Re-export dependencies for use in main.rs
pub use colgen_codegen;
pub use colgen_core;
pub use colgen_ir;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Command Surface
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "colgen")]
#[command(version)]
#[command(about = "Generate PostgreSQL migrations and Supabase query modules from a collection list")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Suppress the banner and decorative output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the migration and query surface from a manifest
    Generate(GenerateArgs),

    /// Print the table identifier each collection name normalizes to
    Normalize {
        /// Collection names
        #[arg(required = true)]
        names: Vec<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Apply a migration file to a database with psql
    Sync {
        /// Migration file to apply
        file: PathBuf,

        /// Database connection URL
        #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
        database_url: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Collection manifest (default: collections-info.json)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Schema shape: minimal or full
    #[arg(short, long)]
    pub shape: Option<SchemaShape>,

    /// Project label used in document headers
    #[arg(long)]
    pub project: Option<String>,

    /// Config file (default: ./colgen.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Leave out the utility routines
    #[arg(long)]
    pub no_utilities: bool,

    /// Only write the migration
    #[arg(long)]
    pub no_queries: bool,

    /// Reject names that do not normalize to plain SQL identifiers
    #[arg(long)]
    pub strict: bool,

    /// Omit the generation timestamp from headers and file names
    #[arg(long)]
    pub no_timestamp: bool,

    /// Replace existing output files
    #[arg(long)]
    pub overwrite: bool,

    /// Apply the migration with psql after writing it
    #[arg(long)]
    pub sync: bool,

    /// Database connection URL for --sync
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Emit a JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate(args) => commands::generate(args, cli.quiet).await,
        Command::Normalize { names, json } => commands::normalize(&names, json),
        Command::Sync { file, database_url } => {
            commands::sync(&file, database_url.as_deref()).await
        }
    }
}
