//! sidenav CLI - Documentation sidebar checker.
//!
//! Provides commands for:
//! - `check`: Build the configured sidebars and report a summary or the errors
//! - `show`: Print the normalized sidebars as JSON or YAML
//! - `docs`: Print the doc ids referenced by the sidebars

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, DocsArgs, ShowArgs};
use output::Output;

/// sidenav - Documentation sidebar checker.
#[derive(Parser)]
#[command(name = "sidenav", version, about)]
struct Cli {
    /// Enable verbose output (show build logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the sidebars and report problems.
    Check(CheckArgs),
    /// Print the normalized sidebars.
    Show(ShowArgs),
    /// Print referenced doc ids, one per line.
    Docs(DocsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Show(args) => args.execute(),
        Commands::Docs(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
