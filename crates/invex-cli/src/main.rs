//! CLI application for invoice metadata extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{coords, inspect, run};

/// Extract structured invoice metadata from batches of PDF documents
#[derive(Parser)]
#[command(name = "invex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every batch subfolder of an invoices root
    Run(run::RunArgs),

    /// Extract a single PDF and print its metadata
    Inspect(inspect::InspectArgs),

    /// Parse a coordinate definition file and show the resolved regions
    Coords(coords::CoordsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Run(args) => run::run(args, cli.config.as_deref()),
        Commands::Inspect(args) => inspect::run(args, cli.config.as_deref()),
        Commands::Coords(args) => coords::run(args),
    }
}
