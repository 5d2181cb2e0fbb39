//! Inspect command - extract metadata from a single invoice file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use invex_core::models::config::InvexConfig;
use invex_core::ExtractorService;

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Coordinate definition file
    #[arg(short = 'd', long)]
    coordinates: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let mut config = if let Some(path) = config_path {
        InvexConfig::from_file(std::path::Path::new(path))?
    } else {
        InvexConfig::default()
    };
    if let Some(coordinates) = args.coordinates {
        config.paths.coordinates_file = coordinates;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let service = ExtractorService::new(config);
    let record = service.process_document(&args.input)?;
    let output = serde_json::to_string_pretty(&record)?;

    if let Some(path) = &args.output {
        fs::write(path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
