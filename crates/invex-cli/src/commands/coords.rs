//! Coords command - resolve and display a coordinate definition file.

use std::path::PathBuf;

use clap::Args;
use console::style;

use invex_core::CoordinateRegistry;

/// Arguments for the coords command.
#[derive(Args)]
pub struct CoordsArgs {
    /// Coordinate definition file
    #[arg(required = true)]
    file: PathBuf,
}

pub fn run(args: CoordsArgs) -> anyhow::Result<()> {
    if !args.file.exists() {
        anyhow::bail!("Coordinate file not found: {}", args.file.display());
    }

    let registry = CoordinateRegistry::load(&args.file);
    if registry.is_empty() {
        println!(
            "{} No complete regions found (each region needs a TL and a BR corner)",
            style("!").yellow()
        );
        return Ok(());
    }

    println!("{} {} region(s)", style("✓").green(), registry.len());
    for field in registry.fields() {
        println!(
            "  {:<20} page {:<3} x0={:<8} x1={:<8} yTop={:<8} yBottom={}",
            field.field,
            field.page + 1,
            field.x0,
            field.x1,
            field.y_top,
            field.y_bottom
        );
    }

    Ok(())
}
