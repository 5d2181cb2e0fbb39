//! Run command - process an invoices root, folder by folder.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use invex_core::models::config::InvexConfig;
use invex_core::ExtractorService;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Invoices root containing one subfolder per batch
    #[arg(required = true)]
    invoices_dir: PathBuf,

    /// Coordinate definition file
    #[arg(short = 'd', long)]
    coordinates: Option<PathBuf>,

    /// Output directory (json/ and csv/ are created inside)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip the JSON projection
    #[arg(long)]
    no_json: bool,

    /// Skip the CSV projection
    #[arg(long)]
    no_csv: bool,
}

pub fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let mut config = if let Some(path) = config_path {
        InvexConfig::from_file(std::path::Path::new(path))?
    } else {
        InvexConfig::default()
    };
    config.paths.invoices_dir = args.invoices_dir;
    if let Some(coordinates) = args.coordinates {
        config.paths.coordinates_file = coordinates;
    }
    if let Some(output_dir) = args.output_dir {
        config.paths.outputs_dir = output_dir;
    }
    if args.no_json {
        config.output.json = false;
    }
    if args.no_csv {
        config.output.csv = false;
    }

    let outputs_dir = config.paths.outputs_dir.clone();
    let service = ExtractorService::new(config);

    // Overall progress bar, sized on the first callback
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let summary = service.run_with_progress(&mut |current, total| {
        progress.set_length(total as u64);
        progress.set_position(current as u64);
    })?;
    progress.finish_and_clear();

    let attempted = summary.documents_ok + summary.documents_failed;
    println!(
        "{} Processed {} document(s) in {:?}",
        style("✓").green(),
        attempted,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} folder(s) written to {}",
        style(summary.documents_ok).green(),
        style(summary.documents_failed).red(),
        summary.folders_written,
        outputs_dir.display()
    );

    if summary.documents_failed > 0 {
        println!();
        println!(
            "{}",
            style("Some documents failed; re-run with -v for details.").yellow()
        );
    }

    Ok(())
}
