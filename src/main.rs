//! # Site Asset Optimizer - Main Entry Point
//!
//! This is the application's main entry point.
//!
//! ## Responsibilities:
//! - Command line parsing with `clap`
//! - Logging setup with `tracing`
//! - Input validation
//! - Loading the job manifest and starting the optimizer
//!
//! ## Execution flow:
//! 1. Parse the CLI arguments (asset directory, manifest, flags)
//! 2. Configure logging (INFO, or DEBUG with the verbose flag)
//! 3. Validate that the asset directory exists
//! 4. Load the job manifest, or fall back to the default job set
//! 5. Instantiate AssetOptimizer and run every job
//!
//! ## Usage example:
//! ```bash
//! asset-optimizer ./site --manifest jobs.json --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use site_asset_optimizer::{AssetOptimizer, Config};

#[derive(Parser)]
#[command(name = "asset-optimizer")]
#[command(about = "Minify CSS/JS and recompress images for a static site")]
struct Args {
    /// Directory containing the site assets
    asset_directory: PathBuf,

    /// JSON job manifest (uses the built-in job set when omitted or missing)
    #[arg(short, long, default_value = "asset-jobs.json")]
    manifest: PathBuf,

    /// Dry run - transform everything but don't write output files
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Validate arguments
    if !args.asset_directory.exists() {
        return Err(anyhow::anyhow!(
            "Asset directory does not exist: {}",
            args.asset_directory.display()
        ));
    }

    let mut config = Config::from_file(&args.manifest).await?;
    if args.dry_run {
        config.dry_run = true;
    }

    let optimizer = AssetOptimizer::new(&args.asset_directory, config)?;
    let stats = optimizer.run().await?;

    if stats.errors > 0 {
        info!("Completed with {} failed job(s)", stats.errors);
    }

    Ok(())
}
