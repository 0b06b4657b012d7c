//! `ImageDiff` CLI - Command-line interface for scanline image diffs

pub mod commands;

use std::path::PathBuf;

use clap::Parser;
use commands::OutputFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imagediff")]
#[command(about = "ImageDiff: row-by-row visual diff of two images", long_about = None)]
#[command(version)]
struct Cli {
    /// Original image
    image1: PathBuf,

    /// Changed image
    image2: PathBuf,

    /// Output PNG file
    #[arg(short, long, default_value = "diff.png")]
    output: PathBuf,

    /// Summary format (text, json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Suppress the summary
    #[arg(short, long)]
    quiet: bool,
}

/// Run the `ImageDiff` CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::diff::compare(&cli.image1, &cli.image2, &cli.output, cli.format, cli.quiet)?;

    Ok(())
}
