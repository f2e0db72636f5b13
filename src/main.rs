//! pafx2msi - CLI tool to convert PAFX antenna pattern archives to MSI files.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pafx2msi_rs::batch::{self, Conversion};
use pafx2msi_rs::config::{ConvertOptions, COMMENT, COPYRIGHT, USAGE, VERSION};

/// Convert PAFX antenna pattern archives to MSI format.
#[derive(Parser, Debug)]
#[command(name = "pafx2msi")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Glob selecting the PAFX archives, e.g. "data/*.pafx"
    pattern: Option<String>,

    /// Extra positional arguments (ignored)
    #[arg(hide = true)]
    extra: Vec<String>,

    /// Print usage and exit
    #[arg(short, long)]
    help: bool,

    /// Parent directory for the per-antenna output folders
    /// (defaults to each archive's directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print parsed archives as JSON instead of writing MSI files
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("{}", VERSION);
    println!("{}", COPYRIGHT);

    let Some(pattern) = args.pattern.as_deref().filter(|_| !args.help) else {
        println!("{}", COMMENT);
        println!("{}", USAGE);
        return Ok(());
    };

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if !args.extra.is_empty() {
        warn!(
            "Ignoring {} extra argument(s); quote the glob to stop the shell expanding it",
            args.extra.len()
        );
    }

    let options = ConvertOptions {
        save_msi: !args.debug,
        output_root: args.output,
    };

    let conversions = convert_matching(pattern, &options)?;

    // Debug output
    if args.debug {
        let json = serde_json::to_string_pretty(&conversions)
            .context("Failed to serialize parsed archives")?;
        println!("{}", json);
        return Ok(());
    }

    let written: usize = conversions.iter().map(|c| c.written.len()).sum();
    info!(
        "Converted {} archive(s) into {} MSI file(s)",
        conversions.len(),
        written
    );

    Ok(())
}

/// Run the batch conversion, naming the glob in any failure.
fn convert_matching(pattern: &str, options: &ConvertOptions) -> Result<Vec<Conversion>> {
    batch::run(pattern, options)
        .with_context(|| format!("Failed to convert PAFX files matching {}", pattern))
}
