use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use firmware_organizer_core::{
    clean_destination, organize_with_callback, render_discovery, render_progress_line,
    render_run_summary, render_version_summary, LocalFileSystem, OrganizeError, OrganizeEvent,
    OrganizeReport, OrganizerConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "firmware-organizer",
    version,
    about = "Copy compiled firmware binaries into a version and board-category folder tree."
)]
struct Cli {
    /// Remove the destination tree before organizing.
    #[arg(long)]
    clean: bool,

    /// Directory holding the compiled firmware files.
    #[arg(long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// Destination root for the organized tree.
    #[arg(long, value_name = "DIR")]
    dest: Option<PathBuf>,

    /// JSON file overriding organizer settings and category rules.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a JSON run report to this file.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    println!("WLED Firmware Organizer");
    println!("{}", "=".repeat(60));

    match run_organize_command(cli) {
        Ok(()) => {
            println!("\nFirmware organization completed successfully!");
            println!("\nNext steps:");
            println!("   - Upload firmware files from the organized folders to your devices");
            println!("   - Use PlatformIO to flash specific builds: pio run -e <env> --target upload");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("ERROR: {err:#}");
            if let Some(hint) = err
                .downcast_ref::<OrganizeError>()
                .and_then(OrganizeError::hint)
            {
                println!("INFO: {hint}");
            }
            println!("\nFirmware organization failed!");
            ExitCode::FAILURE
        }
    }
}

fn run_organize_command(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let fs = LocalFileSystem;

    if cli.clean {
        if let Some(notice) = run_clean_step(&fs, &config.dest_dir)? {
            println!("{notice}");
        }
    }

    let listing_limit = config.listing_limit;
    let report = organize_with_callback(&config, &fs, |event| match event {
        OrganizeEvent::HeaderFallback { version } => {
            println!("No version detected from filenames, using header version: {version}");
        }
        OrganizeEvent::Discovered {
            total_files,
            groups,
        } => print!("{}", render_discovery(*total_files, groups)),
        OrganizeEvent::VersionStarted { version } => println!("\nProcessing version {version}..."),
        OrganizeEvent::FileProcessed(outcome) => println!("{}", render_progress_line(outcome)),
        OrganizeEvent::VersionFinished(summary) => {
            print!("{}", render_version_summary(summary, listing_limit))
        }
    })?;

    let dest_display = config
        .dest_dir
        .canonicalize()
        .unwrap_or_else(|_| config.dest_dir.clone());
    print!("{}", render_run_summary(&report, &dest_display));

    if let Some(path) = cli.report {
        write_report(&report, &path)?;
        println!("Run report written to {}", path.display());
    }

    Ok(())
}

fn run_clean_step(fs: &LocalFileSystem, dest_dir: &Path) -> Result<Option<String>> {
    let removed = clean_destination(fs, dest_dir)
        .with_context(|| format!("failed to clean {}", dest_dir.display()))?;
    Ok(removed.then(|| format!("Cleaned existing destination folder {}", dest_dir.display())))
}

fn load_config(cli: &Cli) -> Result<OrganizerConfig> {
    let mut config = match &cli.config {
        Some(path) => OrganizerConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => OrganizerConfig::default(),
    };
    if let Some(source) = &cli.source {
        config.source_dir = source.clone();
    }
    if let Some(dest) = &cli.dest {
        config.dest_dir = dest.clone();
    }
    Ok(config)
}

fn write_report(report: &OrganizeReport, path: &Path) -> Result<()> {
    let payload = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    fs::write(path, payload)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
