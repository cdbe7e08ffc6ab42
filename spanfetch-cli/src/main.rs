//! spanfetch - segmented multi-connection HTTP downloader
//!
//! Thin CLI over the `spanfetch` library: argument parsing, logging
//! setup, a progress bar, and start/finish reporting.

mod error;
mod progress;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use spanfetch::{DownloadConfig, Downloader};

use error::CliError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Download one HTTP resource over several parallel connections.
#[derive(Debug, Parser)]
#[command(name = "spanfetch", version, about)]
struct Cli {
    /// URL to download (plain http only).
    url: String,

    /// Output file path; defaults to the URL's last path segment.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel range workers.
    #[arg(short = 'n', long, default_value_t = 4)]
    workers: usize,

    /// Milliseconds between progress updates.
    #[arg(long, default_value_t = 1000)]
    poll_interval_ms: u64,

    /// Keep the per-range part files after merging.
    #[arg(long)]
    keep_parts: bool,

    /// Suppress the progress bar.
    #[arg(short, long)]
    quiet: bool,
}

/// Derive an output filename from the URL's last path segment.
fn default_output(url: &str) -> Result<PathBuf, CliError> {
    let path = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let path = path.split('?').next().unwrap_or(path);
    let segment = path.rsplit('/').next().unwrap_or("");
    if segment.is_empty() || !path.contains('/') {
        return Err(CliError::Usage(format!(
            "cannot derive an output filename from '{}'; use --output",
            url
        )));
    }
    Ok(PathBuf::from(segment))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let output = match cli.output {
        Some(path) => path,
        None => default_output(&cli.url)?,
    };
    let config = DownloadConfig::default()
        .with_workers(cli.workers)
        .with_poll_interval(Duration::from_millis(cli.poll_interval_ms))
        .with_keep_parts(cli.keep_parts);
    debug!(
        url = %cli.url,
        output = %output.display(),
        workers = config.workers,
        keep_parts = config.keep_parts,
        "resolved download request"
    );

    println!("started: {}", Local::now().format(TIMESTAMP_FORMAT));

    let (bar, callback) = if cli.quiet {
        (None, None)
    } else {
        let (bar, callback) = progress::progress_bar();
        (Some(bar), Some(callback))
    };

    let result = Downloader::with_config(config).download_with_progress(
        &cli.url,
        &output,
        callback,
    );
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    let report = result?;

    println!(
        "finished: {} ({} -> {})",
        Local::now().format(TIMESTAMP_FORMAT),
        report,
        output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
