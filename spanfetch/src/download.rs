//! Download orchestration: range planning, worker launch, progress
//! polling, and ordered reassembly of part files.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use crate::config::DownloadConfig;
use crate::error::{TransferError, TransferResult};
use crate::http;
use crate::locator::Locator;
use crate::net::connect;
use crate::plan::{part_path, split_ranges};
use crate::progress::{ProgressCallback, TransferProgress};
use crate::worker::RangeWorker;

/// Summary of a completed download.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    /// Bytes written to the output file.
    pub total_bytes: u64,
    /// Number of ranges downloaded.
    pub parts: usize,
    /// Wall-clock start of the download.
    pub started_at: DateTime<Local>,
    /// Wall-clock end of the download.
    pub finished_at: DateTime<Local>,
    /// Elapsed time from start to finish.
    pub elapsed: Duration,
}

impl fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes in {} parts, {:.2}s",
            self.total_bytes,
            self.parts,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Download a URL to `output` with default settings.
pub fn download(url: &str, output: &Path) -> TransferResult<DownloadReport> {
    Downloader::new().download(url, output)
}

/// Orchestrates a segmented download.
///
/// One orchestrator thread plus `config.workers` worker threads spawned
/// directly (no pool, no async runtime). The orchestrator observes
/// worker state only through the shared atomic counters and the join
/// handles; workers never signal it directly.
#[derive(Debug, Default)]
pub struct Downloader {
    config: DownloadConfig,
}

impl Downloader {
    /// Create a downloader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a downloader with the given settings.
    pub fn with_config(config: DownloadConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Download `url` to `output` without progress reporting.
    pub fn download(&self, url: &str, output: &Path) -> TransferResult<DownloadReport> {
        self.download_with_progress(url, output, None)
    }

    /// Download `url` to `output`, reporting progress once per poll tick.
    ///
    /// The callback also receives one final snapshot after every worker
    /// has been joined, so it always observes the end state.
    pub fn download_with_progress(
        &self,
        url: &str,
        output: &Path,
        on_progress: Option<ProgressCallback>,
    ) -> TransferResult<DownloadReport> {
        let started_at = Local::now();
        let start = Instant::now();
        info!(url, output = %output.display(), "starting segmented download");

        let locator = Locator::parse(url)?;

        // Probe with an unranged request to learn the resource length.
        let total = {
            let mut conn = connect(&locator.host, locator.port)?;
            http::fetch_total_length(&mut conn, &locator)?
        };
        info!(total, "resource length detected");

        let ranges = split_ranges(total, self.config.workers);
        let progress = TransferProgress::new(ranges.len(), total);

        let mut part_paths = Vec::with_capacity(ranges.len());
        let mut handles: Vec<JoinHandle<TransferResult<u64>>> =
            Vec::with_capacity(ranges.len());
        for (index, range) in ranges.iter().enumerate() {
            let path = part_path(output, index);
            let worker = RangeWorker::new(
                locator.clone(),
                *range,
                path.clone(),
                progress.part(index),
            );
            part_paths.push(path);
            handles.push(thread::spawn(move || worker.run()));
        }

        // Purely polling: no worker notifies the orchestrator, so the
        // loop may observe completion up to one interval late.
        loop {
            let done = handles.iter().all(|h| h.is_finished());
            let snapshot = progress.snapshot();
            debug!(
                percent = snapshot.percent(),
                finished_parts = snapshot.finished_parts,
                "progress"
            );
            if let Some(ref callback) = on_progress {
                callback(snapshot);
            }
            if done {
                break;
            }
            thread::sleep(self.config.poll_interval);
        }

        // Every handle is joined before the merge or an error return;
        // the first failure wins, the rest are logged.
        let mut total_bytes: u64 = 0;
        let mut first_failure: Option<TransferError> = None;
        for (index, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap_or_else(|_| {
                Err(io::Error::new(io::ErrorKind::Other, "worker thread panicked").into())
            });
            match result {
                Ok(bytes) => total_bytes += bytes,
                Err(e) => {
                    error!(index, error = %e, "range download failed");
                    if first_failure.is_none() {
                        first_failure = Some(TransferError::Range {
                            index,
                            source: Box::new(e),
                        });
                    }
                }
            }
        }
        if let Some(failure) = first_failure {
            if !self.config.keep_parts {
                remove_parts(&part_paths);
            }
            return Err(failure);
        }

        if let Some(ref callback) = on_progress {
            callback(progress.snapshot());
        }

        self.merge_parts(output, &part_paths)?;

        let finished_at = Local::now();
        let report = DownloadReport {
            total_bytes,
            parts: part_paths.len(),
            started_at,
            finished_at,
            elapsed: start.elapsed(),
        };
        info!(total_bytes, parts = report.parts, elapsed = ?report.elapsed, "download complete");
        Ok(report)
    }

    /// Concatenate the part files in range order into `output`.
    fn merge_parts(&self, output: &Path, part_paths: &[PathBuf]) -> TransferResult<()> {
        let mut out = BufWriter::new(File::create(output)?);
        for path in part_paths {
            let mut part = File::open(path)?;
            io::copy(&mut part, &mut out)?;
        }
        out.flush()?;

        if !self.config.keep_parts {
            remove_parts(part_paths);
        }
        Ok(())
    }
}

/// Best-effort removal of part files; failures are logged, not fatal.
fn remove_parts(part_paths: &[PathBuf]) {
    for path in part_paths {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(part = %path.display(), error = %e, "failed to remove part file");
            }
        }
    }
}
