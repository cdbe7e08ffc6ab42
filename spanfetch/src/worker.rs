//! Per-range download worker.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::error::{TransferError, TransferResult};
use crate::http;
use crate::locator::Locator;
use crate::net::connect;
use crate::plan::ByteRange;
use crate::progress::RangeProgress;

/// Downloads one byte range of the resource to its own part file.
///
/// Each worker opens a fresh connection (workers never share one) and
/// exclusively owns its part file and its [`RangeProgress`]. Errors are
/// not handled locally; `run` propagates them so the orchestrator can
/// observe the failure through the worker's join handle.
#[derive(Debug)]
pub struct RangeWorker {
    locator: Locator,
    range: ByteRange,
    part_path: PathBuf,
    progress: Arc<RangeProgress>,
}

impl RangeWorker {
    pub fn new(
        locator: Locator,
        range: ByteRange,
        part_path: PathBuf,
        progress: Arc<RangeProgress>,
    ) -> Self {
        Self {
            locator,
            range,
            part_path,
            progress,
        }
    }

    /// Fetch the assigned range and stream it to the part file.
    ///
    /// Returns the number of bytes written. The server must deliver
    /// exactly `range.len()` bytes: more aborts immediately, fewer at
    /// end-of-stream is a truncation error. `finished` is set only on
    /// success.
    pub fn run(self) -> TransferResult<u64> {
        debug!(
            range = %self.range,
            part = %self.part_path.display(),
            "range worker starting"
        );

        let mut conn = connect(&self.locator.host, self.locator.port)?;
        http::fetch_range(&mut conn, &self.locator, self.range)?;

        let expected = self.range.len();
        let mut out = BufWriter::new(File::create(&self.part_path)?);
        let mut received: u64 = 0;
        loop {
            let chunk = conn.read_chunk()?;
            if chunk.is_empty() {
                break;
            }
            received += chunk.len() as u64;
            if received > expected {
                return Err(TransferError::Protocol {
                    reason: format!(
                        "server sent at least {} bytes for a {}-byte range",
                        received, expected
                    ),
                });
            }
            out.write_all(&chunk)?;
            self.progress.add_bytes(chunk.len() as u64);
        }
        if received < expected {
            return Err(TransferError::Protocol {
                reason: format!(
                    "range body truncated: received {} of {} bytes",
                    received, expected
                ),
            });
        }
        out.flush()?;

        self.progress.mark_finished();
        debug!(range = %self.range, bytes = received, "range worker finished");
        Ok(received)
    }
}
