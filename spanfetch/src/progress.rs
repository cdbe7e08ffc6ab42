//! Shared progress counters for concurrent range workers.
//!
//! Each worker exclusively owns one [`RangeProgress`]: it is the only
//! writer of the counters, while the orchestrator's polling loop reads
//! them for display. That one cross-thread read/write surface is why
//! the fields are atomics rather than plain integers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Callback invoked by the orchestrator with each progress snapshot.
pub type ProgressCallback = Box<dyn Fn(ProgressSnapshot) + Send + Sync>;

/// Progress counters for a single range worker.
#[derive(Debug, Default)]
pub struct RangeProgress {
    /// Bytes received so far; monotonic, incremented by the owner only.
    downloaded: AtomicU64,
    /// Written once, by the owning worker, on successful completion.
    finished: AtomicBool,
}

impl RangeProgress {
    /// Record `bytes` more received.
    pub fn add_bytes(&self, bytes: u64) {
        self.downloaded.fetch_add(bytes, Ordering::SeqCst);
    }

    /// Mark the range fully downloaded.
    pub fn mark_finished(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }

    /// Bytes received so far.
    pub fn downloaded(&self) -> u64 {
        self.downloaded.load(Ordering::SeqCst)
    }

    /// Whether the owning worker completed successfully.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

/// Aggregate progress across all range workers of one download.
#[derive(Debug)]
pub struct TransferProgress {
    parts: Vec<Arc<RangeProgress>>,
    total: u64,
}

impl TransferProgress {
    /// Create counters for `parts` workers downloading `total` bytes.
    pub fn new(parts: usize, total: u64) -> Self {
        Self {
            parts: (0..parts).map(|_| Arc::new(RangeProgress::default())).collect(),
            total,
        }
    }

    /// Handle for the worker that owns part `index`.
    pub fn part(&self, index: usize) -> Arc<RangeProgress> {
        Arc::clone(&self.parts[index])
    }

    /// Total bytes received across all parts.
    pub fn downloaded(&self) -> u64 {
        self.parts.iter().map(|p| p.downloaded()).sum()
    }

    /// Number of parts that completed successfully.
    pub fn finished_parts(&self) -> usize {
        self.parts.iter().filter(|p| p.is_finished()).count()
    }

    /// Number of parts in the plan.
    pub fn total_parts(&self) -> usize {
        self.parts.len()
    }

    /// Whether every part has completed.
    pub fn all_finished(&self) -> bool {
        self.parts.iter().all(|p| p.is_finished())
    }

    /// Point-in-time copy of the aggregate state.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            downloaded: self.downloaded(),
            total: self.total,
            finished_parts: self.finished_parts(),
            total_parts: self.total_parts(),
        }
    }
}

/// A point-in-time view of download progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Bytes received across all parts.
    pub downloaded: u64,
    /// Expected total bytes.
    pub total: u64,
    /// Parts completed so far.
    pub finished_parts: usize,
    /// Parts in the plan.
    pub total_parts: usize,
}

impl ProgressSnapshot {
    /// Completion percentage; 100 for a zero-byte resource.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.downloaded as f64 / self.total as f64) * 100.0
        }
    }
}
