//! Configuration for segmented downloads.

use std::time::Duration;

/// Default number of concurrent range workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Default interval between progress polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Tunable settings for a segmented download.
///
/// Construct with [`Default`] and adjust with the `with_*` builders.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Number of concurrent range workers (and thus connections).
    pub workers: usize,
    /// How often the orchestrator samples worker progress.
    pub poll_interval: Duration,
    /// Keep the part files after a successful merge.
    pub keep_parts: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            keep_parts: false,
        }
    }
}

impl DownloadConfig {
    /// Set the worker count. Values below 1 are clamped to 1.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the progress poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Keep or remove part files after the merge.
    pub fn with_keep_parts(mut self, keep: bool) -> Self {
        self.keep_parts = keep;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DownloadConfig::default();
        assert_eq!(config.workers, 4);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(!config.keep_parts);
    }

    #[test]
    fn test_with_workers_clamps_to_one() {
        let config = DownloadConfig::default().with_workers(0);
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn test_builders_compose() {
        let config = DownloadConfig::default()
            .with_workers(8)
            .with_poll_interval(Duration::from_millis(100))
            .with_keep_parts(true);

        assert_eq!(config.workers, 8);
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert!(config.keep_parts);
    }
}
