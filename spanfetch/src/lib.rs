//! Spanfetch - segmented multi-connection HTTP downloader
//!
//! This library downloads a single HTTP resource by splitting it into
//! contiguous byte ranges, fetching each range concurrently over its own
//! TCP connection, and reassembling the ranges into one output file.
//!
//! The engine is deliberately small and blocking:
//! - A buffered socket layer with line-oriented and bulk reads
//! - A minimal HTTP/1.1 exchange (`GET` plus `Range` requests)
//! - A range planner that partitions the resource across workers
//! - One plain thread per range, streaming to its own part file
//! - An orchestrator that polls shared atomic progress counters,
//!   joins every worker, and concatenates the parts in order
//!
//! Plain `http` only; `https` URLs are rejected at parse time because no
//! TLS transport is implemented.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use spanfetch::{DownloadConfig, Downloader};
//!
//! let config = DownloadConfig::default().with_workers(8);
//! let report = Downloader::with_config(config)
//!     .download("http://example.com/large.bin", Path::new("large.bin"))?;
//! println!("{}", report);
//! ```

pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod locator;
pub mod net;
pub mod plan;
pub mod progress;
pub mod worker;

pub use config::DownloadConfig;
pub use download::{download, DownloadReport, Downloader};
pub use error::{TransferError, TransferResult};
pub use locator::Locator;
pub use plan::{part_path, split_ranges, ByteRange};
pub use progress::{ProgressCallback, ProgressSnapshot, RangeProgress, TransferProgress};
pub use worker::RangeWorker;

/// Crate version, taken from the package metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
