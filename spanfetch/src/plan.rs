//! Byte-range planning for segmented downloads.
//!
//! Divides the total resource length into contiguous, non-overlapping
//! inclusive ranges, one per worker, that exactly partition `[0, total)`.

use std::fmt;
use std::path::{Path, PathBuf};

/// A contiguous inclusive byte interval of the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte offset, inclusive.
    pub start: u64,
    /// Last byte offset, inclusive.
    pub end: u64,
}

impl ByteRange {
    /// Create a range. `end` is inclusive and must not precede `start`.
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    /// Number of bytes covered by the range.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Split `total` bytes into up to `workers` contiguous ranges.
///
/// Range `i` starts at `i * (total / count)`; every range but the last
/// spans that stride, and the last absorbs the remainder, ending at
/// `total - 1`. A zero-byte resource yields no ranges; a worker count
/// larger than the resource is clamped so every range is non-empty.
pub fn split_ranges(total: u64, workers: usize) -> Vec<ByteRange> {
    if total == 0 {
        return Vec::new();
    }
    let count = (workers.max(1) as u64).min(total);
    let stride = total / count;

    (0..count)
        .map(|i| {
            let start = i * stride;
            let end = if i == count - 1 {
                total - 1
            } else {
                start + stride - 1
            };
            ByteRange::new(start, end)
        })
        .collect()
}

/// Path of the part file for worker `index`: `<output>.part<index>`.
pub fn part_path(output: &Path, index: usize) -> PathBuf {
    let mut path = output.as_os_str().to_os_string();
    path.push(format!(".part{}", index));
    PathBuf::from(path)
}
