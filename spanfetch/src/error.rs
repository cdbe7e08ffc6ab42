//! Error types for segmented transfers.

use std::io;

use thiserror::Error;

/// Result type for transfer operations.
pub type TransferResult<T> = Result<T, TransferError>;

/// Errors that can occur during a segmented download.
///
/// Every error is raised at the point of detection and never recovered
/// locally: a failure before the workers start aborts the whole download,
/// and a failure inside a worker is carried back to the orchestrator as a
/// [`TransferError::Range`] wrapping the worker's own error.
#[derive(Debug, Error)]
pub enum TransferError {
    /// URL scheme is not plain `http`.
    ///
    /// `https` lands here too: no TLS transport is implemented, and
    /// rejecting the URL up front beats silently downgrading to plaintext.
    #[error("unsupported URL scheme '{scheme}': only plain http is supported")]
    UnsupportedScheme { scheme: String },

    /// URL could not be decomposed into scheme, host, and path.
    #[error("malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    /// Resolution failed or every candidate address refused the connection.
    #[error("failed to connect to {host}:{port}: {reason}")]
    Connect {
        host: String,
        port: u16,
        reason: String,
    },

    /// Socket or file I/O failed with something other than an interruption.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The peer's response did not follow the expected HTTP shape.
    #[error("protocol error: {reason}")]
    Protocol { reason: String },

    /// A range worker failed; carries the worker's index and its error.
    #[error("range {index} failed: {source}")]
    Range {
        index: usize,
        #[source]
        source: Box<TransferError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_scheme_display() {
        let err = TransferError::UnsupportedScheme {
            scheme: "ftp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported URL scheme 'ftp': only plain http is supported"
        );
    }

    #[test]
    fn test_malformed_url_display() {
        let err = TransferError::MalformedUrl {
            url: "http://host".to_string(),
            reason: "no path".to_string(),
        };
        assert!(err.to_string().contains("http://host"));
        assert!(err.to_string().contains("no path"));
    }

    #[test]
    fn test_range_error_chains_source() {
        use std::error::Error;

        let err = TransferError::Range {
            index: 2,
            source: Box::new(TransferError::Protocol {
                reason: "range body truncated".to_string(),
            }),
        };
        assert!(err.to_string().starts_with("range 2 failed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_from() {
        let err: TransferError =
            io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer").into();
        assert!(matches!(err, TransferError::Io(_)));
    }
}
