//! Error types for the spanfetch CLI.

use thiserror::Error;

use spanfetch::TransferError;

/// Errors surfaced to the user by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line could not be turned into a download request.
    #[error("{0}")]
    Usage(String),

    /// The download itself failed.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_display() {
        let err = CliError::Usage("cannot derive an output filename".to_string());
        assert_eq!(err.to_string(), "cannot derive an output filename");
    }

    #[test]
    fn test_transfer_error_passes_through() {
        let err: CliError = TransferError::Protocol {
            reason: "response carries no Content-Length header".to_string(),
        }
        .into();
        assert!(err.to_string().contains("Content-Length"));
    }
}
