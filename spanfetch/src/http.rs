//! Minimal HTTP/1.1 request and response-header exchange.
//!
//! Only the pieces the segmented downloader needs: a `GET` with an
//! optional `Range` header, `Content-Length` extraction, and skipping
//! the header block to position a connection at the response body. The
//! status line is read like any other header line and not interpreted,
//! so a non-2xx response is not detected as an error by itself.

use tracing::debug;

use crate::error::{TransferError, TransferResult};
use crate::locator::Locator;
use crate::net::Connection;
use crate::plan::ByteRange;

const CONTENT_LENGTH_PREFIX: &str = "Content-Length: ";
const HEADER_TERMINATOR: &str = "\r\n";

fn protocol_error(reason: impl Into<String>) -> TransferError {
    TransferError::Protocol {
        reason: reason.into(),
    }
}

/// Render the request text for `locator`, optionally ranged.
///
/// Pure so the wire format is unit-testable without a socket.
fn format_request(locator: &Locator, range: Option<ByteRange>) -> String {
    let mut request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n",
        locator.path,
        locator.host_header()
    );
    if let Some(range) = range {
        request.push_str(&format!("Range: bytes={}-{}\r\n", range.start, range.end));
    }
    request.push_str(HEADER_TERMINATOR);
    request
}

/// Request the whole resource and return its `Content-Length`.
///
/// Header lines are scanned until one starts with `Content-Length: `;
/// its numeric suffix is returned and the rest of the response is left
/// unread (the caller drops the connection). Reaching the blank-line
/// terminator or end-of-stream first is a [`TransferError::Protocol`].
pub fn fetch_total_length(conn: &mut Connection, locator: &Locator) -> TransferResult<u64> {
    conn.send_all(format_request(locator, None).as_bytes())?;

    loop {
        let line = conn.read_line()?;
        if line.is_empty() {
            return Err(protocol_error(
                "end of stream before Content-Length header",
            ));
        }
        if line == HEADER_TERMINATOR {
            return Err(protocol_error("response carries no Content-Length header"));
        }
        if let Some(value) = line.strip_prefix(CONTENT_LENGTH_PREFIX) {
            let total = value.trim_end().parse::<u64>().map_err(|_| {
                protocol_error(format!("invalid Content-Length '{}'", value.trim_end()))
            })?;
            debug!(total, "content length received");
            return Ok(total);
        }
    }
}

/// Request one byte range and consume the response header block.
///
/// On return the connection is positioned exactly at the first body
/// byte. Headers are discarded unexamined; end-of-stream before the
/// blank-line terminator is a [`TransferError::Protocol`].
pub fn fetch_range(
    conn: &mut Connection,
    locator: &Locator,
    range: ByteRange,
) -> TransferResult<()> {
    conn.send_all(format_request(locator, Some(range)).as_bytes())?;

    loop {
        let line = conn.read_line()?;
        if line.is_empty() {
            return Err(protocol_error("end of stream while reading headers"));
        }
        if line == HEADER_TERMINATOR {
            return Ok(());
        }
    }
}
