//! Buffered socket wrapper for line-oriented and bulk reads.

use std::io::{self, Read, Write};
use std::net::TcpStream;

use crate::error::TransferResult;

/// Size of the internal read buffer (16 KiB).
const READ_BUFFER_SIZE: usize = 16 * 1024;

/// A connected TCP stream with an internal read buffer.
///
/// Exposes line-oriented reads for the HTTP header block, bulk reads for
/// the body, and a reliable full-write for the request. The buffer state
/// is exclusively owned by this instance and never shared; dropping the
/// connection closes the underlying stream exactly once.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    buffer: Vec<u8>,
    cursor: usize,
    remaining: usize,
}

impl Connection {
    /// Wrap an already-connected stream.
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            buffer: vec![0; READ_BUFFER_SIZE],
            cursor: 0,
            remaining: 0,
        }
    }

    /// Refill the buffer from the stream if it is exhausted.
    ///
    /// Retries transparently on `ErrorKind::Interrupted`. After a
    /// successful call, `remaining == 0` means end-of-stream.
    fn fill(&mut self) -> TransferResult<()> {
        if self.remaining > 0 {
            return Ok(());
        }
        loop {
            match self.stream.read(&mut self.buffer) {
                Ok(n) => {
                    self.cursor = 0;
                    self.remaining = n;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read the next line, including its trailing `\n`.
    ///
    /// Returns an empty string only at end-of-stream with no pending
    /// bytes. Bytes are consumed one at a time across buffer refills, so
    /// a line longer than the buffer is still returned whole. Decoded
    /// lossily; HTTP headers are ASCII in practice.
    pub fn read_line(&mut self) -> TransferResult<String> {
        let mut line = Vec::new();
        loop {
            self.fill()?;
            if self.remaining == 0 {
                break;
            }
            let byte = self.buffer[self.cursor];
            self.cursor += 1;
            self.remaining -= 1;
            line.push(byte);
            if byte == b'\n' {
                break;
            }
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    /// Return everything currently buffered, refilling once if empty.
    ///
    /// An empty vector means end-of-stream. Used for the response body
    /// after the header block has been consumed line-by-line.
    pub fn read_chunk(&mut self) -> TransferResult<Vec<u8>> {
        self.fill()?;
        if self.remaining == 0 {
            return Ok(Vec::new());
        }
        let chunk = self.buffer[self.cursor..self.cursor + self.remaining].to_vec();
        self.cursor += self.remaining;
        self.remaining = 0;
        Ok(chunk)
    }

    /// Write every byte, retrying on interruption.
    ///
    /// A zero-byte write that is not an interruption is an error.
    pub fn send_all(&mut self, bytes: &[u8]) -> TransferResult<()> {
        let mut sent = 0;
        while sent < bytes.len() {
            match self.stream.write(&bytes[sent..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "connection refused further writes",
                    )
                    .into());
                }
                Ok(n) => sent += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
