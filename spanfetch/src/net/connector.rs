//! TCP connection establishment with candidate-address fallback.

use std::net::{TcpStream, ToSocketAddrs};

use tracing::debug;

use super::Connection;
use crate::error::{TransferError, TransferResult};

/// Resolve `host:port` and connect to the first reachable address.
///
/// Candidates are attempted in resolver order. Resolution failure, an
/// empty candidate list, and exhaustion of every candidate each produce
/// [`TransferError::Connect`] carrying the resolver's or last socket
/// error's diagnostic. There is no connect timeout; a black-holing peer
/// blocks the caller.
pub fn connect(host: &str, port: u16) -> TransferResult<Connection> {
    let connect_error = |reason: String| TransferError::Connect {
        host: host.to_string(),
        port,
        reason,
    };

    let candidates = (host, port)
        .to_socket_addrs()
        .map_err(|e| connect_error(format!("resolution failed: {}", e)))?;

    let mut last_error = None;
    for addr in candidates {
        match TcpStream::connect(addr) {
            Ok(stream) => {
                debug!(host, port, %addr, "connected");
                return Ok(Connection::new(stream));
            }
            Err(e) => {
                debug!(host, port, %addr, error = %e, "candidate address failed");
                last_error = Some(e);
            }
        }
    }

    Err(connect_error(match last_error {
        Some(e) => e.to_string(),
        None => "no addresses resolved".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_connect_to_listening_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        assert!(connect("127.0.0.1", port).is_ok());
    }

    #[test]
    fn test_connect_to_dead_port() {
        // Bind and immediately drop to obtain a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = connect("127.0.0.1", port).unwrap_err();
        assert!(matches!(err, TransferError::Connect { .. }));
    }

    #[test]
    fn test_connect_resolution_failure() {
        let err = connect("host.invalid", 80).unwrap_err();
        assert!(matches!(
            err,
            TransferError::Connect { host, .. } if host == "host.invalid"
        ));
    }
}
