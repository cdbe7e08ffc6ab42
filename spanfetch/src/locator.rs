//! URL parsing into a scheme/host/port/path locator.

use std::fmt;

use crate::error::{TransferError, TransferResult};

const SCHEME_SEPARATOR: &str = "://";
const DEFAULT_PORT: u16 = 80;

/// The parsed decomposition of a download URL.
///
/// Immutable once parsed; constructed once per download and read-only
/// afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// URL scheme; always `"http"` after a successful parse.
    pub scheme: String,
    /// Host name or address, without the port.
    pub host: String,
    /// TCP port; 80 unless the URL carries an explicit `host:port`.
    pub port: u16,
    /// Absolute path including the leading `/` (query string untouched).
    pub path: String,
}

impl Locator {
    /// Parse an absolute URL string.
    ///
    /// Only plain `http` URLs are accepted: `https` is rejected with
    /// [`TransferError::UnsupportedScheme`] because no TLS transport is
    /// implemented, rather than silently downgraded to plaintext. A URL
    /// without a `://` separator, without a path, with an empty host, or
    /// with an unparsable port is [`TransferError::MalformedUrl`].
    pub fn parse(url: &str) -> TransferResult<Self> {
        let malformed = |reason: &str| TransferError::MalformedUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let scheme_end = url
            .find(SCHEME_SEPARATOR)
            .ok_or_else(|| malformed("missing scheme separator"))?;
        let scheme = &url[..scheme_end];
        if scheme != "http" {
            return Err(TransferError::UnsupportedScheme {
                scheme: scheme.to_string(),
            });
        }

        let rest = &url[scheme_end + SCHEME_SEPARATOR.len()..];
        let path_start = rest.find('/').ok_or_else(|| malformed("no path"))?;
        let authority = &rest[..path_start];
        let path = &rest[path_start..];

        if authority.is_empty() {
            return Err(malformed("empty host"));
        }

        // Bracketed IPv6 literals carry their port after the closing
        // bracket; otherwise an explicit port is honoured when the part
        // before the last colon carries no further colon (a bare IPv6
        // literal is taken whole).
        let (host, port) = if let Some(bracketed) = authority.strip_prefix('[') {
            let (host, after) = bracketed
                .split_once(']')
                .ok_or_else(|| malformed("unterminated IPv6 literal"))?;
            let port = match after.strip_prefix(':') {
                Some(port) => port
                    .parse::<u16>()
                    .map_err(|_| malformed("invalid port"))?,
                None if after.is_empty() => DEFAULT_PORT,
                None => return Err(malformed("invalid authority")),
            };
            (host, port)
        } else {
            match authority.rsplit_once(':') {
                Some((host, port)) if !host.contains(':') => {
                    let port = port
                        .parse::<u16>()
                        .map_err(|_| malformed("invalid port"))?;
                    (host, port)
                }
                _ => (authority, DEFAULT_PORT),
            }
        };
        if host.is_empty() {
            return Err(malformed("empty host"));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            port,
            path: path.to_string(),
        })
    }

    /// Render the value for the HTTP `Host` header.
    ///
    /// The port is omitted when it is the default 80; an IPv6 host is
    /// re-bracketed.
    pub fn host_header(&self) -> String {
        let host = if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        if self.port == DEFAULT_PORT {
            host
        } else {
            format!("{}:{}", host, self.port)
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host_header(), self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_http_url() {
        let locator = Locator::parse("http://host/path").unwrap();
        assert_eq!(locator.scheme, "http");
        assert_eq!(locator.host, "host");
        assert_eq!(locator.port, 80);
        assert_eq!(locator.path, "/path");
    }

    #[test]
    fn test_parse_keeps_query_string() {
        let locator = Locator::parse("http://example.com/a/b?x=1&y=2").unwrap();
        assert_eq!(locator.host, "example.com");
        assert_eq!(locator.path, "/a/b?x=1&y=2");
    }

    #[test]
    fn test_parse_bracketed_ipv6_with_port() {
        let locator = Locator::parse("http://[::1]:8080/file").unwrap();
        assert_eq!(locator.host, "::1");
        assert_eq!(locator.port, 8080);
        assert_eq!(locator.host_header(), "[::1]:8080");
        assert_eq!(locator.to_string(), "http://[::1]:8080/file");
    }

    #[test]
    fn test_parse_bracketed_ipv6_default_port() {
        let locator = Locator::parse("http://[::1]/file").unwrap();
        assert_eq!(locator.host, "::1");
        assert_eq!(locator.port, 80);
        assert_eq!(locator.host_header(), "[::1]");
    }

    #[test]
    fn test_parse_rejects_unterminated_ipv6_literal() {
        let err = Locator::parse("http://[::1/file").unwrap_err();
        assert!(matches!(
            err,
            TransferError::MalformedUrl { reason, .. } if reason == "unterminated IPv6 literal"
        ));
    }

    #[test]
    fn test_parse_bare_ipv6_taken_whole() {
        // Without brackets there is no way to tell a port apart from a
        // trailing address group, so the whole authority is the host.
        let locator = Locator::parse("http://::1/file").unwrap();
        assert_eq!(locator.host, "::1");
        assert_eq!(locator.port, 80);
    }

    #[test]
    fn test_parse_explicit_port() {
        let locator = Locator::parse("http://127.0.0.1:8080/file").unwrap();
        assert_eq!(locator.host, "127.0.0.1");
        assert_eq!(locator.port, 8080);
        assert_eq!(locator.path, "/file");
    }

    #[test]
    fn test_parse_rejects_https() {
        let err = Locator::parse("https://host/path").unwrap_err();
        assert!(matches!(
            err,
            TransferError::UnsupportedScheme { scheme } if scheme == "https"
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_scheme() {
        let err = Locator::parse("ftp://host/path").unwrap_err();
        assert!(matches!(err, TransferError::UnsupportedScheme { .. }));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = Locator::parse("host/path").unwrap_err();
        assert!(matches!(err, TransferError::MalformedUrl { .. }));
    }

    #[test]
    fn test_parse_rejects_missing_path() {
        let err = Locator::parse("http://host").unwrap_err();
        assert!(matches!(
            err,
            TransferError::MalformedUrl { reason, .. } if reason == "no path"
        ));
    }

    #[test]
    fn test_parse_rejects_empty_host() {
        let err = Locator::parse("http:///path").unwrap_err();
        assert!(matches!(
            err,
            TransferError::MalformedUrl { reason, .. } if reason == "empty host"
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_port() {
        let err = Locator::parse("http://host:notaport/path").unwrap_err();
        assert!(matches!(
            err,
            TransferError::MalformedUrl { reason, .. } if reason == "invalid port"
        ));
    }

    #[test]
    fn test_host_header_omits_default_port() {
        let locator = Locator::parse("http://host/path").unwrap();
        assert_eq!(locator.host_header(), "host");

        let locator = Locator::parse("http://host:8080/path").unwrap();
        assert_eq!(locator.host_header(), "host:8080");
    }

    #[test]
    fn test_display_roundtrip() {
        let url = "http://host:8080/a/b";
        let locator = Locator::parse(url).unwrap();
        assert_eq!(locator.to_string(), url);
    }
}
