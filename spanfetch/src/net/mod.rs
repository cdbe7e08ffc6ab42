//! Buffered TCP plumbing for the HTTP exchange.

mod connection;
mod connector;

pub use connection::Connection;
pub use connector::connect;
