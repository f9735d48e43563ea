//! Transport trait abstraction for datagram backends.
//!
//! The discovery node talks to the network through this trait so tests and
//! future backends can substitute implementations without touching the
//! sealing or node layers.

use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;

/// Transport layer errors
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// I/O error from the underlying socket
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport is closed
    #[error("transport is closed")]
    Closed,

    /// Address binding failed
    #[error("failed to bind to address: {0}")]
    BindFailed(String),
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Async transport trait for datagram communication.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a datagram to a remote address.
    ///
    /// Returns the number of bytes sent. Fire-and-forget: a successful
    /// return means the datagram was handed to the OS, nothing more.
    ///
    /// # Errors
    /// Returns `TransportError` if the send operation fails
    async fn send_to(&self, buf: &[u8], addr: SocketAddr) -> TransportResult<usize>;

    /// Receive one datagram into `buf`.
    ///
    /// Returns the number of bytes received and the sender's address.
    ///
    /// # Errors
    /// Returns `TransportError` if the receive operation fails
    async fn recv_from(&self, buf: &mut [u8]) -> TransportResult<(usize, SocketAddr)>;

    /// The local address this transport is bound to.
    ///
    /// # Errors
    /// Returns `TransportError` if the address cannot be determined
    fn local_addr(&self) -> TransportResult<SocketAddr>;

    /// Close the transport; subsequent operations return
    /// `TransportError::Closed`.
    async fn close(&self) -> TransportResult<()>;

    /// Check whether the transport is closed.
    fn is_closed(&self) -> bool;

    /// Transport statistics.
    fn stats(&self) -> TransportStats {
        TransportStats::default()
    }
}

/// Transport statistics
#[derive(Debug, Clone, Default)]
pub struct TransportStats {
    /// Total bytes sent
    pub bytes_sent: u64,
    /// Total bytes received
    pub bytes_received: u64,
    /// Total datagrams sent
    pub packets_sent: u64,
    /// Total datagrams received
    pub packets_received: u64,
}
