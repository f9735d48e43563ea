//! Async UDP transport implementation.

use crate::transport::{Transport, TransportError, TransportResult, TransportStats};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::net::UdpSocket;

/// Socket buffer sizing; discovery traffic is small, sporadic datagrams.
const SOCKET_BUFFER_SIZE: usize = 256 * 1024;

/// Async UDP transport using tokio.
///
/// Cheap to clone; clones share the underlying socket and counters.
#[derive(Clone)]
pub struct UdpTransport {
    socket: Arc<UdpSocket>,
    closed: Arc<AtomicBool>,
    bytes_sent: Arc<AtomicU64>,
    bytes_received: Arc<AtomicU64>,
    packets_sent: Arc<AtomicU64>,
    packets_received: Arc<AtomicU64>,
}

impl UdpTransport {
    /// Create a UDP transport bound to the given address.
    ///
    /// Use port 0 for automatic port selection; use `0.0.0.0` to accept
    /// datagrams on all interfaces.
    ///
    /// # Errors
    /// Returns [`TransportError::BindFailed`] if socket setup or binding
    /// fails.
    pub async fn bind<A: Into<SocketAddr>>(addr: A) -> TransportResult<Self> {
        let addr = addr.into();

        let domain = if addr.is_ipv4() {
            socket2::Domain::IPV4
        } else {
            socket2::Domain::IPV6
        };

        let bind_err = |e: std::io::Error| TransportError::BindFailed(e.to_string());

        let socket2 =
            socket2::Socket::new(domain, socket2::Type::DGRAM, Some(socket2::Protocol::UDP))
                .map_err(bind_err)?;
        socket2.set_recv_buffer_size(SOCKET_BUFFER_SIZE).map_err(bind_err)?;
        socket2.set_send_buffer_size(SOCKET_BUFFER_SIZE).map_err(bind_err)?;
        socket2.bind(&addr.into()).map_err(bind_err)?;
        socket2.set_nonblocking(true).map_err(bind_err)?;

        let std_socket: std::net::UdpSocket = socket2.into();
        let socket = UdpSocket::from_std(std_socket).map_err(bind_err)?;

        Ok(Self::from_socket(socket))
    }

    /// Wrap an already-bound tokio socket.
    #[must_use]
    pub fn from_socket(socket: UdpSocket) -> Self {
        Self {
            socket: Arc::new(socket),
            closed: Arc::new(AtomicBool::new(false)),
            bytes_sent: Arc::new(AtomicU64::new(0)),
            bytes_received: Arc::new(AtomicU64::new(0)),
            packets_sent: Arc::new(AtomicU64::new(0)),
            packets_received: Arc::new(AtomicU64::new(0)),
        }
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send_to(&self, buf: &[u8], addr: SocketAddr) -> TransportResult<usize> {
        if self.closed.load(Ordering::Relaxed) {
            return Err(TransportError::Closed);
        }

        let sent = self.socket.send_to(buf, addr).await?;
        self.bytes_sent.fetch_add(sent as u64, Ordering::Relaxed);
        self.packets_sent.fetch_add(1, Ordering::Relaxed);
        Ok(sent)
    }

    async fn recv_from(&self, buf: &mut [u8]) -> TransportResult<(usize, SocketAddr)> {
        if self.closed.load(Ordering::Relaxed) {
            return Err(TransportError::Closed);
        }

        let (size, addr) = self.socket.recv_from(buf).await?;
        self.bytes_received.fetch_add(size as u64, Ordering::Relaxed);
        self.packets_received.fetch_add(1, Ordering::Relaxed);
        Ok((size, addr))
    }

    fn local_addr(&self) -> TransportResult<SocketAddr> {
        self.socket.local_addr().map_err(TransportError::Io)
    }

    async fn close(&self) -> TransportResult<()> {
        self.closed.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    fn stats(&self) -> TransportStats {
        TransportStats {
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            packets_sent: self.packets_sent.load(Ordering::Relaxed),
            packets_received: self.packets_received.load(Ordering::Relaxed),
        }
    }
}
