//! Inbound datagram receive loop.
//!
//! Accepts inbound datagrams without blocking the sender's control flow: a
//! dedicated tokio task runs a receive loop and pushes raw datagrams onto a
//! bounded queue for a downstream consumer. The loop performs no parsing,
//! validation, or dispatch - envelope decoding belongs to higher layers.
//!
//! The loop exits when shutdown is signalled, the transport is closed, or
//! the consumer drops the queue. Transient receive errors (e.g. ICMP
//! port-unreachable surfacing on the socket) are logged and the loop
//! continues.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::RECV_BUFFER_LEN;
use crate::transport::{Transport, TransportError};

/// A raw inbound datagram, surfaced as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    /// The datagram payload
    pub bytes: Vec<u8>,
    /// The sender's address
    pub source: SocketAddr,
}

/// Handle controlling a running receive loop.
pub struct ReceiverHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReceiverHandle {
    /// Signal the loop to stop and wait for the task to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Spawn the receive loop on the given transport.
///
/// Returns the bounded queue of inbound datagrams and the handle used to
/// cancel the loop. When the queue is full the loop waits; UDP backpressure
/// is then absorbed by the socket buffer and, past that, by the network
/// dropping datagrams, which is the protocol's expected behavior.
#[must_use]
pub fn spawn(
    transport: Arc<dyn Transport>,
    queue_capacity: usize,
) -> (mpsc::Receiver<Datagram>, ReceiverHandle) {
    let (datagram_tx, datagram_rx) = mpsc::channel(queue_capacity);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut buf = vec![0u8; RECV_BUFFER_LEN];

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    debug!("receive loop shutting down");
                    break;
                }
                received = transport.recv_from(&mut buf) => match received {
                    Ok((len, source)) => {
                        debug!(%source, len, "datagram received");
                        let datagram = Datagram {
                            bytes: buf[..len].to_vec(),
                            source,
                        };
                        if datagram_tx.send(datagram).await.is_err() {
                            debug!("datagram queue dropped, stopping receive loop");
                            break;
                        }
                    }
                    Err(TransportError::Closed) => {
                        debug!("transport closed, stopping receive loop");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "receive failed");
                    }
                }
            }
        }
    });

    let handle = ReceiverHandle {
        shutdown: shutdown_tx,
        task,
    };
    (datagram_rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::udp::UdpTransport;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn bind_localhost() -> UdpTransport {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        UdpTransport::bind(addr).await.unwrap()
    }

    #[tokio::test]
    async fn test_receives_datagrams_onto_queue() {
        let server = bind_localhost().await;
        let server_addr = server.local_addr().unwrap();
        let client = bind_localhost().await;

        let (mut datagrams, handle) = spawn(Arc::new(server), 16);

        client.send_to(b"first", server_addr).await.unwrap();
        client.send_to(b"second", server_addr).await.unwrap();

        let first = timeout(Duration::from_secs(1), datagrams.recv())
            .await
            .expect("timeout")
            .expect("queue closed");
        assert_eq!(first.bytes, b"first");
        assert_eq!(first.source, client.local_addr().unwrap());

        let second = timeout(Duration::from_secs(1), datagrams.recv())
            .await
            .expect("timeout")
            .expect("queue closed");
        assert_eq!(second.bytes, b"second");

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_loop() {
        let server = bind_localhost().await;
        let (mut datagrams, handle) = spawn(Arc::new(server), 16);

        timeout(Duration::from_secs(1), handle.shutdown())
            .await
            .expect("shutdown should not hang");

        // Queue ends once the loop is gone.
        let next = timeout(Duration::from_secs(1), datagrams.recv())
            .await
            .expect("timeout");
        assert!(next.is_none());
    }

    #[tokio::test]
    async fn test_closed_transport_ends_loop() {
        let server = bind_localhost().await;
        let transport: Arc<dyn Transport> = Arc::new(server.clone());

        server.close().await.unwrap();
        let (mut datagrams, handle) = spawn(transport, 16);

        let next = timeout(Duration::from_secs(1), datagrams.recv())
            .await
            .expect("timeout");
        assert!(next.is_none());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_dropping_queue_stops_loop() {
        let server = bind_localhost().await;
        let server_addr = server.local_addr().unwrap();
        let client = bind_localhost().await;

        let (datagrams, handle) = spawn(Arc::new(server), 1);
        drop(datagrams);

        // The loop notices the dropped queue on the next delivery attempt.
        client.send_to(b"orphan", server_addr).await.unwrap();

        timeout(Duration::from_secs(1), handle.task)
            .await
            .expect("loop should exit")
            .unwrap();
    }
}
