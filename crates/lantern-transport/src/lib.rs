//! # Lantern Transport
//!
//! Network transport layer for the Lantern discovery protocol.
//!
//! This crate provides:
//! - The `Transport` trait abstracting datagram backends
//! - An async UDP transport built on tokio and socket2
//! - A cancellable inbound receive loop feeding a bounded datagram queue
//!
//! Sends are fire-and-forget, matching UDP semantics: no acknowledgement,
//! no retry, no ordering between concurrent sends.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod receiver;
pub mod transport;
pub mod udp;

pub use receiver::{Datagram, ReceiverHandle};
pub use transport::{Transport, TransportError, TransportResult, TransportStats};
pub use udp::UdpTransport;

/// Receive buffer length per datagram; the protocol caps packets well below
/// this.
pub const RECV_BUFFER_LEN: usize = 1280;
