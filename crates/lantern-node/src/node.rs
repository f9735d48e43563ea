//! The discovery node.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use lantern_crypto::{HASH_SIZE, NodeIdentity, PUBLIC_KEY_SIZE};
use lantern_transport::{Datagram, ReceiverHandle, Transport, UdpTransport, receiver};
use lantern_wire::{Endpoint, Envelope, PingPacket};

use crate::error::Error;

/// Default capacity of the inbound datagram queue.
const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// A discovery node: identity, advertised endpoint, and transport.
///
/// The sending path runs on the caller's task; sealing and `send_to` are
/// bounded, small operations. The identity is read-only after construction,
/// so the node can be shared freely across tasks.
pub struct Node {
    identity: Arc<NodeIdentity>,
    local_endpoint: Endpoint,
    transport: Arc<UdpTransport>,
}

impl Node {
    /// Bind a UDP socket on all interfaces at the local endpoint's UDP port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the socket cannot be bound.
    pub async fn bind(identity: NodeIdentity, local_endpoint: Endpoint) -> Result<Self, Error> {
        let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, local_endpoint.udp_port()));
        let transport = UdpTransport::bind(bind_addr).await?;
        info!(addr = %transport.local_addr()?, endpoint = %local_endpoint, "node bound");

        Ok(Self::with_transport(identity, local_endpoint, transport))
    }

    /// Assemble a node over an existing transport.
    #[must_use]
    pub fn with_transport(
        identity: NodeIdentity,
        local_endpoint: Endpoint,
        transport: UdpTransport,
    ) -> Self {
        Self {
            identity: Arc::new(identity),
            local_endpoint,
            transport: Arc::new(transport),
        }
    }

    /// The node's advertised endpoint.
    #[must_use]
    pub fn local_endpoint(&self) -> &Endpoint {
        &self.local_endpoint
    }

    /// The node's public key.
    #[must_use]
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.identity.public_key()
    }

    /// Build, seal, and send a Ping envelope to the target endpoint.
    ///
    /// Returns the envelope hash - the datum a pong-matching layer needs to
    /// correlate the eventual reply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Wire`] if sealing fails, [`Error::Transport`] if
    /// the datagram cannot be handed to the socket.
    pub async fn ping(&self, target: &Endpoint) -> Result<[u8; HASH_SIZE], Error> {
        let ping = PingPacket::new(self.local_endpoint, *target);
        let envelope = Envelope::seal(&ping, &self.identity)?;
        let bytes = envelope.to_bytes();

        debug!(
            to = %target,
            len = bytes.len(),
            hash = %hex::encode(envelope.hash()),
            "sending ping"
        );
        self.transport.send_to(&bytes, target.udp_addr()).await?;

        Ok(*envelope.hash())
    }

    /// Start the inbound receive loop.
    ///
    /// Returns the bounded queue of raw datagrams and the handle used to
    /// cancel the loop. Datagrams are surfaced as received - no envelope
    /// decoding or dispatch happens here.
    #[must_use]
    pub fn listen(&self) -> (mpsc::Receiver<Datagram>, ReceiverHandle) {
        let transport: Arc<dyn Transport> = self.transport.clone();
        receiver::spawn(transport, DEFAULT_QUEUE_CAPACITY)
    }

    /// Close the node's transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if closing fails.
    pub async fn close(&self) -> Result<(), Error> {
        Ok(self.transport.close().await?)
    }
}
