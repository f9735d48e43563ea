//! Error types for the discovery node.

use thiserror::Error;

/// Node-level errors
///
/// Every failure from the sealing, signing, or socket layers propagates to
/// the caller unchanged; the node performs no local recovery or retry.
#[derive(Debug, Error)]
pub enum Error {
    /// Wire format error
    #[error("wire error: {0}")]
    Wire(#[from] lantern_wire::Error),

    /// Cryptographic error
    #[error("crypto error: {0}")]
    Crypto(#[from] lantern_crypto::CryptoError),

    /// Transport error
    #[error("transport error: {0}")]
    Transport(#[from] lantern_transport::TransportError),
}
