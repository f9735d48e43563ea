//! Error types for the Lantern wire format.

use lantern_crypto::CryptoError;
use thiserror::Error;

/// Wire format errors
#[derive(Debug, Error)]
pub enum Error {
    /// Address literal is not valid IPv4
    #[error("invalid address: {0:?} is not an IPv4 literal")]
    InvalidAddress(String),

    /// Port does not fit in 16 bits
    #[error("port out of range: {0} does not fit in 16 bits")]
    PortOutOfRange(i64),

    /// Serialized packet exceeds the datagram budget
    #[error("packet too large: {size} bytes exceeds the {max}-byte maximum")]
    PacketTooLarge {
        /// Size the envelope would have
        size: usize,
        /// Protocol maximum
        max: usize,
    },

    /// Buffer is shorter than the envelope header
    #[error("envelope too short: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum expected size
        expected: usize,
        /// Actual size received
        actual: usize,
    },

    /// Leading hash does not match the rest of the envelope
    #[error("envelope hash mismatch")]
    HashMismatch,

    /// Type tag is not in the packet registry
    #[error("unknown packet type: 0x{0:02X}")]
    UnknownPacketType(u8),

    /// Signing or recovery error
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
