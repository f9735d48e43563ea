//! # Lantern Wire
//!
//! Wire format for the Lantern discovery protocol.
//!
//! This crate provides:
//! - Recursive length-prefix (RLP) encoding for packet bodies
//! - Endpoint encoding (fixed-width IPv4 + port triples)
//! - The packet model and type registry
//! - Envelope sealing: hash-then-sign-then-prefix commitment
//!
//! ## Envelope layout
//!
//! ```text
//! ┌──────────────┬──────────────────┬───────────┬──────────┬───────────┐
//! │ hash (32)    │ signature (64)   │ recid (1) │ type (1) │ body (..) │
//! └──────────────┴──────────────────┴───────────┴──────────┴───────────┘
//!   keccak256 over everything that follows it
//! ```
//!
//! The hash commits to the signature, recovery id, type tag, and body, so a
//! receiver can check integrity before attempting signature recovery. The
//! signature covers `keccak256(type || body)`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod packet;
pub mod rlp;

pub use endpoint::Endpoint;
pub use envelope::{Envelope, HEADER_SIZE, MAX_PACKET_SIZE};
pub use error::Error;
pub use packet::{EXPIRATION_WINDOW_SECS, PROTOCOL_VERSION, Packet, PacketType, PingPacket};
pub use rlp::RlpItem;
