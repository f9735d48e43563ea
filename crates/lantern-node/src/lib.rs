//! # Lantern Node
//!
//! The discovery node: wires a [`lantern_crypto::NodeIdentity`], the node's
//! own advertised endpoint, and a UDP transport into the two
//! process-boundary operations of the protocol core:
//!
//! - `ping(target)` - build, seal, and send a Ping envelope
//! - `listen()` - surface raw inbound datagrams on a bounded queue
//!
//! The identity is a capability object: loaded once at startup and passed
//! in explicitly, never looked up through globals.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod node;

pub use error::Error;
pub use node::Node;
