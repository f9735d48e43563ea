//! # Lantern Crypto
//!
//! Cryptographic primitives for the Lantern discovery protocol.
//!
//! This crate provides:
//! - Keccak-256 hashing for signing pre-images and envelope commitments
//! - secp256k1 node identity with recoverable ECDSA signing
//! - Key-file loading and public key recovery
//!
//! ## Cryptographic Suite
//!
//! | Function | Algorithm | Output |
//! |----------|-----------|--------|
//! | Hash | Keccak-256 | 32 bytes |
//! | Signatures | secp256k1 ECDSA (recoverable) | 64 bytes + 1-byte recovery id |
//! | Node id | Uncompressed secp256k1 point | 64 bytes |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod hash;
pub mod identity;

pub use error::CryptoError;
pub use hash::{HashOutput, keccak256};
pub use identity::{NodeIdentity, recover_public_key};

/// Keccak-256 output size
pub const HASH_SIZE: usize = 32;

/// Recoverable ECDSA signature size (r || s, without the recovery id)
pub const SIGNATURE_SIZE: usize = 64;

/// secp256k1 private key size
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Uncompressed secp256k1 public key size (without the SEC1 tag byte)
pub const PUBLIC_KEY_SIZE: usize = 64;
