//! Cryptographic error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Cryptographic errors
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key file could not be read
    #[error("failed to read key file {path}: {source}")]
    KeyFileRead {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Key file could not be written
    #[error("failed to write key file {path}: {source}")]
    KeyFileWrite {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Key file contents are not valid hex
    #[error("key file is not valid hex")]
    KeyFileEncoding,

    /// Decoded key has the wrong length
    #[error("invalid private key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// Key bytes are not a valid secp256k1 scalar
    #[error("not a valid secp256k1 private key")]
    InvalidKey,

    /// Signing operation failed
    #[error("signing failed")]
    SigningFailed,

    /// Signature bytes are malformed
    #[error("invalid signature")]
    InvalidSignature,

    /// Recovery id byte is out of range
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery failed
    #[error("public key recovery failed")]
    RecoveryFailed,
}
