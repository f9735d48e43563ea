//! Node identity: the process-wide secp256k1 signing key.
//!
//! A [`NodeIdentity`] is loaded once at startup from a key file and passed
//! explicitly to every component that signs. The key file holds the
//! hex-encoded 32-byte private scalar. Key material is never logged; the
//! wrapped signing key zeroizes its scalar on drop, and intermediate buffers
//! produced while loading or saving are wiped explicitly.

use std::fs;
use std::path::Path;

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::{PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

/// secp256k1 node identity.
///
/// Owns the private signing key used for every envelope this process
/// produces. Constructed once, then shared by reference - the key is
/// read-only after load, so no synchronization is needed.
pub struct NodeIdentity {
    signing_key: SigningKey,
}

impl NodeIdentity {
    /// Load an identity from a key file.
    ///
    /// The file must contain the hex-encoded 32-byte secp256k1 private
    /// scalar, optionally followed by trailing whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyFileRead`] if the file is missing or
    /// unreadable, [`CryptoError::KeyFileEncoding`] if it is not valid hex,
    /// [`CryptoError::InvalidKeyLength`] or [`CryptoError::InvalidKey`] if
    /// the decoded bytes are not a well-formed private key.
    pub fn load(path: &Path) -> Result<Self, CryptoError> {
        let mut encoded = fs::read_to_string(path).map_err(|source| CryptoError::KeyFileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let identity = Self::from_hex(encoded.trim());
        encoded.zeroize();
        identity
    }

    /// Create an identity from a hex-encoded private scalar.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyFileEncoding`] for malformed hex, otherwise
    /// the errors of [`NodeIdentity::from_bytes`].
    pub fn from_hex(encoded: &str) -> Result<Self, CryptoError> {
        let mut bytes = hex::decode(encoded).map_err(|_| CryptoError::KeyFileEncoding)?;
        let identity = Self::from_bytes(&bytes);
        bytes.zeroize();
        identity
    }

    /// Create an identity from a raw 32-byte private scalar.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if the slice is not exactly
    /// 32 bytes, [`CryptoError::InvalidKey`] if the bytes are zero or not
    /// below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength(bytes.len()));
        }

        let signing_key = SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidKey)?;
        Ok(Self { signing_key })
    }

    /// Generate a fresh random identity.
    #[must_use]
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        Self {
            signing_key: SigningKey::random(rng),
        }
    }

    /// Write the identity to a key file in the format [`NodeIdentity::load`]
    /// reads.
    ///
    /// On Unix the file is created with owner-only permissions.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyFileWrite`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CryptoError> {
        let write_err = |source| CryptoError::KeyFileWrite {
            path: path.to_path_buf(),
            source,
        };

        let mut encoded = hex::encode(self.signing_key.to_bytes());
        encoded.push('\n');
        let result = fs::write(path, &encoded).map_err(write_err);
        encoded.zeroize();
        result?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
        }

        Ok(())
    }

    /// Sign a prehashed 32-byte digest, producing a recoverable signature.
    ///
    /// Returns the 64-byte `r || s` signature and the 1-byte recovery id
    /// that lets a receiver reconstruct the public key from the digest and
    /// signature alone.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::SigningFailed`] if the underlying signing
    /// operation fails.
    pub fn sign_recoverable(
        &self,
        digest: &[u8; 32],
    ) -> Result<([u8; SIGNATURE_SIZE], u8), CryptoError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|_| CryptoError::SigningFailed)?;

        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes.copy_from_slice(&signature.to_bytes());
        Ok((bytes, recovery_id.to_byte()))
    }

    /// The node's public key as an uncompressed point without the SEC1 tag.
    #[must_use]
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        verifying_key_bytes(self.signing_key.verifying_key())
    }
}

impl std::fmt::Debug for NodeIdentity {
    // Key material must never leak into logs; show the public half only.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeIdentity")
            .field("public_key", &hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}

/// Recover the signer's public key from a digest and recoverable signature.
///
/// Returns the uncompressed 64-byte public key that produced `signature`
/// over `digest`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidRecoveryId`] if the recovery id byte is out
/// of range, [`CryptoError::InvalidSignature`] if the signature bytes are
/// malformed, [`CryptoError::RecoveryFailed`] if no public key can be
/// reconstructed.
pub fn recover_public_key(
    digest: &[u8; 32],
    signature: &[u8; SIGNATURE_SIZE],
    recovery_id: u8,
) -> Result<[u8; PUBLIC_KEY_SIZE], CryptoError> {
    let recovery_id =
        RecoveryId::from_byte(recovery_id).ok_or(CryptoError::InvalidRecoveryId(recovery_id))?;
    let signature =
        Signature::from_slice(signature).map_err(|_| CryptoError::InvalidSignature)?;

    let verifying_key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    Ok(verifying_key_bytes(&verifying_key))
}

fn verifying_key_bytes(verifying_key: &VerifyingKey) -> [u8; PUBLIC_KEY_SIZE] {
    let point = verifying_key.to_encoded_point(false);
    let mut bytes = [0u8; PUBLIC_KEY_SIZE];
    // Skip the 0x04 uncompressed-point tag.
    bytes.copy_from_slice(&point.as_bytes()[1..]);
    bytes
}
