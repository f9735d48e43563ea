//! Envelope sealing: the hash-then-sign-then-prefix pipeline.

use lantern_crypto::{
    HASH_SIZE, NodeIdentity, PUBLIC_KEY_SIZE, SIGNATURE_SIZE, keccak256, recover_public_key,
};

use crate::error::Error;
use crate::packet::{Packet, PacketType};

/// Total size of the hash, signature, recovery id, and type tag.
pub const HEADER_SIZE: usize = HASH_SIZE + SIGNATURE_SIZE + 2;

/// Largest datagram the protocol permits.
pub const MAX_PACKET_SIZE: usize = 1280;

/// A sealed discovery envelope, ready for the wire.
///
/// Layout: `hash(32) || signature(64) || recovery_id(1) || type(1) || body`.
/// The leading hash is keccak256 over everything that follows it; the
/// signature covers `keccak256(type || body)`. Envelopes are built once per
/// send and never mutated - changing any field after sealing would
/// invalidate the hash.
#[derive(Debug, Clone)]
pub struct Envelope {
    hash: [u8; HASH_SIZE],
    signature: [u8; SIGNATURE_SIZE],
    recovery_id: u8,
    packet_type: PacketType,
    body: Vec<u8>,
}

impl Envelope {
    /// Serialize and sign a packet into a sealed envelope.
    ///
    /// The pipeline: serialize the packet's field list, prefix the type tag,
    /// keccak-hash that signing payload, sign the digest recoverably, then
    /// commit to signature + recovery id + payload with a second keccak
    /// hash that leads the wire buffer.
    ///
    /// The output is deterministic in the packet, the identity, and the
    /// wall clock (the packet stamps its expiration during serialization).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PacketTooLarge`] if the sealed envelope would
    /// exceed [`MAX_PACKET_SIZE`], [`Error::Crypto`] if signing fails.
    pub fn seal<P: Packet>(packet: &P, identity: &NodeIdentity) -> Result<Self, Error> {
        let body = packet.pack().encode();

        let mut signing_payload = Vec::with_capacity(1 + body.len());
        signing_payload.push(P::PACKET_TYPE.wire_byte());
        signing_payload.extend_from_slice(&body);

        let size = HASH_SIZE + SIGNATURE_SIZE + 1 + signing_payload.len();
        if size > MAX_PACKET_SIZE {
            return Err(Error::PacketTooLarge {
                size,
                max: MAX_PACKET_SIZE,
            });
        }

        let digest = keccak256(&signing_payload);
        let (signature, recovery_id) = identity.sign_recoverable(&digest)?;

        let mut full_payload = Vec::with_capacity(SIGNATURE_SIZE + 1 + signing_payload.len());
        full_payload.extend_from_slice(&signature);
        full_payload.push(recovery_id);
        full_payload.extend_from_slice(&signing_payload);

        Ok(Self {
            hash: keccak256(&full_payload),
            signature,
            recovery_id,
            packet_type: P::PACKET_TYPE,
            body,
        })
    }

    /// Parse a wire buffer, verifying the integrity commitment.
    ///
    /// Recomputes keccak256 over everything after the leading hash and
    /// rejects the buffer on mismatch, so callers can trust the envelope
    /// before attempting signature recovery. The body is *not* decoded -
    /// payload interpretation belongs to higher layers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Truncated`] if the buffer is shorter than the
    /// header, [`Error::HashMismatch`] if the integrity check fails,
    /// [`Error::UnknownPacketType`] if the type tag is not registered.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        if data.len() < HEADER_SIZE {
            return Err(Error::Truncated {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let computed = keccak256(&data[HASH_SIZE..]);
        if computed[..] != data[..HASH_SIZE] {
            return Err(Error::HashMismatch);
        }

        let mut hash = [0u8; HASH_SIZE];
        hash.copy_from_slice(&data[..HASH_SIZE]);

        let mut signature = [0u8; SIGNATURE_SIZE];
        signature.copy_from_slice(&data[HASH_SIZE..HASH_SIZE + SIGNATURE_SIZE]);

        let recovery_id = data[HASH_SIZE + SIGNATURE_SIZE];
        let packet_type = PacketType::try_from(data[HASH_SIZE + SIGNATURE_SIZE + 1])?;

        Ok(Self {
            hash,
            signature,
            recovery_id,
            packet_type,
            body: data[HEADER_SIZE..].to_vec(),
        })
    }

    /// Recover the sender's public key from the signature.
    ///
    /// Returns the uncompressed 64-byte public key that signed this
    /// envelope's payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Crypto`] if the signature or recovery id is
    /// malformed or recovery fails.
    pub fn recover_sender(&self) -> Result<[u8; PUBLIC_KEY_SIZE], Error> {
        let mut signing_payload = Vec::with_capacity(1 + self.body.len());
        signing_payload.push(self.packet_type.wire_byte());
        signing_payload.extend_from_slice(&self.body);
        let digest = keccak256(&signing_payload);

        Ok(recover_public_key(&digest, &self.signature, self.recovery_id)?)
    }

    /// Assemble the wire buffer: `hash || signature || recid || type || body`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.body.len());
        out.extend_from_slice(&self.hash);
        out.extend_from_slice(&self.signature);
        out.push(self.recovery_id);
        out.push(self.packet_type.wire_byte());
        out.extend_from_slice(&self.body);
        out
    }

    /// The envelope's integrity hash (the leading 32 wire bytes).
    #[must_use]
    pub fn hash(&self) -> &[u8; HASH_SIZE] {
        &self.hash
    }

    /// The 64-byte recoverable signature.
    #[must_use]
    pub fn signature(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.signature
    }

    /// The signature's recovery id byte.
    #[must_use]
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// The registry type tag.
    #[must_use]
    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    /// The RLP-encoded body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
