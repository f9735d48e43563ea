//! Keccak-256 hashing.
//!
//! The discovery wire format uses Keccak-256 (the pre-standardization SHA-3
//! variant) both for the signing pre-image and for the envelope integrity
//! commitment.

use sha3::{Digest, Keccak256};

/// Keccak-256 hash output (32 bytes).
pub type HashOutput = [u8; 32];

/// Compute the Keccak-256 hash of the input.
#[must_use]
pub fn keccak256(data: &[u8]) -> HashOutput {
    Keccak256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_deterministic() {
        let hash1 = keccak256(b"discovery");
        let hash2 = keccak256(b"discovery");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, [0u8; 32]);
    }

    #[test]
    fn test_keccak256_different_inputs() {
        assert_ne!(keccak256(b"input1"), keccak256(b"input2"));
    }

    // Keccak-256 known test vector
    #[test]
    fn test_keccak256_empty_string() {
        let expected = [
            0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7,
            0x03, 0xc0, 0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04,
            0x5d, 0x85, 0xa4, 0x70,
        ];

        assert_eq!(keccak256(b""), expected);
    }

    // Distinguishes Keccak-256 from standardized SHA3-256, which pads
    // differently and hashes "" to a different value.
    #[test]
    fn test_keccak256_is_not_sha3_256() {
        let sha3_empty = [
            0xa7, 0xff, 0xc6, 0xf8, 0xbf, 0x1e, 0xd7, 0x66, 0x51, 0xc1, 0x47, 0x56, 0xa0, 0x61,
            0xd6, 0x62, 0xf5, 0x80, 0xff, 0x4d, 0xe4, 0x3b, 0x49, 0xfa, 0x82, 0xd8, 0x0a, 0x4b,
            0x80, 0xf8, 0x43, 0x4a,
        ];

        assert_ne!(keccak256(b""), sha3_empty);
    }
}
