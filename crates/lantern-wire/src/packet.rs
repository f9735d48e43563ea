//! Packet model and type registry for discovery messages.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::rlp::RlpItem;

/// Discovery protocol revision carried in every ping.
pub const PROTOCOL_VERSION: u8 = 0x03;

/// Grace window added to the wall clock when stamping outgoing packets, so
/// receivers can drop stale or replayed packets without rejecting traffic
/// that was merely slow to arrive.
pub const EXPIRATION_WINDOW_SECS: u64 = 60;

/// Packet types as defined in the wire registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    /// Liveness assertion carrying the sender's and target's endpoints
    Ping = 0x01,
}

impl PacketType {
    /// The single-byte wire value of this type.
    #[must_use]
    pub const fn wire_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PacketType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Ping),
            _ => Err(Error::UnknownPacketType(value)),
        }
    }
}

/// A discovery message that can be sealed into an envelope.
///
/// Implementations provide their registry type tag and their ordered field
/// list; the envelope builder handles serialization, hashing, and signing.
/// Future message kinds (pong, find-node, neighbours) plug in here.
pub trait Packet {
    /// Wire type tag prefixed to the serialized body.
    const PACKET_TYPE: PacketType;

    /// The ordered field list for body serialization.
    fn pack(&self) -> RlpItem;
}

/// A "node is alive, here is how to reach it" assertion.
///
/// Constructed immediately before sending and discarded after
/// serialization; never persisted.
#[derive(Debug, Clone)]
pub struct PingPacket {
    from: Endpoint,
    to: Endpoint,
}

impl PingPacket {
    /// Create a ping from the sender's own endpoint to a target endpoint.
    #[must_use]
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self { from, to }
    }

    /// The sender's advertised endpoint.
    #[must_use]
    pub fn from_endpoint(&self) -> &Endpoint {
        &self.from
    }

    /// The target's endpoint.
    #[must_use]
    pub fn to_endpoint(&self) -> &Endpoint {
        &self.to
    }
}

impl Packet for PingPacket {
    const PACKET_TYPE: PacketType = PacketType::Ping;

    /// Build the field list `[version, from, to, expiration]`.
    ///
    /// The expiration timestamp is read from the wall clock *here*, at pack
    /// time, as `now + EXPIRATION_WINDOW_SECS`. Re-packing the same packet
    /// later therefore yields different bytes. This is the freshness
    /// contract of the wire format, not an oversight: receivers drop
    /// packets whose timestamp is in the past, and the window is measured
    /// from serialization, not construction.
    fn pack(&self) -> RlpItem {
        RlpItem::List(vec![
            RlpItem::Bytes(vec![PROTOCOL_VERSION]),
            self.from.encode(),
            self.to.encode(),
            RlpItem::Bytes(expiration_timestamp().to_be_bytes().to_vec()),
        ])
    }
}

/// Current time plus the grace window, as the fixed-width u32 wire field.
fn expiration_timestamp() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_secs();

    // The wire field is a fixed-width u32; clamp rather than wrap if the
    // clock ever exceeds it.
    u32::try_from(now.saturating_add(EXPIRATION_WINDOW_SECS)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn test_ping() -> PingPacket {
        let from = Endpoint::from_parts("127.0.0.1", 30303, 30303).unwrap();
        let to = Endpoint::from_parts("10.0.0.5", 30303, 30303).unwrap();
        PingPacket::new(from, to)
    }

    fn timestamp_field(packed: &RlpItem) -> Vec<u8> {
        let RlpItem::List(fields) = packed else {
            panic!("ping must pack as a list");
        };
        let RlpItem::Bytes(timestamp) = &fields[3] else {
            panic!("expiration must be a byte string");
        };
        timestamp.clone()
    }

    #[test]
    fn test_packet_type_registry() {
        assert_eq!(PacketType::Ping.wire_byte(), 0x01);
        assert_eq!(PacketType::try_from(0x01).unwrap(), PacketType::Ping);
    }

    #[test]
    fn test_packet_type_rejects_unknown() {
        for value in [0x00, 0x02, 0x7f, 0xff] {
            let result = PacketType::try_from(value);
            assert!(matches!(result, Err(Error::UnknownPacketType(v)) if v == value));
        }
    }

    #[test]
    fn test_ping_pack_structure() {
        let RlpItem::List(fields) = test_ping().pack() else {
            panic!("ping must pack as a list");
        };

        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], RlpItem::Bytes(vec![PROTOCOL_VERSION]));
        assert!(matches!(&fields[1], RlpItem::List(triple) if triple.len() == 3));
        assert!(matches!(&fields[2], RlpItem::List(triple) if triple.len() == 3));
        assert_eq!(timestamp_field(&RlpItem::List(fields)).len(), 4);
    }

    #[test]
    fn test_expiration_is_in_the_future() {
        let timestamp = timestamp_field(&test_ping().pack());
        let expiration = u32::from_be_bytes(timestamp.try_into().unwrap());

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as u32;

        assert!(expiration > now);
        assert!(u64::from(expiration) <= u64::from(now) + EXPIRATION_WINDOW_SECS + 1);
    }

    // Freshness is intentional: packing the same packet twice more than a
    // second apart must produce different expiration bytes.
    #[test]
    fn test_repacking_produces_fresh_timestamp() {
        let ping = test_ping();

        let first = timestamp_field(&ping.pack());
        thread::sleep(Duration::from_millis(1100));
        let second = timestamp_field(&ping.pack());

        assert_ne!(first, second);
    }
}
