//! Endpoint encoding: fixed-width IPv4 + port triples.

use std::net::{Ipv4Addr, SocketAddr};

use crate::error::Error;
use crate::rlp::RlpItem;

/// A reachable network location: IPv4 address plus UDP and TCP ports.
///
/// Packets own their endpoints by value; once constructed an endpoint is
/// immutable. The `u16` port fields make the 16-bit invariant structural -
/// range checking happens at the untyped boundary in
/// [`Endpoint::from_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    address: Ipv4Addr,
    udp_port: u16,
    tcp_port: u16,
}

impl Endpoint {
    /// Create an endpoint from already-typed parts.
    #[must_use]
    pub fn new(address: Ipv4Addr, udp_port: u16, tcp_port: u16) -> Self {
        Self {
            address,
            udp_port,
            tcp_port,
        }
    }

    /// Create an endpoint from untyped parts, validating both the address
    /// literal and the port ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if `address` is not an IPv4
    /// literal, [`Error::PortOutOfRange`] if either port is negative or
    /// exceeds 65535.
    pub fn from_parts(address: &str, udp_port: i64, tcp_port: i64) -> Result<Self, Error> {
        let address = address
            .parse()
            .map_err(|_| Error::InvalidAddress(address.to_string()))?;

        Ok(Self::new(address, check_port(udp_port)?, check_port(tcp_port)?))
    }

    /// The IPv4 address.
    #[must_use]
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// The UDP port.
    #[must_use]
    pub fn udp_port(&self) -> u16 {
        self.udp_port
    }

    /// The TCP port.
    #[must_use]
    pub fn tcp_port(&self) -> u16 {
        self.tcp_port
    }

    /// The socket address datagrams to this endpoint are sent to.
    #[must_use]
    pub fn udp_addr(&self) -> SocketAddr {
        SocketAddr::from((self.address, self.udp_port))
    }

    /// Encode as the wire triple: 4-byte big-endian packed address, 2-byte
    /// big-endian UDP port, 2-byte big-endian TCP port.
    ///
    /// All three fields are fixed-width by protocol definition - unlike
    /// general integers in the body encoding, leading zeroes are kept.
    #[must_use]
    pub fn encode(&self) -> RlpItem {
        RlpItem::List(vec![
            RlpItem::Bytes(self.address.octets().to_vec()),
            RlpItem::Bytes(self.udp_port.to_be_bytes().to_vec()),
            RlpItem::Bytes(self.tcp_port.to_be_bytes().to_vec()),
        ])
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}/{}", self.address, self.udp_port, self.tcp_port)
    }
}

fn check_port(port: i64) -> Result<u16, Error> {
    u16::try_from(port).map_err(|_| Error::PortOutOfRange(port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_valid() {
        let endpoint = Endpoint::from_parts("127.0.0.1", 30303, 30304).unwrap();

        assert_eq!(endpoint.address(), Ipv4Addr::LOCALHOST);
        assert_eq!(endpoint.udp_port(), 30303);
        assert_eq!(endpoint.tcp_port(), 30304);
    }

    #[test]
    fn test_from_parts_rejects_bad_address() {
        for bad in ["not-an-ip", "256.0.0.1", "10.0.0", ""] {
            let result = Endpoint::from_parts(bad, 30303, 30303);
            assert!(
                matches!(result, Err(Error::InvalidAddress(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_parts_rejects_ipv6() {
        let result = Endpoint::from_parts("::1", 30303, 30303);
        assert!(matches!(result, Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_port_boundaries() {
        assert!(Endpoint::from_parts("10.0.0.5", 0, 65535).is_ok());

        let too_big = Endpoint::from_parts("10.0.0.5", 65536, 30303);
        assert!(matches!(too_big, Err(Error::PortOutOfRange(65536))));

        let negative = Endpoint::from_parts("10.0.0.5", 30303, -1);
        assert!(matches!(negative, Err(Error::PortOutOfRange(-1))));
    }

    #[test]
    fn test_encode_field_widths() {
        let endpoint = Endpoint::from_parts("192.168.1.1", 30303, 30303).unwrap();

        let RlpItem::List(fields) = endpoint.encode() else {
            panic!("endpoint must encode as a list");
        };
        assert_eq!(fields.len(), 3);

        let RlpItem::Bytes(address) = &fields[0] else {
            panic!("address must be a byte string");
        };
        assert_eq!(address, &[192, 168, 1, 1]);

        let RlpItem::Bytes(udp) = &fields[1] else {
            panic!("udp port must be a byte string");
        };
        assert_eq!(udp, &[0x76, 0x5f]); // 30303 big-endian

        let RlpItem::Bytes(tcp) = &fields[2] else {
            panic!("tcp port must be a byte string");
        };
        assert_eq!(tcp, &[0x76, 0x5f]);
    }

    #[test]
    fn test_encode_keeps_leading_zeroes() {
        // Port 80 fits in one byte but stays 2 bytes on the wire; the zero
        // address stays 4 bytes.
        let endpoint = Endpoint::new(Ipv4Addr::UNSPECIFIED, 80, 0);

        let RlpItem::List(fields) = endpoint.encode() else {
            panic!("endpoint must encode as a list");
        };

        assert_eq!(fields[0], RlpItem::Bytes(vec![0, 0, 0, 0]));
        assert_eq!(fields[1], RlpItem::Bytes(vec![0x00, 0x50]));
        assert_eq!(fields[2], RlpItem::Bytes(vec![0x00, 0x00]));
    }

    #[test]
    fn test_encoded_wire_bytes() {
        let endpoint = Endpoint::from_parts("127.0.0.1", 30303, 30303).unwrap();
        let encoded = endpoint.encode().encode();

        // list(10) | str(4) 127.0.0.1 | str(2) port | str(2) port
        assert_eq!(
            encoded,
            vec![0xca, 0x84, 127, 0, 0, 1, 0x82, 0x76, 0x5f, 0x82, 0x76, 0x5f]
        );
    }

    #[test]
    fn test_udp_addr() {
        let endpoint = Endpoint::from_parts("10.0.0.5", 30303, 30304).unwrap();
        assert_eq!(endpoint.udp_addr(), "10.0.0.5:30303".parse().unwrap());
    }
}
