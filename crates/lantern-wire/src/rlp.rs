//! Recursive length-prefix encoding for packet bodies.
//!
//! The body of every discovery packet is a nested structure of byte strings
//! and lists, serialized with the recursive length-prefix scheme of the
//! protocol family:
//!
//! - a single byte below `0x80` encodes as itself
//! - a byte string of up to 55 bytes gets a `0x80 + len` prefix; longer
//!   strings get `0xb7 + len_of_len` followed by the big-endian length
//! - a list concatenates its encoded items behind a `0xc0 + len` prefix, or
//!   `0xf7 + len_of_len` plus the big-endian length for payloads over 55
//!   bytes
//!
//! Integers are represented as minimal big-endian byte strings within this
//! scheme, except for the protocol's fixed-width fields (endpoint ports,
//! expiration timestamp), which the packet model emits pre-packed.

/// One node of the recursive byte-string/list structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// A plain byte string
    Bytes(Vec<u8>),
    /// An ordered list of nested items
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Serialize this item and everything below it.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            RlpItem::Bytes(bytes) => {
                if bytes.len() == 1 && bytes[0] < 0x80 {
                    out.push(bytes[0]);
                } else {
                    write_header(out, bytes.len(), 0x80);
                    out.extend_from_slice(bytes);
                }
            }
            RlpItem::List(items) => {
                let mut payload = Vec::new();
                for item in items {
                    item.encode_into(&mut payload);
                }
                write_header(out, payload.len(), 0xc0);
                out.extend_from_slice(&payload);
            }
        }
    }
}

fn write_header(out: &mut Vec<u8>, len: usize, offset: u8) {
    if len <= 55 {
        out.push(offset + len as u8);
    } else {
        let len_bytes = minimal_be_bytes(len);
        out.push(offset + 55 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
}

fn minimal_be_bytes(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    bytes[first..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(data: &[u8]) -> RlpItem {
        RlpItem::Bytes(data.to_vec())
    }

    // Test vectors from the protocol family's canonical suite.

    #[test]
    fn test_single_byte_encodes_as_itself() {
        assert_eq!(bytes(&[0x00]).encode(), vec![0x00]);
        assert_eq!(bytes(&[0x0f]).encode(), vec![0x0f]);
        assert_eq!(bytes(&[0x7f]).encode(), vec![0x7f]);
    }

    #[test]
    fn test_high_single_byte_gets_prefix() {
        assert_eq!(bytes(&[0x80]).encode(), vec![0x81, 0x80]);
        assert_eq!(bytes(&[0xff]).encode(), vec![0x81, 0xff]);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(bytes(b"").encode(), vec![0x80]);
    }

    #[test]
    fn test_short_string() {
        assert_eq!(bytes(b"dog").encode(), vec![0x83, b'd', b'o', b'g']);
    }

    #[test]
    fn test_string_at_55_byte_boundary() {
        let data = vec![0xAA; 55];
        let encoded = bytes(&data).encode();
        assert_eq!(encoded[0], 0x80 + 55);
        assert_eq!(encoded.len(), 56);
    }

    #[test]
    fn test_long_string() {
        // "Lorem ipsum dolor sit amet, consectetur adipisicing elit" (56 bytes)
        let data = b"Lorem ipsum dolor sit amet, consectetur adipisicing elit";
        let encoded = bytes(data).encode();
        assert_eq!(encoded[0], 0xb8);
        assert_eq!(encoded[1], 56);
        assert_eq!(&encoded[2..], data);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(RlpItem::List(vec![]).encode(), vec![0xc0]);
    }

    #[test]
    fn test_short_list() {
        let item = RlpItem::List(vec![bytes(b"cat"), bytes(b"dog")]);
        assert_eq!(
            item.encode(),
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );
    }

    #[test]
    fn test_nested_lists() {
        // The set-theoretic representation of three:
        // [ [], [[]], [ [], [[]] ] ]
        let item = RlpItem::List(vec![
            RlpItem::List(vec![]),
            RlpItem::List(vec![RlpItem::List(vec![])]),
            RlpItem::List(vec![
                RlpItem::List(vec![]),
                RlpItem::List(vec![RlpItem::List(vec![])]),
            ]),
        ]);

        assert_eq!(
            item.encode(),
            vec![0xc7, 0xc0, 0xc1, 0xc0, 0xc3, 0xc0, 0xc1, 0xc0]
        );
    }

    #[test]
    fn test_long_list() {
        let items: Vec<RlpItem> = (0..20).map(|_| bytes(b"abc")).collect();
        let encoded = RlpItem::List(items).encode();

        // 20 items of 4 bytes each = 80-byte payload, over the 55-byte limit
        assert_eq!(encoded[0], 0xf8);
        assert_eq!(encoded[1], 80);
        assert_eq!(encoded.len(), 82);
    }
}
