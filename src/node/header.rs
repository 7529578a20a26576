//! Node header codec.
//!
//! The header occupies the first bytes of every node and is the only
//! fixed-position metadata; everything else is derived from it.

use crate::types::NodeType;

/// Size of the node header in bytes
///
/// Layout:
/// ```text
/// Offset  Size  Description
/// 0       2     Node type tag (1 = internal, 2 = leaf)
/// 2       2     Number of keys
/// ```
pub const HEADER_SIZE: usize = 4;

/// Node header structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHeader {
    /// Type of this node (leaf or internal)
    pub node_type: NodeType,
    /// Number of keys (and pointer slots) in this node
    pub key_count: u16,
}

impl NodeHeader {
    /// Create a header for a leaf node
    pub fn new_leaf(key_count: u16) -> Self {
        Self {
            node_type: NodeType::Leaf,
            key_count,
        }
    }

    /// Create a header for an internal node
    pub fn new_internal(key_count: u16) -> Self {
        Self {
            node_type: NodeType::Internal,
            key_count,
        }
    }

    /// Read a node header from bytes
    ///
    /// Returns `None` if the buffer is too short or the type tag is
    /// not a known node type.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_SIZE {
            return None;
        }

        let node_type = NodeType::from_u16(u16::from_le_bytes([bytes[0], bytes[1]]))?;
        let key_count = u16::from_le_bytes([bytes[2], bytes[3]]);

        Some(Self {
            node_type,
            key_count,
        })
    }

    /// Write this header to bytes
    pub fn write(&self, bytes: &mut [u8]) {
        bytes[0..2].copy_from_slice(&(self.node_type as u16).to_le_bytes());
        bytes[2..4].copy_from_slice(&self.key_count.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let header = NodeHeader::new_leaf(5);

        let mut bytes = [0u8; HEADER_SIZE];
        header.write(&mut bytes);

        // little-endian on-page contract
        assert_eq!(bytes, [2, 0, 5, 0]);

        let read_header = NodeHeader::read(&bytes).unwrap();
        assert_eq!(read_header, header);
    }

    #[test]
    fn test_internal_header() {
        let header = NodeHeader::new_internal(300);

        let mut bytes = [0u8; HEADER_SIZE];
        header.write(&mut bytes);

        let read_header = NodeHeader::read(&bytes).unwrap();
        assert_eq!(read_header.node_type, NodeType::Internal);
        assert_eq!(read_header.key_count, 300);
    }

    #[test]
    fn test_rejects_bad_input() {
        // truncated
        assert!(NodeHeader::read(&[2, 0]).is_none());
        // unknown type tag
        assert!(NodeHeader::read(&[9, 0, 1, 0]).is_none());
    }
}
