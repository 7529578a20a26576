//! Common types and constants used throughout the node engine.

mod page_id;

pub use page_id::PageId;

/// Page size in bytes (4KB)
pub const PAGE_SIZE: usize = 4096;

/// Maximum key size in bytes
pub const MAX_KEY_SIZE: usize = 1000;

/// Maximum value size in bytes
pub const MAX_VALUE_SIZE: usize = 3000;

// A node holding a single maximally-sized entry must fit in one page:
// 4-byte header + one 8-byte pointer slot + one 2-byte offset slot +
// 4-byte entry size prefix + key + value. Splitting layers rely on this
// bound, so it is proven at compile time.
const _: () = assert!(
    4 + 8 + 2 + 4 + MAX_KEY_SIZE + MAX_VALUE_SIZE <= PAGE_SIZE,
    "one maximal entry must fit in a single page"
);

/// Node types
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Internal node: keys and child page pointers, no values
    Internal = 1,
    /// Leaf node: key-value entries
    Leaf = 2,
}

impl NodeType {
    /// Check if this is a leaf node type
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// Convert from the on-page u16 tag
    pub fn from_u16(v: u16) -> Option<Self> {
        match v {
            1 => Some(Self::Internal),
            2 => Some(Self::Leaf),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_conversions() {
        assert!(NodeType::Leaf.is_leaf());
        assert!(!NodeType::Internal.is_leaf());

        assert_eq!(NodeType::from_u16(1), Some(NodeType::Internal));
        assert_eq!(NodeType::from_u16(2), Some(NodeType::Leaf));
        assert_eq!(NodeType::from_u16(0), None);
        assert_eq!(NodeType::from_u16(3), None);
    }
}
