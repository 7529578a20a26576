//! Immutable node view with read accessors.
//!
//! A [`Node`] wraps a [`NodeBuf`] whose header has been validated and
//! exposes the layout arithmetic: pointer slots, the offset array, and
//! size-prefixed entry decoding. It never mutates the buffer; all
//! construction and editing goes through the builder and the
//! copy-on-write editor.

use crate::error::{Result, StorageError};
use crate::node::{NodeBuf, NodeHeader, ENTRY_PREFIX_SIZE, HEADER_SIZE, OFFSET_SIZE, POINTER_SIZE};
use crate::types::{NodeType, PageId, PAGE_SIZE};

/// An immutable B-tree node backed by a page buffer
#[derive(Clone)]
pub struct Node {
    buf: NodeBuf,
    /// Cached header (the buffer is immutable, so it cannot go stale)
    header: NodeHeader,
}

impl Node {
    /// Load a node from raw bytes, validating the header and that the
    /// pointer/offset arrays and entry region lie within the buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_buf(NodeBuf::from_bytes(bytes))
    }

    /// Take ownership of a buffer as a node, validating its layout
    pub fn from_buf(buf: NodeBuf) -> Result<Self> {
        let header = NodeHeader::read(&buf)
            .ok_or_else(|| StorageError::invalid_node("bad header: unknown type or truncated"))?;

        let node = Self { buf, header };

        let n = node.key_count();
        let region = node.entry_region_start(n);
        if region > node.buf.len() {
            return Err(StorageError::invalid_node(format!(
                "pointer/offset arrays for {n} keys exceed buffer"
            )));
        }
        if node.total_size() > node.buf.len() {
            return Err(StorageError::invalid_node(
                "entry region exceeds buffer".to_string(),
            ));
        }

        // each entry's size prefix must agree with the offset array and
        // keys must be strictly ascending; together with the bound
        // above this proves every key/value slice lies within the
        // buffer and offsets are non-decreasing
        let mut prev_key: Option<&[u8]> = None;
        for i in 0..n {
            let pos = node.entry_pos_unchecked(i);
            if pos + ENTRY_PREFIX_SIZE > node.buf.len() {
                return Err(StorageError::invalid_node(format!("entry {i} truncated")));
            }
            let klen = u16::from_le_bytes([node.buf[pos], node.buf[pos + 1]]) as usize;
            let vlen = u16::from_le_bytes([node.buf[pos + 2], node.buf[pos + 3]]) as usize;
            let end = pos + ENTRY_PREFIX_SIZE + klen + vlen;
            if end > node.buf.len() {
                return Err(StorageError::invalid_node(format!("entry {i} truncated")));
            }
            if end != region + node.offset_unchecked(i + 1) as usize {
                return Err(StorageError::invalid_node(format!(
                    "entry {i} size disagrees with offset array"
                )));
            }

            let key = &node.buf[pos + ENTRY_PREFIX_SIZE..pos + ENTRY_PREFIX_SIZE + klen];
            if let Some(prev) = prev_key {
                if prev >= key {
                    return Err(StorageError::invalid_node(format!(
                        "keys not strictly ascending at entry {i}"
                    )));
                }
            }
            prev_key = Some(key);
        }

        Ok(node)
    }

    /// Construct from a buffer the builder has already laid out
    pub(crate) fn from_built(buf: NodeBuf, header: NodeHeader) -> Self {
        Self { buf, header }
    }

    /// Get the node type
    pub fn node_type(&self) -> NodeType {
        self.header.node_type
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.header.node_type.is_leaf()
    }

    /// Get the number of keys in this node
    pub fn key_count(&self) -> usize {
        self.header.key_count as usize
    }

    /// Get the full backing buffer (may be an oversized scratch buffer)
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Get exactly one page of bytes for persistence
    ///
    /// Fails when the node has outgrown a single page; such a node must
    /// be split by a higher layer before it can be persisted.
    pub fn page_bytes(&self) -> Result<&[u8]> {
        let size = self.total_size();
        if size > PAGE_SIZE {
            return Err(StorageError::NodeTooLarge {
                size,
                max: PAGE_SIZE,
            });
        }
        Ok(&self.buf[..PAGE_SIZE])
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.key_count() {
            return Err(StorageError::IndexOutOfBounds {
                index,
                count: self.key_count(),
            });
        }
        Ok(())
    }

    /// Get the child page pointer at slot `index`
    pub fn pointer(&self, index: usize) -> Result<PageId> {
        self.check_index(index)?;
        let pos = HEADER_SIZE + POINTER_SIZE * index;
        let raw = u64::from_le_bytes(self.buf[pos..pos + 8].try_into().unwrap());
        Ok(PageId::new(raw))
    }

    /// Byte offset where the entry region starts for a node with `n`
    /// keys: header + pointer array + offset array
    fn entry_region_start(&self, n: usize) -> usize {
        HEADER_SIZE + (POINTER_SIZE + OFFSET_SIZE) * n
    }

    /// Relative offset of entry `index` within the entry region
    ///
    /// Entry 0 starts implicitly at 0; for `index >= 1` this reads slot
    /// `index - 1` of the offset array. Valid for `index <= key_count`;
    /// the `key_count` case yields the region's end.
    pub fn offset(&self, index: usize) -> Result<u16> {
        if index > self.key_count() {
            return Err(StorageError::IndexOutOfBounds {
                index,
                count: self.key_count(),
            });
        }
        Ok(self.offset_unchecked(index))
    }

    fn offset_unchecked(&self, index: usize) -> u16 {
        if index == 0 {
            return 0;
        }
        let pos = HEADER_SIZE + POINTER_SIZE * self.key_count() + OFFSET_SIZE * (index - 1);
        u16::from_le_bytes([self.buf[pos], self.buf[pos + 1]])
    }

    /// Absolute byte position of entry `index`'s size prefix
    ///
    /// Valid for `index <= key_count`; the `key_count` case is the
    /// position just past the last entry.
    pub fn entry_pos(&self, index: usize) -> Result<usize> {
        self.offset(index)
            .map(|off| self.entry_region_start(self.key_count()) + off as usize)
    }

    fn entry_pos_unchecked(&self, index: usize) -> usize {
        self.entry_region_start(self.key_count()) + self.offset_unchecked(index) as usize
    }

    /// Get the key bytes of entry `index`
    pub fn key(&self, index: usize) -> Result<&[u8]> {
        self.check_index(index)?;
        let pos = self.entry_pos_unchecked(index);
        let klen = u16::from_le_bytes([self.buf[pos], self.buf[pos + 1]]) as usize;
        let start = pos + ENTRY_PREFIX_SIZE;
        Ok(&self.buf[start..start + klen])
    }

    /// Get the value bytes of entry `index` (empty for internal nodes)
    pub fn value(&self, index: usize) -> Result<&[u8]> {
        self.check_index(index)?;
        let pos = self.entry_pos_unchecked(index);
        let klen = u16::from_le_bytes([self.buf[pos], self.buf[pos + 1]]) as usize;
        let vlen = u16::from_le_bytes([self.buf[pos + 2], self.buf[pos + 3]]) as usize;
        let start = pos + ENTRY_PREFIX_SIZE + klen;
        Ok(&self.buf[start..start + vlen])
    }

    /// Number of bytes this node currently occupies
    pub fn total_size(&self) -> usize {
        self.entry_pos_unchecked(self.key_count())
    }

    /// Check that this node fits within a single page
    pub fn fits_page(&self) -> bool {
        self.total_size() <= PAGE_SIZE
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("node_type", &self.node_type())
            .field("key_count", &self.key_count())
            .field("total_size", &self.total_size())
            .finish()
    }
}
