//! Append-in-order node construction.
//!
//! The offset-chaining append primitive is stateful: writing entry `i`
//! depends on the offset recorded while writing entry `i-1`. The
//! builder owns that state and tracks the next index internally, so
//! out-of-order appends are impossible by construction rather than by
//! caller discipline.

use crate::error::{Result, StorageError};
use crate::node::{
    Node, NodeBuf, NodeHeader, ENTRY_PREFIX_SIZE, HEADER_SIZE, OFFSET_SIZE, POINTER_SIZE,
};
use crate::types::{NodeType, PageId, MAX_KEY_SIZE, MAX_VALUE_SIZE};

/// Builds a node by appending entries strictly in ascending key order
pub struct NodeBuilder {
    buf: NodeBuf,
    header: NodeHeader,
    /// Index of the next entry to append
    next: usize,
}

impl NodeBuilder {
    /// Start a node in a single-page buffer
    pub fn new(node_type: NodeType, key_count: u16) -> Self {
        Self::scratch(node_type, key_count, 1)
    }

    /// Start a node in an oversized scratch buffer spanning `pages`
    /// pages, for edit results that may overflow one page before a
    /// split layer divides them
    pub fn scratch(node_type: NodeType, key_count: u16, pages: usize) -> Self {
        let mut buf = NodeBuf::with_pages(pages);
        let header = NodeHeader {
            node_type,
            key_count,
        };
        header.write(&mut buf);
        Self {
            buf,
            header,
            next: 0,
        }
    }

    fn key_count(&self) -> usize {
        self.header.key_count as usize
    }

    fn set_pointer(&mut self, index: usize, ptr: PageId) {
        let pos = HEADER_SIZE + POINTER_SIZE * index;
        self.buf[pos..pos + 8].copy_from_slice(&ptr.value().to_le_bytes());
    }

    /// Entry 0's start is implicit; offsets for later entries live in
    /// slot `index - 1` of the offset array.
    fn set_offset(&mut self, index: usize, offset: u16) {
        if index == 0 {
            return;
        }
        let pos = HEADER_SIZE + POINTER_SIZE * self.key_count() + OFFSET_SIZE * (index - 1);
        self.buf[pos..pos + 2].copy_from_slice(&offset.to_le_bytes());
    }

    fn offset(&self, index: usize) -> u16 {
        if index == 0 {
            return 0;
        }
        let pos = HEADER_SIZE + POINTER_SIZE * self.key_count() + OFFSET_SIZE * (index - 1);
        u16::from_le_bytes([self.buf[pos], self.buf[pos + 1]])
    }

    fn entry_pos(&self, index: usize) -> usize {
        HEADER_SIZE + (POINTER_SIZE + OFFSET_SIZE) * self.key_count() + self.offset(index) as usize
    }

    /// Key bytes of an already-appended entry
    fn key_at(&self, index: usize) -> &[u8] {
        let pos = self.entry_pos(index);
        let klen = u16::from_le_bytes([self.buf[pos], self.buf[pos + 1]]) as usize;
        &self.buf[pos + ENTRY_PREFIX_SIZE..pos + ENTRY_PREFIX_SIZE + klen]
    }

    /// Append the next entry: pointer slot, size-prefixed key/value
    /// bytes, and the chained end offset for the entry that follows.
    ///
    /// Leaf entries pass [`PageId::NULL`] as the pointer. Fails on an
    /// append past the declared key count, an oversized key or value,
    /// a key not strictly greater than the previous one, or an entry
    /// that would overflow the buffer.
    pub fn append(&mut self, ptr: PageId, key: &[u8], value: &[u8]) -> Result<()> {
        let index = self.next;
        if index >= self.key_count() {
            return Err(StorageError::IndexOutOfBounds {
                index,
                count: self.key_count(),
            });
        }
        if key.len() > MAX_KEY_SIZE {
            return Err(StorageError::KeyTooLarge {
                size: key.len(),
                max: MAX_KEY_SIZE,
            });
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(StorageError::ValueTooLarge {
                size: value.len(),
                max: MAX_VALUE_SIZE,
            });
        }
        if index > 0 && self.key_at(index - 1) >= key {
            return Err(StorageError::KeyOrder);
        }

        let pos = self.entry_pos(index);
        let end = pos + ENTRY_PREFIX_SIZE + key.len() + value.len();
        let next_offset = self.offset(index) as usize + ENTRY_PREFIX_SIZE + key.len() + value.len();
        // offsets are stored as u16, which also caps how large a
        // scratch buffer can usefully be
        if end > self.buf.len() || next_offset > u16::MAX as usize {
            return Err(StorageError::NodeTooLarge {
                size: end,
                max: self.buf.len().min(u16::MAX as usize),
            });
        }

        self.set_pointer(index, ptr);

        self.buf[pos..pos + 2].copy_from_slice(&(key.len() as u16).to_le_bytes());
        self.buf[pos + 2..pos + 4].copy_from_slice(&(value.len() as u16).to_le_bytes());
        self.buf[pos + 4..pos + 4 + key.len()].copy_from_slice(key);
        self.buf[pos + 4 + key.len()..end].copy_from_slice(value);

        self.set_offset(index + 1, next_offset as u16);

        self.next += 1;
        Ok(())
    }

    /// Finish construction, yielding the immutable node
    ///
    /// Fails unless exactly `key_count` entries were appended.
    pub fn finish(self) -> Result<Node> {
        if self.next != self.key_count() {
            return Err(StorageError::invalid_node(format!(
                "{} of {} entries appended",
                self.next,
                self.key_count()
            )));
        }
        Ok(Node::from_built(self.buf, self.header))
    }
}
