//! Node layer: fixed-layout B-tree nodes inside fixed-size pages.
//!
//! A node is entirely self-describing within its page buffer:
//! ```text
//! | type | nkeys |  pointers  |  offsets   | entries | unused |
//! |  2B  |  2B   | nkeys x 8B | nkeys x 2B |   ...   |        |
//! ```
//!
//! Each entry is a size-prefixed key-value pair:
//! ```text
//! | key_len | val_len | key | val |
//! |   2B    |   2B    | ... | ... |
//! ```
//! Internal nodes carry keys only; their entries have a zero value
//! length. All integers are little-endian.
//!
//! The offset array holds the end offset of each entry relative to the
//! start of the entry region; entry 0 starts implicitly at offset 0, so
//! its start is never stored. Offsets are non-decreasing and the last
//! one equals the total size of the entry region, which makes locating
//! the nth entry an O(1) lookup.
//!
//! Nodes are immutable once built. Construction goes through
//! [`NodeBuilder`], which appends entries strictly in ascending key
//! order; every edit derives a brand-new buffer from the old one
//! (copy-on-write), so readers holding an old version are never
//! affected by a writer.

mod builder;
mod editor;
mod header;
#[allow(clippy::module_inception)]
mod node;
mod search;

pub use builder::NodeBuilder;
pub use editor::copy_range;
pub use header::{NodeHeader, HEADER_SIZE};
pub use node::Node;

use crate::types::PAGE_SIZE;

/// Size of one child-pointer slot in bytes
pub const POINTER_SIZE: usize = 8;

/// Size of one offset slot in bytes
pub const OFFSET_SIZE: usize = 2;

/// Size of an entry's key-length/value-length prefix in bytes
pub const ENTRY_PREFIX_SIZE: usize = 4;

/// A raw node buffer.
///
/// Normally exactly one page. Construction may use an oversized scratch
/// buffer (a whole multiple of the page size) for edit results that a
/// later split layer would divide; persisted nodes must fit one page.
#[derive(Clone)]
pub struct NodeBuf {
    data: Vec<u8>,
}

impl NodeBuf {
    /// Create a new zeroed single-page buffer
    pub fn new() -> Self {
        Self::with_pages(1)
    }

    /// Create a new zeroed buffer spanning `pages` pages (at least one)
    pub fn with_pages(pages: usize) -> Self {
        Self {
            data: vec![0u8; PAGE_SIZE * pages.max(1)],
        }
    }

    /// Create a buffer from raw bytes, zero-padded to a page multiple
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let pages = bytes.len().div_ceil(PAGE_SIZE);
        let mut buf = Self::with_pages(pages);
        buf.data[..bytes.len()].copy_from_slice(bytes);
        buf
    }

    /// Get a reference to the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get a mutable reference to the raw bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Default for NodeBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for NodeBuf {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl std::ops::DerefMut for NodeBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl AsRef<[u8]> for NodeBuf {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for NodeBuf {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
