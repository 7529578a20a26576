//! Consumer-facing contracts for the layers built on top of the node
//! engine.
//!
//! The recursive tree walk, split/merge logic, page allocator and the
//! public key-value facade live outside this crate. These traits pin
//! down the interfaces they provide and consume, so that layer can be
//! added without touching node-internal invariants.

use crate::error::Result;
use crate::node::Node;
use crate::types::PageId;

/// Page allocation and node I/O, provided by the allocator layer.
///
/// Ownership and reclamation of superseded node buffers belongs here;
/// the node engine holds no registry of live nodes.
pub trait PageStore {
    /// Load the node stored under a page ID
    fn read_node(&self, id: PageId) -> Result<Node>;

    /// Store a node, returning the page ID assigned to it
    ///
    /// Copy-on-write: every new node version gets a fresh page.
    fn write_node(&mut self, node: &Node) -> Result<PageId>;

    /// Release a page whose node version is no longer referenced
    fn free_node(&mut self, id: PageId) -> Result<()>;
}

/// Streaming cursor over key-value pairs in ascending key order.
pub trait KvIter {
    /// Advance and yield the next pair, or `None` when exhausted
    fn next(&mut self) -> Option<(Vec<u8>, Vec<u8>)>;
}

/// The key-value API a store facade exposes over the tree.
pub trait KvStore {
    /// Get the value for a key, or `None` if absent
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Insert or overwrite a key-value pair
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Delete a key, returning whether it existed
    fn delete(&mut self, key: &[u8]) -> Result<bool>;

    /// Cursor over all pairs with key greater than `start`, in
    /// ascending key order
    fn scan_from(&self, start: &[u8]) -> Result<Box<dyn KvIter + '_>>;
}
