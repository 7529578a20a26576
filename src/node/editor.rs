//! Copy-on-write leaf edits.
//!
//! Every edit builds a brand-new buffer from the source node plus one
//! point change; the source bytes are never touched. Readers holding
//! the old version keep a fully valid node, at the cost of an O(node
//! size) copy per edit.
//!
//! Edit results go into a two-page scratch buffer so a result that
//! outgrows one page is still representable; the (external) split
//! layer decides what to do when [`Node::fits_page`] is false.

use crate::error::{Result, StorageError};
use crate::node::{Node, NodeBuilder};
use crate::types::{NodeType, PageId};

/// Number of scratch pages for edit results that may overflow one page
const EDIT_SCRATCH_PAGES: usize = 2;

/// Append `count` entries of `src` starting at `src_start`, carrying
/// pointers, keys and values.
///
/// Ranges are copied left to right because each append chains off the
/// previous entry's offset.
pub fn copy_range(dst: &mut NodeBuilder, src: &Node, src_start: usize, count: usize) -> Result<()> {
    for i in 0..count {
        let from = src_start + i;
        dst.append(src.pointer(from)?, src.key(from)?, src.value(from)?)?;
    }
    Ok(())
}

impl Node {
    fn check_leaf(&self) -> Result<()> {
        if !self.is_leaf() {
            return Err(StorageError::invalid_node(
                "leaf edit on an internal node".to_string(),
            ));
        }
        Ok(())
    }

    /// Derive a new leaf with `(key, value)` inserted at position `at`.
    ///
    /// The key must not already exist in this node; `at` is typically
    /// `floor_index(key)` plus one. The result has one more entry than
    /// the source.
    pub fn leaf_insert(&self, at: usize, key: &[u8], value: &[u8]) -> Result<Node> {
        self.check_leaf()?;
        let count = self.key_count();
        if at > count {
            return Err(StorageError::IndexOutOfBounds { index: at, count });
        }

        let mut dst = NodeBuilder::scratch(NodeType::Leaf, count as u16 + 1, EDIT_SCRATCH_PAGES);
        copy_range(&mut dst, self, 0, at)?;
        dst.append(PageId::NULL, key, value)?;
        copy_range(&mut dst, self, at, count - at)?;
        dst.finish()
    }

    /// Derive a new leaf with the entry at `at` replaced by
    /// `(key, value)`.
    ///
    /// The key must equal the existing key at `at`; the result has the
    /// same entry count as the source.
    pub fn leaf_update(&self, at: usize, key: &[u8], value: &[u8]) -> Result<Node> {
        self.check_leaf()?;
        let count = self.key_count();
        if at >= count {
            return Err(StorageError::IndexOutOfBounds { index: at, count });
        }

        let mut dst = NodeBuilder::scratch(NodeType::Leaf, count as u16, EDIT_SCRATCH_PAGES);
        copy_range(&mut dst, self, 0, at)?;
        dst.append(PageId::NULL, key, value)?;
        copy_range(&mut dst, self, at + 1, count - (at + 1))?;
        dst.finish()
    }

    /// Derive a new leaf with `key` set to `value`, overwriting an
    /// existing entry or inserting a new one.
    ///
    /// The sole entry point a higher layer needs for a point write
    /// against a single leaf; it hides the insert/overwrite
    /// distinction. A probe that sorts before every key inserts at
    /// position 0.
    pub fn leaf_upsert(&self, key: &[u8], value: &[u8]) -> Result<Node> {
        self.check_leaf()?;
        match self.floor_index(key)? {
            Some(at) if self.key(at)? == key => self.leaf_update(at, key, value),
            Some(at) => self.leaf_insert(at + 1, key, value),
            None => self.leaf_insert(0, key, value),
        }
    }

    /// Derive a new leaf with the entry at `at` removed.
    ///
    /// Structural mirror of insert: copy before, skip the target, copy
    /// after. The result has one less entry than the source.
    pub fn leaf_delete(&self, at: usize) -> Result<Node> {
        self.check_leaf()?;
        let count = self.key_count();
        if at >= count {
            return Err(StorageError::IndexOutOfBounds { index: at, count });
        }

        let mut dst = NodeBuilder::scratch(NodeType::Leaf, count as u16 - 1, EDIT_SCRATCH_PAGES);
        copy_range(&mut dst, self, 0, at)?;
        copy_range(&mut dst, self, at + 1, count - (at + 1))?;
        dst.finish()
    }
}
