//! # Copy-on-Write B-Tree Node Engine
//!
//! The node-level core of a page-oriented, copy-on-write B-tree for an
//! embedded key-value store.
//!
//! ## Architecture
//!
//! - **Node Layer** (`node`): fixed binary node layout within one page,
//!   append-in-order construction, floor-index key search, and
//!   copy-on-write leaf edits
//! - **Storage Layer** (`storage`): crash-consistent write-replace-fsync
//!   persistence of page buffers
//! - **Store Contracts** (`store`): traits for the out-of-scope tree,
//!   allocator and key-value facade layers
//!
//! Every edit derives a brand-new node buffer; a source node is never
//! mutated, so readers holding an older version are unaffected by
//! writers. A single maximally-sized entry is guaranteed to fit in one
//! page, the precondition any splitting layer relies on.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cow_btree::{Node, NodeBuilder, NodeType, PageId, persist_node};
//!
//! let mut builder = NodeBuilder::new(NodeType::Leaf, 2);
//! builder.append(PageId::NULL, b"k1", b"hi")?;
//! builder.append(PageId::NULL, b"k3", b"world")?;
//! let leaf = builder.finish()?;
//!
//! // copy-on-write point edit; `leaf` is untouched
//! let edited = leaf.leaf_upsert(b"k2", b"mid")?;
//!
//! persist_node("tree.page".as_ref(), &edited)?;
//! ```

pub mod error;
pub mod node;
pub mod storage;
pub mod store;
pub mod types;

pub use error::{Result, StorageError};
pub use node::{copy_range, Node, NodeBuf, NodeBuilder};
pub use storage::{persist, persist_node};
pub use store::{KvIter, KvStore, PageStore};
pub use types::{NodeType, PageId, MAX_KEY_SIZE, MAX_VALUE_SIZE, PAGE_SIZE};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use tempfile::tempdir;

    #[test]
    fn test_edit_persist_reload() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leaf.page");

        let mut builder = NodeBuilder::new(NodeType::Leaf, 2);
        builder.append(PageId::NULL, b"k1", b"hi")?;
        builder.append(PageId::NULL, b"k3", b"world")?;
        let leaf = builder.finish()?;

        let edited = leaf.leaf_upsert(b"k2", b"mid")?;
        persist_node(&path, &edited)?;

        let reloaded = Node::from_bytes(&std::fs::read(&path)?)?;
        assert_eq!(reloaded.key_count(), 3);
        assert_eq!(reloaded.key(1)?, b"k2");
        assert_eq!(reloaded.value(1)?, b"mid");

        // the pre-edit node still reads as before
        assert_eq!(leaf.key_count(), 2);
        assert_eq!(leaf.value(1)?, b"world");

        Ok(())
    }

    #[test]
    fn test_randomized_roundtrip() -> Result<()> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        // distinct keys in ascending order, random sizes
        let mut keys: Vec<Vec<u8>> = (0..50u32)
            .map(|i| {
                let mut key = i.to_be_bytes().to_vec();
                key.extend((0..rng.gen_range(0..16)).map(|_| rng.gen::<u8>()));
                key
            })
            .collect();
        keys.sort();
        keys.dedup();

        let values: Vec<Vec<u8>> = keys
            .iter()
            .map(|_| (0..rng.gen_range(0..40)).map(|_| rng.gen::<u8>()).collect())
            .collect();

        let mut builder = NodeBuilder::scratch(NodeType::Leaf, keys.len() as u16, 2);
        for (key, value) in keys.iter().zip(&values) {
            builder.append(PageId::NULL, key, value)?;
        }
        let node = builder.finish()?;

        for (i, (key, value)) in keys.iter().zip(&values).enumerate() {
            assert_eq!(node.key(i)?, key.as_slice());
            assert_eq!(node.value(i)?, value.as_slice());
            assert_eq!(node.floor_index(key)?, Some(i));
        }

        // probe in shuffled order too
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.shuffle(&mut rng);
        for i in order {
            assert_eq!(node.floor_index(&keys[i])?, Some(i));
        }

        Ok(())
    }

    #[test]
    fn test_random_upsert_sequence_stays_sorted() -> Result<()> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        let mut node = NodeBuilder::new(NodeType::Leaf, 0).finish()?;
        let mut expected = std::collections::BTreeMap::new();

        for _ in 0..60 {
            let key = vec![rng.gen_range(b'a'..=b'p')];
            let value: Vec<u8> = (0..rng.gen_range(1..8)).map(|_| rng.gen::<u8>()).collect();
            node = node.leaf_upsert(&key, &value)?;
            expected.insert(key, value);
        }

        assert_eq!(node.key_count(), expected.len());
        for (i, (key, value)) in expected.iter().enumerate() {
            assert_eq!(node.key(i)?, key.as_slice());
            assert_eq!(node.value(i)?, value.as_slice());
        }

        Ok(())
    }
}
