//! Ordered key search within a node.

use crate::error::Result;
use crate::node::Node;

impl Node {
    /// Find the largest index whose key is `<=` the probe key.
    ///
    /// Binary search over the node's ascending keys. Returns `None`
    /// when the probe sorts before every key (including the zero-key
    /// node), so "before first key" is an explicit case instead of a
    /// wrapped-around index.
    pub fn floor_index(&self, probe: &[u8]) -> Result<Option<usize>> {
        let count = self.key_count();
        if count == 0 || self.key(0)? > probe {
            return Ok(None);
        }

        // invariant: key(low - 1) <= probe, every key at high.. is > probe
        let mut low = 1;
        let mut high = count;

        while low < high {
            let mid = low + (high - low) / 2;
            if self.key(mid)? <= probe {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        Ok(Some(low - 1))
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{Node, NodeBuilder};
    use crate::types::{NodeType, PageId};

    fn leaf(keys: &[&[u8]]) -> Node {
        let mut builder = NodeBuilder::new(NodeType::Leaf, keys.len() as u16);
        for key in keys {
            builder.append(PageId::NULL, key, b"v").unwrap();
        }
        builder.finish().unwrap()
    }

    #[test]
    fn test_floor_index_probes() {
        let node = leaf(&[b"k1", b"k3", b"k5"]);

        // probe before every key
        assert_eq!(node.floor_index(b"k0").unwrap(), None);
        // exact hits and in-between probes
        assert_eq!(node.floor_index(b"k1").unwrap(), Some(0));
        assert_eq!(node.floor_index(b"k2").unwrap(), Some(0));
        assert_eq!(node.floor_index(b"k3").unwrap(), Some(1));
        assert_eq!(node.floor_index(b"k4").unwrap(), Some(1));
        assert_eq!(node.floor_index(b"k5").unwrap(), Some(2));
        assert_eq!(node.floor_index(b"k9").unwrap(), Some(2));
    }

    #[test]
    fn test_floor_index_empty_node() {
        let node = leaf(&[]);
        assert_eq!(node.floor_index(b"any").unwrap(), None);
    }

    #[test]
    fn test_floor_index_single_key() {
        let node = leaf(&[b"m"]);
        assert_eq!(node.floor_index(b"a").unwrap(), None);
        assert_eq!(node.floor_index(b"m").unwrap(), Some(0));
        assert_eq!(node.floor_index(b"z").unwrap(), Some(0));
    }

    #[test]
    fn test_floor_index_exhaustive() {
        // every probe position against a larger node
        let keys: Vec<Vec<u8>> = (0..20u8).map(|i| vec![b'a' + i, b'x']).collect();
        let refs: Vec<&[u8]> = keys.iter().map(|k| k.as_slice()).collect();
        let node = leaf(&refs);

        for (i, key) in keys.iter().enumerate() {
            assert_eq!(node.floor_index(key).unwrap(), Some(i));
            // one byte past key i still floors to i
            let mut past = key.clone();
            past.push(0);
            assert_eq!(node.floor_index(&past).unwrap(), Some(i));
        }
        assert_eq!(node.floor_index(b"a").unwrap(), None);
    }
}
