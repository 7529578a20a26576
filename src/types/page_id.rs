//! Page identifier type.

use std::fmt;

/// Unique identifier for a page, as stored in a node's child-pointer slots.
///
/// Page IDs are assigned by the (external) allocator layer. The zero ID is
/// the null sentinel; leaf nodes carry it in every pointer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PageId(pub u64);

impl PageId {
    /// Null page ID, used for leaf pointer slots and missing children
    pub const NULL: PageId = PageId(0);

    /// Create a new page ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw page ID value
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Check if this is the null sentinel
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "NULL")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<u64> for PageId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<PageId> for u64 {
    fn from(id: PageId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_basics() {
        let id = PageId::new(42);
        assert_eq!(id.value(), 42);
        assert!(!id.is_null());
        assert!(PageId::NULL.is_null());
        assert_eq!(PageId::default(), PageId::NULL);
    }

    #[test]
    fn test_page_id_display() {
        assert_eq!(format!("{}", PageId::new(42)), "42");
        assert_eq!(format!("{}", PageId::NULL), "NULL");
    }
}
