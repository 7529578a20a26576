//! Error types for the node engine.

use thiserror::Error;

/// Result type alias for node and storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur in the node engine
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error from the underlying file system
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The directory fsync after a rename failed. The rename itself may
    /// already be on disk, so the caller cannot assume the old file
    /// content survived.
    #[error("directory sync failed after rename: {0}")]
    DirectorySync(std::io::Error),

    /// Entry index is past the node's key count
    #[error("index {index} out of bounds (key count: {count})")]
    IndexOutOfBounds { index: usize, count: usize },

    /// Key exceeds maximum allowed size
    #[error("key too large: {size} bytes (max: {max})")]
    KeyTooLarge { size: usize, max: usize },

    /// Value exceeds maximum allowed size
    #[error("value too large: {size} bytes (max: {max})")]
    ValueTooLarge { size: usize, max: usize },

    /// Node does not fit in the destination buffer or a single page
    #[error("node too large: {size} bytes (max: {max})")]
    NodeTooLarge { size: usize, max: usize },

    /// Keys must be appended in strictly ascending order
    #[error("key appended out of order")]
    KeyOrder,

    /// Invalid node format (bad type tag, truncated header, count mismatch)
    #[error("invalid node: {0}")]
    InvalidNode(String),
}

impl StorageError {
    /// Create an invalid node error with a message
    pub fn invalid_node(msg: impl Into<String>) -> Self {
        Self::InvalidNode(msg.into())
    }
}
