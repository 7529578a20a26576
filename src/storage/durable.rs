//! Atomic, durable file replacement.
//!
//! A page write either fully takes effect or not at all, even across a
//! power loss. The sequence is fixed:
//!
//! 1. write the full buffer to a `.tmp` sibling of the target path
//! 2. fsync the temporary file's content
//! 3. rename the temporary file onto the target (atomic, not yet durable)
//! 4. open the containing directory and fsync it, so the rename itself
//!    survives a crash
//!
//! On failure before the rename, the temporary file is removed and the
//! target is left exactly as it was. A failed directory fsync is
//! surfaced as a distinct error because the rename may already be on
//! disk; the caller cannot assume the old content survived.

use crate::error::{Result, StorageError};
use crate::node::Node;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sibling temporary path: `path` with `.tmp` appended
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_and_sync(tmp: &Path, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(tmp)?;
    file.write_all(data)?;
    // a failed content fsync means the write cannot be reported durable
    file.sync_all()?;
    Ok(())
}

fn sync_parent_dir(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let handle = File::open(dir).map_err(StorageError::DirectorySync)?;
    handle.sync_all().map_err(StorageError::DirectorySync)?;
    Ok(())
}

/// Persist `data` to `path` with power-loss atomicity.
///
/// After a crash at any point, re-reading `path` yields either the
/// previous content or the new content in full, never a partial write.
/// Blocking call with no internal timeout or retry.
pub fn persist(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);

    if let Err(err) = write_and_sync(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }

    sync_parent_dir(path)
}

/// Persist a node as exactly one page of bytes.
///
/// Refuses a node whose entries have outgrown a single page; such a
/// node must be split by a higher layer first.
pub fn persist_node(path: &Path, node: &Node) -> Result<()> {
    persist(path, node.page_bytes()?)
}
