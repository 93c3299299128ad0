use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
///
/// A backend is bound to exactly one resource. `BookStore` handles decoding,
/// encoding and the collection semantics on top of it.
pub trait StorageBackend {
    /// Read the whole resource.
    /// Returns Ok(None) if it does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_raw(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the whole resource with `bytes`. Not atomic.
    fn write_raw(&self, bytes: &[u8]) -> Result<()>;

    /// Where the resource lives.
    /// For FsBackend this is the real path, for MemBackend a virtual one.
    fn location(&self) -> PathBuf;
}
