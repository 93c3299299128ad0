use super::backend::StorageBackend;
use crate::error::{BooklogError, Result};
use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since booklog is single-threaded,
/// which lets the `StorageBackend` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    data: RefCell<Option<Vec<u8>>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given resource content, valid or not.
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: RefCell::new(Some(bytes.into())),
            ..Self::default()
        }
    }

    /// Current resource content, if anything was ever stored.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.data.borrow().clone()
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }
}

impl StorageBackend for MemBackend {
    fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.data.borrow().clone())
    }

    fn write_raw(&self, bytes: &[u8]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(BooklogError::Io(io::Error::other("simulated write error")));
        }
        *self.data.borrow_mut() = Some(bytes.to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://books_data.json")
    }
}
