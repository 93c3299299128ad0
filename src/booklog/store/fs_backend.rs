use super::backend::StorageBackend;
use crate::error::{BooklogError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(BooklogError::Io)?;
            }
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BooklogError::Io(e)),
        }
    }

    fn write_raw(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_parent()?;
        fs::write(&self.path, bytes).map_err(BooklogError::Io)
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
