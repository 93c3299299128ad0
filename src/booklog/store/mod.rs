//! # Storage Layer
//!
//! The storage layer is split in two, the same way the rest of booklog separates
//! "what" from "how":
//!
//! - [`backend::StorageBackend`] is raw I/O. It reads and writes the bytes of a
//!   single resource and knows nothing about books.
//! - [`book_store::BookStore`] is the collection. It decodes the resource once
//!   when opened, keeps the records in memory, and writes the whole list back
//!   after every mutation.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: the production JSON file (`books_data.json` by
//!   default).
//! - [`mem_backend::MemBackend`]: in-memory bytes for tests. It can be seeded
//!   with arbitrary content (including garbage) and can simulate write errors.
//!
//! ## Storage Format
//!
//! ```text
//! <scope dir>/
//! ├── books_data.json     # JSON array of book objects
//! └── config.json         # Scope configuration
//! ```
//!
//! Each object carries exactly `title`, `author`, `year`, `genre` (strings) and
//! `read` (boolean). There is no schema version. A file that does not decode is
//! discarded and the collection starts empty.

pub mod backend;
pub mod book_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use book_store::{BookStore, LoadSource};
