//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all booklog operations, regardless of the UI being used.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns the store handle** for one scope, so callers never reach for a
//!   shared global
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic (that lives in `commands/*.rs`) and no terminal
//! output.
//!
//! `BooklogApi<B: StorageBackend>` is generic over the backend:
//! - Production: `BooklogApi<FsBackend>`, built with [`BooklogApi::open`]
//! - Testing: `BooklogApi<MemBackend>`, built with [`BooklogApi::new`]

use crate::commands;
use crate::config::BooklogConfig;
use crate::error::Result;
use crate::model::{Book, BookPatch, Scope};
use crate::store::fs_backend::FsBackend;
use crate::store::{BookStore, StorageBackend};
use tracing::debug;

pub struct BooklogApi<B: StorageBackend> {
    store: BookStore<B>,
    paths: commands::BooklogPaths,
    scope: Scope,
}

impl BooklogApi<FsBackend> {
    /// Open the book file for `scope`, honoring the scope's `config.json`.
    pub fn open(paths: commands::BooklogPaths, scope: Scope) -> Result<(Self, BooklogConfig)> {
        let dir = paths.scope_dir(scope)?;
        let config = BooklogConfig::load(&dir)?;
        let data_path = dir.join(&config.data_file);
        debug!(?scope, path = %data_path.display(), "opening book store");

        let store = BookStore::open(FsBackend::new(data_path))?;
        Ok((Self::new(store, paths, scope), config))
    }
}

impl<B: StorageBackend> BooklogApi<B> {
    pub fn new(store: BookStore<B>, paths: commands::BooklogPaths, scope: Scope) -> Self {
        Self {
            store,
            paths,
            scope,
        }
    }

    pub fn add_book(
        &mut self,
        title: String,
        author: String,
        year: String,
        genre: String,
        read: bool,
    ) -> Result<commands::CmdResult> {
        let book = Book::new(title, author, year, genre, read);
        commands::add::run(&mut self.store, book)
    }

    pub fn list_books(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn search_books(&self, text: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, text)
    }

    pub fn update_book(&mut self, old_title: &str, patch: &BookPatch) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, old_title, patch)
    }

    pub fn delete_book(&mut self, title: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, title)
    }

    pub fn progress(&self) -> Result<commands::CmdResult> {
        commands::progress::run(&self.store)
    }

    pub fn data_path(&self) -> Result<commands::CmdResult> {
        commands::path::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, self.scope, action)
    }

    pub fn store(&self) -> &BookStore<B> {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{BooklogPaths, CmdMessage, CmdResult, MessageLevel};
