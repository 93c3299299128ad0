use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{BookStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &BookStore<B>, text: &str) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_books(store.find(text)))
}
