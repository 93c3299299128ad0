use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{BookStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &BookStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_data_path(store.location()))
}
