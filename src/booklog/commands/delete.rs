use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{BookStore, StorageBackend};

/// Deletes every book titled `title`. Reports success whether or not anything matched.
pub fn run<B: StorageBackend>(store: &mut BookStore<B>, title: &str) -> Result<CmdResult> {
    store.delete(title)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Book deleted: {}", title)));
    Ok(result)
}
