use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BookPatch;
use crate::store::{BookStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut BookStore<B>,
    old_title: &str,
    patch: &BookPatch,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let position = store.list().iter().position(|b| b.title_matches(old_title));

    if !store.update(old_title, patch)? {
        result.add_message(CmdMessage::error(format!("Book not found: {}", old_title)));
        return Ok(result);
    }

    if let Some(book) = position.and_then(|i| store.list().get(i)) {
        if patch.is_empty() {
            result.add_message(CmdMessage::warning(format!(
                "No fields given, {} left unchanged",
                book.title
            )));
        } else {
            result.add_message(CmdMessage::success(format!("Book updated: {}", book.title)));
        }
        result.affected_books.push(book.clone());
    }
    Ok(result)
}
