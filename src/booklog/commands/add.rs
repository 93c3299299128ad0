use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Book;
use crate::store::{BookStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut BookStore<B>, book: Book) -> Result<CmdResult> {
    store.add_book(book.clone())?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Book added: {}", book.title)));
    Ok(result.with_affected_books(vec![book]))
}
