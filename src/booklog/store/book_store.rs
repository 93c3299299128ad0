use super::backend::StorageBackend;
use crate::error::Result;
use crate::model::{Book, BookPatch, ReadingProgress};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// How the records were obtained when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// No resource existed yet.
    Missing,
    /// The resource existed but did not decode. Its content was discarded.
    Corrupt,
    /// The resource decoded into the current records.
    Stored,
}

/// The book collection: an ordered list of records mirrored to a backend.
///
/// Records are read once in [`BookStore::open`]. Every mutating call changes the
/// in-memory list and then overwrites the whole resource before returning, so
/// after a successful mutation the two are identical. A mutation whose save
/// fails is rolled back in memory too.
pub struct BookStore<B: StorageBackend> {
    backend: B,
    books: Vec<Book>,
    load_source: LoadSource,
}

impl<B: StorageBackend> BookStore<B> {
    pub fn open(backend: B) -> Result<Self> {
        let (books, load_source) = Self::load(&backend)?;
        Ok(Self {
            backend,
            books,
            load_source,
        })
    }

    fn load(backend: &B) -> Result<(Vec<Book>, LoadSource)> {
        let location = backend.location();
        let Some(bytes) = backend.read_raw()? else {
            debug!(path = %location.display(), "no book file yet, starting empty");
            return Ok((Vec::new(), LoadSource::Missing));
        };

        match serde_json::from_slice::<Vec<Book>>(&bytes) {
            Ok(books) => {
                debug!(path = %location.display(), count = books.len(), "loaded books");
                Ok((books, LoadSource::Stored))
            }
            Err(e) => {
                warn!(
                    path = %location.display(),
                    error = %e,
                    "book file is not readable, starting with an empty collection"
                );
                Ok((Vec::new(), LoadSource::Corrupt))
            }
        }
    }

    /// Overwrite the resource with the full current list.
    pub fn save(&self) -> Result<()> {
        let bytes = encode(&self.books)?;
        self.backend.write_raw(&bytes)?;
        debug!(count = self.books.len(), "saved books");
        Ok(())
    }

    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Result<()> {
        self.add_book(Book::new(title, author, year, genre, read))
    }

    pub fn add_book(&mut self, book: Book) -> Result<()> {
        debug!(title = %book.title, "adding book");
        let prev = self.books.clone();
        self.books.push(book);
        self.commit(prev)
    }

    /// Remove every book whose title matches, ignoring case.
    /// Saves even when nothing matched.
    pub fn delete(&mut self, title: &str) -> Result<()> {
        let prev = self.books.clone();
        self.books.retain(|b| !b.title_matches(title));
        debug!(title, removed = prev.len() - self.books.len(), "deleted books");
        self.commit(prev)
    }

    /// Books whose title or author contains `text`, ignoring case.
    pub fn find(&self, text: &str) -> Vec<Book> {
        let needle = text.to_lowercase();
        self.books
            .iter()
            .filter(|b| b.contains_lower(&needle))
            .cloned()
            .collect()
    }

    /// Patch the first book whose title matches `old_title`, ignoring case.
    ///
    /// Returns `Ok(false)` without touching storage when nothing matches.
    pub fn update(&mut self, old_title: &str, patch: &BookPatch) -> Result<bool> {
        let Some(index) = self.books.iter().position(|b| b.title_matches(old_title)) else {
            debug!(title = old_title, "no book to update");
            return Ok(false);
        };
        let prev = self.books.clone();
        let book = &mut self.books[index];
        book.apply(patch);
        debug!(title = old_title, new_title = %book.title, "updated book");
        self.commit(prev)?;
        Ok(true)
    }

    /// Save the current list, or put `prev` back if the save fails.
    fn commit(&mut self, prev: Vec<Book>) -> Result<()> {
        if let Err(e) = self.save() {
            self.books = prev;
            return Err(e);
        }
        Ok(())
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn progress(&self) -> ReadingProgress {
        ReadingProgress::from_books(&self.books)
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Pretty JSON with 4-space indentation, the layout existing book files use.
fn encode(books: &[Book]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    books.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn empty_store() -> BookStore<MemBackend> {
        BookStore::open(MemBackend::new()).unwrap()
    }

    fn stored_books(store: &BookStore<MemBackend>) -> Vec<Book> {
        let raw = store.backend.raw().expect("nothing was written");
        serde_json::from_slice(&raw).unwrap()
    }

    fn titles(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn opens_empty_when_resource_missing() {
        let store = empty_store();
        assert!(store.list().is_empty());
        assert_eq!(store.load_source(), LoadSource::Missing);
        assert_eq!(store.backend.write_count(), 0);
    }

    #[test]
    fn opens_empty_when_resource_corrupt() {
        let store = BookStore::open(MemBackend::with_raw("{ not json")).unwrap();
        assert!(store.list().is_empty());
        assert_eq!(store.load_source(), LoadSource::Corrupt);
    }

    #[test]
    fn wrong_shape_counts_as_corrupt() {
        let raw = r#"[{"title": "Dune", "author": "Herbert"}]"#;
        let store = BookStore::open(MemBackend::with_raw(raw)).unwrap();
        assert!(store.list().is_empty());
        assert_eq!(store.load_source(), LoadSource::Corrupt);

        let store = BookStore::open(MemBackend::with_raw(vec![0xff, 0xfe, 0x00])).unwrap();
        assert_eq!(store.load_source(), LoadSource::Corrupt);
    }

    #[test]
    fn opens_stored_books() {
        let raw = r#"[
            {"title": "Dune", "author": "Herbert", "year": "1965", "genre": "Sci-Fi", "read": false}
        ]"#;
        let store = BookStore::open(MemBackend::with_raw(raw)).unwrap();
        assert_eq!(store.load_source(), LoadSource::Stored);
        assert_eq!(
            store.list(),
            &[Book::new("Dune", "Herbert", "1965", "Sci-Fi", false)]
        );
    }

    #[test]
    fn add_preserves_order_and_persists() {
        let mut store = empty_store();
        store.add("A", "x", "1", "g", false).unwrap();
        store.add("B", "y", "2", "g", true).unwrap();
        store.add("", "", "", "", false).unwrap();

        assert_eq!(titles(store.list()), vec!["A", "B", ""]);
        assert_eq!(stored_books(&store), store.list());
        assert_eq!(store.backend.write_count(), 3);
    }

    #[test]
    fn add_allows_duplicate_titles() {
        let mut store = empty_store();
        store.add("Dune", "a", "", "", false).unwrap();
        store.add("DUNE", "b", "", "", false).unwrap();
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn delete_removes_every_case_insensitive_match() {
        let mut store = empty_store();
        store.add("Dune", "a", "", "", false).unwrap();
        store.add("Emma", "b", "", "", false).unwrap();
        store.add("DUNE", "c", "", "", true).unwrap();

        store.delete("dune").unwrap();
        assert_eq!(titles(store.list()), vec!["Emma"]);
        assert_eq!(stored_books(&store), store.list());
    }

    #[test]
    fn delete_without_match_still_saves() {
        let mut store = empty_store();
        store.add("Emma", "b", "", "", false).unwrap();
        let writes = store.backend.write_count();

        store.delete("Dune").unwrap();
        assert_eq!(titles(store.list()), vec!["Emma"]);
        assert_eq!(store.backend.write_count(), writes + 1);
    }

    #[test]
    fn delete_does_not_match_substrings() {
        let mut store = empty_store();
        store.add("Dune Messiah", "Herbert", "", "", false).unwrap();
        store.delete("Dune").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn find_matches_title_or_author() {
        let mut store = empty_store();
        store.add("Dune", "Frank Herbert", "", "", false).unwrap();
        store.add("Hobbit", "J.R.R. Tolkien", "", "", true).unwrap();
        store.add("Herbs", "Someone", "", "", false).unwrap();
        let writes = store.backend.write_count();

        assert_eq!(titles(&store.find("HERB")), vec!["Dune", "Herbs"]);
        assert_eq!(titles(&store.find("tolk")), vec!["Hobbit"]);
        assert!(store.find("nope").is_empty());
        assert_eq!(store.find("").len(), 3);
        assert_eq!(store.backend.write_count(), writes);
    }

    #[test]
    fn update_patches_first_match_only() {
        let mut store = empty_store();
        store.add("Dune", "a", "1965", "Sci-Fi", false).unwrap();
        store.add("dune", "b", "1984", "Film", false).unwrap();

        let patch = BookPatch::new().author("Frank Herbert").read(true);
        assert!(store.update("DUNE", &patch).unwrap());

        assert_eq!(
            store.list(),
            &[
                Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true),
                Book::new("dune", "b", "1984", "Film", false),
            ]
        );
        assert_eq!(stored_books(&store), store.list());
    }

    #[test]
    fn update_can_rename() {
        let mut store = empty_store();
        store.add("Dune", "a", "", "", false).unwrap();
        assert!(store.update("dune", &BookPatch::new().title("Dune Messiah")).unwrap());
        assert_eq!(titles(store.list()), vec!["Dune Messiah"]);
    }

    #[test]
    fn update_without_match_does_not_persist() {
        let mut store = empty_store();
        store.add("Emma", "Austen", "", "", false).unwrap();
        let before = store.backend.raw();
        let writes = store.backend.write_count();

        assert!(!store.update("Dune", &BookPatch::new().read(true)).unwrap());
        assert_eq!(store.backend.write_count(), writes);
        assert_eq!(store.backend.raw(), before);
        assert!(!store.list()[0].read);
    }

    #[test]
    fn save_error_propagates() {
        let mut store = empty_store();
        store.add("Emma", "Austen", "", "", false).unwrap();
        store.backend.set_simulate_write_error(true);
        assert!(store.add("Dune", "", "", "", false).is_err());
        assert_eq!(titles(store.list()), vec!["Emma"]);
    }

    #[test]
    fn failed_mutations_never_reach_storage_later() {
        let mut store = empty_store();
        store.add("Dune", "Herbert", "", "", false).unwrap();
        store.add("Emma", "Austen", "", "", false).unwrap();

        store.backend.set_simulate_write_error(true);
        assert!(store.add("Ghost", "", "", "", false).is_err());
        assert!(store.delete("dune").is_err());
        assert!(store.update("emma", &BookPatch::new().read(true)).is_err());
        assert_eq!(titles(store.list()), vec!["Dune", "Emma"]);
        assert!(!store.list()[1].read);

        store.backend.set_simulate_write_error(false);
        store.delete("unrelated").unwrap();
        assert_eq!(
            stored_books(&store),
            vec![
                Book::new("Dune", "Herbert", "", "", false),
                Book::new("Emma", "Austen", "", "", false),
            ]
        );
    }

    #[test]
    fn progress_reflects_read_flags() {
        let mut store = empty_store();
        assert_eq!(
            store.progress(),
            ReadingProgress {
                total: 0,
                read: 0,
                percent: 0.0
            }
        );

        store.add("Dune", "Herbert", "1965", "Sci-Fi", false).unwrap();
        store.add("Hobbit", "Tolkien", "1937", "Fantasy", true).unwrap();
        assert_eq!(
            store.progress(),
            ReadingProgress {
                total: 2,
                read: 1,
                percent: 50.0
            }
        );
    }

    #[test]
    fn dune_and_hobbit_walkthrough() {
        let mut store = empty_store();
        store.add("Dune", "Herbert", "1965", "Sci-Fi", false).unwrap();
        store.add("Hobbit", "Tolkien", "1937", "Fantasy", true).unwrap();
        assert_eq!(titles(store.list()), vec!["Dune", "Hobbit"]);

        let progress = store.progress();
        assert_eq!((progress.total, progress.read), (2, 1));
        assert_eq!(progress.percent, 50.0);

        assert_eq!(
            store.find("tolkien"),
            vec![Book::new("Hobbit", "Tolkien", "1937", "Fantasy", true)]
        );

        store.delete("dune").unwrap();
        assert_eq!(titles(store.list()), vec!["Hobbit"]);
    }

    #[test]
    fn reopening_reproduces_records() {
        let mut store = empty_store();
        store.add("Dune", "Herbert", "1965", "Sci-Fi", false).unwrap();
        store.add("Hobbit", "Tolkien", "1937", "Fantasy", true).unwrap();
        let raw = store.backend.raw().unwrap();

        let reopened = BookStore::open(MemBackend::with_raw(raw)).unwrap();
        assert_eq!(reopened.load_source(), LoadSource::Stored);
        assert_eq!(reopened.list(), store.list());
    }

    #[test]
    fn encodes_with_four_space_indent() {
        let books = vec![Book::new("Dune", "Herbert", "1965", "Sci-Fi", false)];
        let text = String::from_utf8(encode(&books).unwrap()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"title\": \"Dune\","));
        assert_eq!(String::from_utf8(encode(&[]).unwrap()).unwrap(), "[]");
    }
}
