use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// The current working directory
    Project,
    /// The per-user data directory
    Global,
}

/// A single entry in the collection.
///
/// The title doubles as the lookup key for delete, update and search, compared
/// case-insensitively. Nothing prevents two books from sharing a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Free-form; "1965", "c. 1600" and "" are all accepted.
    pub year: String,
    pub genre: String,
    pub read: bool,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
            read,
        }
    }

    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Case-insensitive substring match against title or author.
    /// `needle` must already be lowercased.
    pub(crate) fn contains_lower(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }

    /// Overwrites every field the patch sets and leaves the rest alone.
    pub fn apply(&mut self, patch: &BookPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        if let Some(year) = &patch.year {
            self.year = year.clone();
        }
        if let Some(genre) = &patch.genre {
            self.genre = genre.clone();
        }
        if let Some(read) = patch.read {
            self.read = read;
        }
    }
}

/// A partial update to a [`Book`].
///
/// `None` leaves the field untouched. `Some(String::new())` is a real value and
/// will blank the field; callers that treat blank input as "not set" should go
/// through [`BookPatch::without_empty`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub read: Option<bool>,
}

impl BookPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = Some(read);
        self
    }

    /// Drops text fields that were given as empty strings.
    pub fn without_empty(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        Self {
            title: keep(self.title),
            author: keep(self.author),
            year: keep(self.year),
            genre: keep(self.genre),
            read: self.read,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.read.is_none()
    }
}

/// Summary returned by the progress operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadingProgress {
    pub total: usize,
    pub read: usize,
    pub percent: f64,
}

impl ReadingProgress {
    pub fn from_books(books: &[Book]) -> Self {
        let total = books.len();
        let read = books.iter().filter(|b| b.read).count();
        let percent = if total > 0 {
            read as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            read,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", false)
    }

    #[test]
    fn title_match_ignores_case() {
        assert!(dune().title_matches("dUNE"));
        assert!(!dune().title_matches("Dun"));
    }

    #[test]
    fn lowered_needle_matches_title_or_author() {
        let book = dune();
        assert!(book.contains_lower("un"));
        assert!(book.contains_lower("herb"));
        assert!(book.contains_lower(""));
        assert!(!book.contains_lower("tolkien"));
    }

    #[test]
    fn apply_only_touches_set_fields() {
        let mut book = dune();
        book.apply(&BookPatch::new().genre("Classic").read(true));
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.year, "1965");
        assert_eq!(book.genre, "Classic");
        assert!(book.read);
    }

    #[test]
    fn apply_can_blank_a_field() {
        let mut book = dune();
        book.apply(&BookPatch::new().year(""));
        assert_eq!(book.year, "");
    }

    #[test]
    fn without_empty_drops_blank_text() {
        let patch = BookPatch::new()
            .title("")
            .author("Herbert")
            .year("")
            .read(false)
            .without_empty();
        assert_eq!(patch.title, None);
        assert_eq!(patch.author.as_deref(), Some("Herbert"));
        assert_eq!(patch.year, None);
        assert_eq!(patch.read, Some(false));
        assert!(BookPatch::new().genre("").without_empty().is_empty());
    }

    #[test]
    fn progress_of_empty_collection_is_zero() {
        let progress = ReadingProgress::from_books(&[]);
        assert_eq!(progress.total, 0);
        assert_eq!(progress.read, 0);
        assert_eq!(progress.percent, 0.0);
    }

    #[test]
    fn progress_counts_read_books() {
        let books = vec![
            dune(),
            Book::new("Hobbit", "Tolkien", "1937", "Fantasy", true),
            Book::new("Silmarillion", "Tolkien", "1977", "Fantasy", true),
        ];
        let progress = ReadingProgress::from_books(&books);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.read, 2);
        assert!((progress.percent - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn book_serializes_with_plain_field_names() {
        let json = serde_json::to_value(dune()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Dune",
                "author": "Frank Herbert",
                "year": "1965",
                "genre": "Sci-Fi",
                "read": false,
            })
        );
    }
}
