use serde::{Deserialize, Serialize};
use crate::books::domain::model::Book;
use crate::books::domain::{validate_isbn, validate_text};
use crate::core::library::LibraryResult;

// NewBook is the untrusted create payload; it only becomes a Book through validate().
// Title and author may be left blank for the service to complete from the remote source.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub isbn: String,
}

impl NewBook {
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
        }
    }

    pub fn validate(&self) -> LibraryResult<Book> {
        let book = Book::new(self.title.trim(), self.author.trim(), self.isbn.trim());
        validate_isbn(book.isbn.as_str())?;
        Ok(book)
    }
}

// BookUpdate carries a partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
}

impl BookUpdate {
    pub fn validate(&self) -> LibraryResult<BookUpdate> {
        let title = self.title.as_deref().map(str::trim);
        let author = self.author.as_deref().map(str::trim);
        let isbn = self.isbn.as_deref().map(str::trim);
        if let Some(title) = title {
            validate_text("title", title)?;
        }
        if let Some(author) = author {
            validate_text("author", author)?;
        }
        if let Some(isbn) = isbn {
            validate_isbn(isbn)?;
        }
        Ok(BookUpdate {
            title: title.map(str::to_string),
            author: author.map(str::to_string),
            isbn: isbn.map(str::to_string),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.isbn.is_none()
    }

    pub(crate) fn apply(&self, book: &Book) -> Book {
        Book {
            title: self.title.clone().unwrap_or_else(|| book.title.clone()),
            author: self.author.clone().unwrap_or_else(|| book.author.clone()),
            isbn: self.isbn.clone().unwrap_or_else(|| book.isbn.clone()),
        }
    }
}

// BookList is the response shape for list and search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookList {
    pub books: Vec<Book>,
    pub total: usize,
}

impl BookList {
    pub fn new(books: Vec<Book>) -> Self {
        let total = books.len();
        Self { books, total }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::Book;
    use crate::books::dto::{BookList, BookUpdate, NewBook};
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_validate_new_book() {
        let book = NewBook::new(" Dune ", "Herbert", "111").validate().expect("should validate");
        assert_eq!(Book::new("Dune", "Herbert", "111"), book);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_new_book() {
        let res = NewBook::new("Dune", "Herbert", " ").validate();
        assert!(matches!(res, Err(LibraryError::Validation { reason_code: Some(ref field), .. }) if field == "isbn"));
    }

    #[tokio::test]
    async fn test_should_accept_blank_fields_for_completion() {
        let book = NewBook::new(" ", "", "111").validate().expect("should validate");
        assert_eq!(Book::new("", "", "111"), book);

        let parsed: NewBook = serde_json::from_str(r#"{"isbn": "111"}"#).expect("should parse");
        assert_eq!("", parsed.title);
        assert!(serde_json::from_str::<NewBook>(r#"{"title": "Dune"}"#).is_err());
    }

    #[tokio::test]
    async fn test_should_apply_partial_update() {
        let book = Book::new("Dune", "Herbert", "111");
        let update = BookUpdate { title: Some("Dune Messiah".to_string()), ..Default::default() };
        assert_eq!(Book::new("Dune Messiah", "Herbert", "111"), update.apply(&book));
        assert!(!update.is_empty());
        assert!(BookUpdate::default().is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_empty_replacement() {
        let update = BookUpdate { isbn: Some(" ".to_string()), ..Default::default() };
        assert!(update.validate().is_err());
    }

    #[tokio::test]
    async fn test_should_count_book_list() {
        let list = BookList::new(vec![Book::new("Dune", "Herbert", "111")]);
        assert_eq!(1, list.total);
    }
}
