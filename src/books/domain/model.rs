use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::books::domain::{validate_isbn, validate_text};
use crate::core::domain::Identifiable;
use crate::core::library::LibraryResult;

// Book abstracts a single title in the personal catalog; isbn is the catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl Book {
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
        }
    }

    pub fn validate(&self) -> LibraryResult<()> {
        validate_text("title", self.title.as_str())?;
        validate_text("author", self.author.as_str())?;
        validate_isbn(self.isbn.as_str())
    }

    /// Case-insensitive substring match on title or author; `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

impl Identifiable for Book {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} (ISBN: {})", self.title, self.author, self.isbn)
    }
}
