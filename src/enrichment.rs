//! Optional book enrichment from a remote bibliographic service.
//!
//! The catalog treats enrichment as best effort: a lookup either yields metadata, reports
//! that the remote source has no record, or fails. Failures and timeouts never abort the
//! surrounding operation; they are reported per isbn.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use crate::books::domain::model::Book;
use crate::core::library::LibraryError;

pub mod factory;
pub mod open_library;
pub mod pool;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Errors surfaced while looking up an isbn remotely.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnrichmentError {
    /// The service could not be reached.
    #[error("Enrichment service unreachable: {0}")]
    Unreachable(String),
    /// The service answered with a non-success status.
    #[error("Enrichment service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body could not be decoded.
    #[error("Malformed enrichment response: {0}")]
    InvalidResponse(String),
    /// No answer within the configured per-call timeout.
    #[error("Enrichment lookup timed out after {0:?}")]
    Timeout(Duration),
}

impl EnrichmentError {
    pub fn retryable(&self) -> bool {
        match self {
            EnrichmentError::Unreachable(_) => true,
            EnrichmentError::Timeout(_) => true,
            EnrichmentError::Status { status, .. } => *status >= 500 || *status == 429,
            EnrichmentError::InvalidResponse(_) => false,
        }
    }
}

impl From<EnrichmentError> for LibraryError {
    fn from(err: EnrichmentError) -> Self {
        let reason = match &err {
            EnrichmentError::Unreachable(_) => "Unreachable".to_string(),
            EnrichmentError::Status { status, .. } => status.to_string(),
            EnrichmentError::InvalidResponse(_) => "InvalidResponse".to_string(),
            EnrichmentError::Timeout(_) => "Timeout".to_string(),
        };
        LibraryError::unavailable(err.to_string().as_str(), Some(reason), err.retryable())
    }
}

/// Metadata returned by the remote source for one isbn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub isbn: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publish_date: Option<String>,
    pub number_of_pages: Option<u32>,
}

impl BookMetadata {
    /// Builds a catalog entry, substituting placeholders for missing title or author.
    pub fn to_book(&self) -> Book {
        Book::new(
            non_blank(self.title.as_deref()).unwrap_or(UNKNOWN_TITLE),
            non_blank(self.author.as_deref()).unwrap_or(UNKNOWN_AUTHOR),
            self.isbn.as_str(),
        )
    }

    /// Fills only the empty fields of an existing book; the isbn is never changed.
    pub fn merge_into(&self, book: &Book) -> Book {
        let pick = |current: &str, remote: Option<&str>| {
            if current.trim().is_empty() {
                non_blank(remote).unwrap_or(current).to_string()
            } else {
                current.to_string()
            }
        };
        Book {
            title: pick(book.title.as_str(), self.title.as_deref()),
            author: pick(book.author.as_str(), self.author.as_deref()),
            isbn: book.isbn.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A remote bibliographic source keyed by isbn.
#[async_trait]
pub trait Enricher: Send + Sync {
    /// `Ok(None)` means the source answered but has no record for the isbn.
    async fn lookup(&self, isbn: &str) -> Result<Option<BookMetadata>, EnrichmentError>;
}

#[cfg(test)]
pub(crate) mod stub {
    use std::collections::{HashMap, HashSet};
    use async_trait::async_trait;
    use crate::enrichment::{BookMetadata, Enricher, EnrichmentError};

    // Answers from a fixed table; isbns in `failing` report the service as unreachable.
    #[derive(Default)]
    pub(crate) struct StaticEnricher {
        pub(crate) records: HashMap<String, BookMetadata>,
        pub(crate) failing: HashSet<String>,
    }

    impl StaticEnricher {
        pub(crate) fn with_record(mut self, isbn: &str, title: &str, author: &str) -> Self {
            self.records.insert(isbn.to_string(), BookMetadata {
                isbn: isbn.to_string(),
                title: Some(title.to_string()),
                author: Some(author.to_string()),
                publisher: None,
                publish_date: None,
                number_of_pages: None,
            });
            self
        }

        pub(crate) fn with_failure(mut self, isbn: &str) -> Self {
            self.failing.insert(isbn.to_string());
            self
        }
    }

    #[async_trait]
    impl Enricher for StaticEnricher {
        async fn lookup(&self, isbn: &str) -> Result<Option<BookMetadata>, EnrichmentError> {
            if self.failing.contains(isbn) {
                return Err(EnrichmentError::Unreachable("connection refused".to_string()));
            }
            Ok(self.records.get(isbn).cloned())
        }
    }
}
