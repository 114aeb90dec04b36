pub mod service;

use async_trait::async_trait;
use crate::books::domain::model::Book;
use crate::books::dto::BookUpdate;
use crate::catalog::dto::ImportOutcome;
use crate::catalog::store::CatalogStats;
use crate::core::library::LibraryResult;
use crate::enrichment::BookMetadata;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &Book) -> LibraryResult<Book>;
    async fn update_book(&self, isbn: &str, patch: &BookUpdate) -> LibraryResult<Book>;
    async fn remove_book(&self, isbn: &str) -> LibraryResult<Book>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Book>;
    async fn list_books(&self) -> LibraryResult<Vec<Book>>;
    async fn search_books(&self, term: &str) -> LibraryResult<Vec<Book>>;
    async fn stats(&self) -> LibraryResult<CatalogStats>;
    // looks up remote metadata without touching the catalog
    async fn lookup_metadata(&self, isbn: &str) -> LibraryResult<BookMetadata>;
    async fn import_books(&self, isbns: &[String]) -> LibraryResult<Vec<ImportOutcome>>;
}
