pub mod json_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::Book;
use crate::books::dto::BookUpdate;
use crate::catalog::store::CatalogStats;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;


#[async_trait]
pub trait BookRepository: Repository<Book> {
    async fn find(&self, isbn: &str) -> LibraryResult<Option<Book>>;

    /// Applies the patch to the current record as one step, so concurrent patches to
    /// different fields of the same book both survive.
    async fn update_book(&self, isbn: &str, patch: &BookUpdate) -> LibraryResult<Book>;

    async fn list_all(&self) -> LibraryResult<Vec<Book>>;

    async fn search(&self, term: &str) -> LibraryResult<Vec<Book>>;

    async fn stats(&self) -> LibraryResult<CatalogStats>;
}
