use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::books::domain::model::Book;
use crate::books::dto::BookUpdate;
use crate::books::repository::BookRepository;
use crate::catalog::store::{Catalog, CatalogStats};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// JsonBookRepository owns the catalog; the mutex serializes every request so the
// backing file only ever has one writer inside this process.
#[derive(Debug)]
pub struct JsonBookRepository {
    catalog: Mutex<Catalog>,
}

impl JsonBookRepository {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
        }
    }
}

#[async_trait]
impl Repository<Book> for JsonBookRepository {
    async fn create(&self, entity: &Book) -> LibraryResult<usize> {
        let mut catalog = self.catalog.lock().await;
        catalog.add(entity.clone()).map(|_| 1)
    }

    async fn update(&self, id: &str, entity: &Book) -> LibraryResult<usize> {
        let patch = BookUpdate {
            title: Some(entity.title.clone()),
            author: Some(entity.author.clone()),
            isbn: Some(entity.isbn.clone()),
        };
        let mut catalog = self.catalog.lock().await;
        catalog.update(id, &patch).map(|_| 1)
    }

    async fn get(&self, id: &str) -> LibraryResult<Book> {
        let catalog = self.catalog.lock().await;
        catalog.find(id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LibraryResult<Book> {
        let mut catalog = self.catalog.lock().await;
        catalog.remove(id)
    }
}

#[async_trait]
impl BookRepository for JsonBookRepository {
    async fn find(&self, isbn: &str) -> LibraryResult<Option<Book>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.find(isbn).cloned())
    }

    async fn update_book(&self, isbn: &str, patch: &BookUpdate) -> LibraryResult<Book> {
        let mut catalog = self.catalog.lock().await;
        catalog.update(isbn, patch)
    }

    async fn list_all(&self) -> LibraryResult<Vec<Book>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.list_all())
    }

    async fn search(&self, term: &str) -> LibraryResult<Vec<Book>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.search(term))
    }

    async fn stats(&self) -> LibraryResult<CatalogStats> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.stats())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use tempfile::TempDir;

    use crate::books::domain::model::Book;
    use crate::books::dto::BookUpdate;
    use crate::books::repository::BookRepository;
    use crate::books::repository::json_book_repository::JsonBookRepository;
    use crate::catalog::store::Catalog;
    use crate::core::library::LibraryError;
    use crate::core::repository::Repository;

    #[tokio::test]
    async fn test_should_create_get_books() {
        let books_repo = JsonBookRepository::new(Catalog::in_memory());
        let book = Book::new("Dune", "Herbert", "111");
        let size = books_repo.create(&book).await.expect("should create book");
        assert_eq!(1, size);

        let loaded = books_repo.get("111").await.expect("should return book");
        assert_eq!(book, loaded);
        assert!(matches!(books_repo.get("222").await, Err(LibraryError::NotFound { .. })));
        assert_eq!(None, books_repo.find("222").await.expect("should query"));
    }

    #[tokio::test]
    async fn test_should_create_update_books() {
        let books_repo = JsonBookRepository::new(Catalog::in_memory());
        let book = Book::new("Dune", "Herbert", "111");
        books_repo.create(&book).await.expect("should create book");

        let changed = Book::new("Dune Messiah", "Frank Herbert", "111");
        let size = books_repo.update("111", &changed).await.expect("should update book");
        assert_eq!(1, size);

        let loaded = books_repo.get("111").await.expect("should return book");
        assert_eq!(changed, loaded);
    }

    #[tokio::test]
    async fn test_should_create_delete_books() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("library.json");
        let books_repo = JsonBookRepository::new(Catalog::open(&path));
        let book = Book::new("Dune", "Herbert", "111");
        books_repo.create(&book).await.expect("should create book");

        let deleted = books_repo.delete("111").await.expect("should delete book");
        assert_eq!(book, deleted);
        assert!(books_repo.get("111").await.is_err());
        assert!(Catalog::open(&path).is_empty());
    }

    #[tokio::test]
    async fn test_should_serialize_concurrent_creates() {
        let books_repo = Arc::new(JsonBookRepository::new(Catalog::in_memory()));
        let mut handles = vec![];
        for i in 0..20 {
            let repo = books_repo.clone();
            handles.push(tokio::spawn(async move {
                // every isbn is written twice; exactly one of each pair must win
                let book = Book::new("title", "author", format!("isbn-{}", i % 10).as_str());
                repo.create(&book).await.is_ok()
            }));
        }
        let mut created = 0;
        for handle in handles {
            if handle.await.expect("task should finish") {
                created += 1;
            }
        }
        assert_eq!(10, created);
        assert_eq!(10, books_repo.list_all().await.expect("should list").len());
    }

    #[tokio::test]
    async fn test_should_keep_concurrent_patches_to_different_fields() {
        let books_repo = Arc::new(JsonBookRepository::new(Catalog::in_memory()));
        books_repo.create(&Book::new("Dune", "Herbert", "111")).await.expect("should create book");

        let title_repo = books_repo.clone();
        let title_task = tokio::spawn(async move {
            let patch = BookUpdate { title: Some("Dune Messiah".to_string()), ..Default::default() };
            title_repo.update_book("111", &patch).await
        });
        let author_repo = books_repo.clone();
        let author_task = tokio::spawn(async move {
            let patch = BookUpdate { author: Some("Frank Herbert".to_string()), ..Default::default() };
            author_repo.update_book("111", &patch).await
        });
        title_task.await.expect("task should finish").expect("should patch title");
        author_task.await.expect("task should finish").expect("should patch author");

        let loaded = books_repo.get("111").await.expect("should return book");
        assert_eq!(Book::new("Dune Messiah", "Frank Herbert", "111"), loaded);
    }

    #[tokio::test]
    async fn test_should_report_missing_book_on_patch() {
        let books_repo = JsonBookRepository::new(Catalog::in_memory());
        let patch = BookUpdate { title: Some("Dune".to_string()), ..Default::default() };
        let res = books_repo.update_book("111", &patch).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_search_and_count() {
        let books_repo = JsonBookRepository::new(Catalog::in_memory());
        books_repo.create(&Book::new("Dune", "Herbert", "111")).await.expect("should create book");
        books_repo.create(&Book::new("Hobbit", "Tolkien", "222")).await.expect("should create book");
        let found = books_repo.search("TOLK").await.expect("should search");
        assert_eq!(1, found.len());
        let stats = books_repo.stats().await.expect("should compute stats");
        assert_eq!(2, stats.total_books);
    }
}
