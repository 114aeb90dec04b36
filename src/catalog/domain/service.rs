use std::collections::{HashMap, HashSet};
use async_trait::async_trait;
use crate::books::domain::model::Book;
use crate::books::domain::validate_isbn;
use crate::books::dto::BookUpdate;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::{ImportOutcome, ImportStatus};
use crate::catalog::store::CatalogStats;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::enrichment::BookMetadata;
use crate::enrichment::pool::BatchEnricher;
use crate::gateway::events::EventPublisher;

const EVENT_NAME: &str = "books";
const EVENT_GROUP: &str = "catalog";

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
    enricher: BatchEnricher,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>,
                      enricher: BatchEnricher) -> Self {
        Self {
            book_repository,
            events_publisher,
            enricher,
        }
    }

    // The mutation has already been persisted, so a lost event is only logged.
    async fn publish(&self, event: serde_json::Result<DomainEvent>) {
        let res = match event {
            Ok(event) => self.events_publisher.publish(&event).await,
            Err(err) => Err(LibraryError::from(err)),
        };
        if let Err(err) = res {
            tracing::warn!(error = %err, "failed to publish domain event");
        }
    }

    // A create payload with a blank title or author is completed from the remote
    // source; a lookup that finds nothing or fails leaves the book as given.
    async fn fill_missing_fields(&self, book: &Book) -> Book {
        let incomplete = book.title.trim().is_empty() || book.author.trim().is_empty();
        if !incomplete || validate_isbn(book.isbn.as_str()).is_err() {
            return book.clone();
        }
        match self.enricher.fetch(book.isbn.as_str()).await {
            Ok(Some(metadata)) => metadata.merge_into(book),
            Ok(None) => {
                tracing::debug!(isbn = %book.isbn, "no remote record to complete book");
                book.clone()
            }
            Err(err) => {
                tracing::warn!(isbn = %book.isbn, error = %err, "failed to complete book from remote source");
                book.clone()
            }
        }
    }

    async fn import_one(&self, metadata: &BookMetadata) -> ImportOutcome {
        let book = metadata.to_book();
        match self.add_book(&book).await {
            Ok(book) => ImportOutcome::added(book),
            Err(LibraryError::DuplicateKey { message }) => {
                ImportOutcome::rejected(metadata.isbn.as_str(), ImportStatus::Duplicate, message.as_str())
            }
            Err(err) => {
                ImportOutcome::rejected(metadata.isbn.as_str(), ImportStatus::Failed, err.to_string().as_str())
            }
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &Book) -> LibraryResult<Book> {
        let book = self.fill_missing_fields(book).await;
        self.book_repository.create(&book).await?;
        tracing::info!(isbn = %book.isbn, "book added");
        self.publish(DomainEvent::added(
            EVENT_NAME, EVENT_GROUP, book.isbn.as_str(), &HashMap::new(), &book)).await;
        Ok(book)
    }

    async fn update_book(&self, isbn: &str, patch: &BookUpdate) -> LibraryResult<Book> {
        let patch = patch.validate()?;
        if patch.is_empty() {
            return self.find_book_by_isbn(isbn).await;
        }
        let updated = self.book_repository.update_book(isbn, &patch).await?;
        tracing::info!(isbn, new_isbn = %updated.isbn, "book updated");

        let mut metadata = HashMap::new();
        if updated.isbn != isbn {
            metadata.insert("previous_isbn".to_string(), isbn.to_string());
        }
        self.publish(DomainEvent::updated(
            EVENT_NAME, EVENT_GROUP, updated.isbn.as_str(), &metadata, &updated)).await;
        Ok(updated)
    }

    async fn remove_book(&self, isbn: &str) -> LibraryResult<Book> {
        let removed = self.book_repository.delete(isbn).await?;
        tracing::info!(isbn, "book removed");
        self.publish(DomainEvent::deleted(
            EVENT_NAME, EVENT_GROUP, isbn, &HashMap::new(), &removed)).await;
        Ok(removed)
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Book> {
        self.book_repository.get(isbn).await
    }

    async fn list_books(&self) -> LibraryResult<Vec<Book>> {
        self.book_repository.list_all().await
    }

    async fn search_books(&self, term: &str) -> LibraryResult<Vec<Book>> {
        self.book_repository.search(term).await
    }

    async fn stats(&self) -> LibraryResult<CatalogStats> {
        self.book_repository.stats().await
    }

    async fn lookup_metadata(&self, isbn: &str) -> LibraryResult<BookMetadata> {
        let isbn = isbn.trim();
        validate_isbn(isbn)?;
        match self.enricher.fetch(isbn).await {
            Ok(Some(metadata)) => Ok(metadata),
            Ok(None) => Err(LibraryError::not_found(
                format!("no remote record for isbn {}", isbn).as_str())),
            Err(err) => Err(err.into()),
        }
    }

    async fn import_books(&self, isbns: &[String]) -> LibraryResult<Vec<ImportOutcome>> {
        let mut outcomes: Vec<Option<ImportOutcome>> = vec![None; isbns.len()];
        let mut pending = vec![];
        let mut queued = HashSet::new();
        for (i, raw) in isbns.iter().enumerate() {
            let isbn = raw.trim();
            if let Err(err) = validate_isbn(isbn) {
                outcomes[i] = Some(ImportOutcome::rejected(raw, ImportStatus::Invalid, err.to_string().as_str()));
            } else if self.book_repository.find(isbn).await?.is_some() {
                outcomes[i] = Some(ImportOutcome::rejected(isbn, ImportStatus::Duplicate, "already in catalog"));
            } else if !queued.insert(isbn.to_string()) {
                outcomes[i] = Some(ImportOutcome::rejected(isbn, ImportStatus::Duplicate, "repeated in request"));
            } else {
                pending.push((i, isbn.to_string()));
            }
        }

        // lookups run outside the repository lock; only the adds below take it
        let lookups: Vec<String> = pending.iter().map(|(_, isbn)| isbn.clone()).collect();
        let fetched = self.enricher.fetch_all(&lookups).await;
        for ((i, isbn), lookup) in pending.into_iter().zip(fetched) {
            let outcome = match lookup.result {
                Ok(Some(metadata)) => self.import_one(&metadata).await,
                Ok(None) => ImportOutcome::rejected(isbn.as_str(), ImportStatus::NotFound, "no remote record"),
                Err(err) => ImportOutcome::rejected(isbn.as_str(), ImportStatus::Failed, err.to_string().as_str()),
            };
            outcomes[i] = Some(outcome);
        }

        let outcomes: Vec<ImportOutcome> = outcomes.into_iter().flatten().collect();
        tracing::info!(
            requested = isbns.len(),
            added = outcomes.iter().filter(|o| o.status == ImportStatus::Added).count(),
            "import finished"
        );
        Ok(outcomes)
    }
}
