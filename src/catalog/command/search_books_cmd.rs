use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::BookList;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct SearchBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl SearchBooksCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct SearchBooksCommandRequest {
    pub(crate) keyword: String,
}

impl SearchBooksCommandRequest {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
        }
    }
}

#[async_trait]
impl Command<SearchBooksCommandRequest, BookList> for SearchBooksCommand {
    async fn execute(&self, req: SearchBooksCommandRequest) -> Result<BookList, CommandError> {
        self.catalog_service.search_books(req.keyword.as_str())
            .await.map_err(CommandError::from).map(BookList::new)
    }
}
