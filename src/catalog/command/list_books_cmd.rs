use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::BookList;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl ListBooksCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ListBooksCommandRequest {}

#[async_trait]
impl Command<ListBooksCommandRequest, BookList> for ListBooksCommand {
    async fn execute(&self, _req: ListBooksCommandRequest) -> Result<BookList, CommandError> {
        self.catalog_service.list_books().await.map_err(CommandError::from).map(BookList::new)
    }
}
