use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::domain::model::Book;
use crate::books::dto::BookUpdate;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub isbn: String,
    pub patch: BookUpdate,
}

impl UpdateBookCommandRequest {
    pub fn new(isbn: &str, patch: BookUpdate) -> Self {
        Self {
            isbn: isbn.to_string(),
            patch,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: Book,
}

impl UpdateBookCommandResponse {
    pub fn new(book: Book) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.catalog_service.update_book(req.isbn.as_str(), &req.patch)
            .await.map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}
