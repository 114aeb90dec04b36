use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::enrichment::BookMetadata;

pub(crate) struct LookupBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl LookupBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct LookupBookCommandRequest {
    pub(crate) isbn: String,
}

impl LookupBookCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct LookupBookCommandResponse {
    pub metadata: BookMetadata,
}

#[async_trait]
impl Command<LookupBookCommandRequest, LookupBookCommandResponse> for LookupBookCommand {
    async fn execute(&self, req: LookupBookCommandRequest) -> Result<LookupBookCommandResponse, CommandError> {
        self.catalog_service.lookup_metadata(req.isbn.as_str()).await
            .map_err(CommandError::from)
            .map(|metadata| LookupBookCommandResponse { metadata })
    }
}
