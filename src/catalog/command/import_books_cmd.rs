use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::ImportOutcome;
use crate::core::command::{Command, CommandError};

pub const MAX_IMPORT_BATCH: usize = 100;

pub(crate) struct ImportBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl ImportBooksCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportBooksCommandRequest {
    pub(crate) isbns: Vec<String>,
}

impl ImportBooksCommandRequest {
    pub fn new(isbns: &[&str]) -> Self {
        Self {
            isbns: isbns.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportBooksCommandResponse {
    pub results: Vec<ImportOutcome>,
}

#[async_trait]
impl Command<ImportBooksCommandRequest, ImportBooksCommandResponse> for ImportBooksCommand {
    async fn execute(&self, req: ImportBooksCommandRequest) -> Result<ImportBooksCommandResponse, CommandError> {
        if req.isbns.is_empty() {
            return Err(CommandError::Validation {
                message: "isbns must not be empty".to_string(),
                reason_code: Some("isbns".to_string()),
            });
        }
        if req.isbns.len() > MAX_IMPORT_BATCH {
            return Err(CommandError::Validation {
                message: format!("at most {} isbns per import", MAX_IMPORT_BATCH),
                reason_code: Some("isbns".to_string()),
            });
        }
        self.catalog_service.import_books(&req.isbns).await
            .map_err(CommandError::from)
            .map(|results| ImportBooksCommandResponse { results })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::import_books_cmd::{ImportBooksCommand, ImportBooksCommandRequest, MAX_IMPORT_BATCH};
    use crate::catalog::dto::ImportStatus;
    use crate::catalog::factory::create_test_catalog_service;
    use crate::core::command::{Command, CommandError};

    #[tokio::test]
    async fn test_should_run_import_books() {
        let svc = create_test_catalog_service();
        let cmd = ImportBooksCommand::new(svc.clone());

        let res = cmd.execute(ImportBooksCommandRequest::new(&["111", "333", "999"])).await.expect("should import");
        let statuses: Vec<ImportStatus> = res.results.iter().map(|r| r.status).collect();
        assert_eq!(vec![ImportStatus::Added, ImportStatus::NotFound, ImportStatus::Failed], statuses);
        assert_eq!("Dune", svc.find_book_by_isbn("111").await.expect("should be imported").title);
    }

    #[tokio::test]
    async fn test_should_reject_empty_or_oversized_batch() {
        let cmd = ImportBooksCommand::new(create_test_catalog_service());
        let empty = cmd.execute(ImportBooksCommandRequest::new(&[])).await;
        assert!(matches!(empty, Err(CommandError::Validation { .. })));

        let isbns: Vec<String> = (0..=MAX_IMPORT_BATCH).map(|i| i.to_string()).collect();
        let oversized = cmd.execute(ImportBooksCommandRequest { isbns }).await;
        assert!(matches!(oversized, Err(CommandError::Validation { .. })));
    }
}
