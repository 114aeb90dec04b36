use std::sync::Arc;
use async_trait::async_trait;
use crate::catalog::domain::CatalogService;
use crate::catalog::store::CatalogStats;
use crate::core::command::{Command, CommandError};

pub(crate) struct CatalogStatsCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl CatalogStatsCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct CatalogStatsCommandRequest {}

#[async_trait]
impl Command<CatalogStatsCommandRequest, CatalogStats> for CatalogStatsCommand {
    async fn execute(&self, _req: CatalogStatsCommandRequest) -> Result<CatalogStats, CommandError> {
        self.catalog_service.stats().await.map_err(CommandError::from)
    }
}
