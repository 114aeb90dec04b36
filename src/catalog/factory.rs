use std::sync::Arc;
use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::enrichment::factory::create_enricher;
use crate::gateway::factory::create_publisher;

pub fn create_catalog_service(config: &Configuration) -> LibraryResult<Arc<dyn CatalogService>> {
    let book_repo = factory::create_book_repository(config);
    let publisher = create_publisher(config.events);
    let enricher = create_enricher(&config.enrichment)?;
    Ok(Arc::new(CatalogServiceImpl::new(book_repo, publisher, enricher)))
}

// In-memory catalog backed by a canned enricher: 111 (Dune) and 222 (The Hobbit)
// resolve, 999 fails as unreachable, anything else has no record.
#[cfg(test)]
pub(crate) fn create_test_catalog_service() -> Arc<dyn CatalogService> {
    use crate::books::repository::json_book_repository::JsonBookRepository;
    use crate::catalog::store::Catalog;
    use crate::core::domain::EnrichmentSettings;
    use crate::enrichment::pool::BatchEnricher;
    use crate::enrichment::stub::StaticEnricher;
    use crate::gateway::events::DisabledPublisher;

    let enricher = StaticEnricher::default()
        .with_record("111", "Dune", "Frank Herbert")
        .with_record("222", "The Hobbit", "J.R.R. Tolkien")
        .with_failure("999");
    Arc::new(CatalogServiceImpl::new(
        Box::new(JsonBookRepository::new(Catalog::in_memory())),
        Box::new(DisabledPublisher),
        BatchEnricher::new(Arc::new(enricher), &EnrichmentSettings::default())))
}
