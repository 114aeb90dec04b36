use std::sync::Arc;
use crate::core::domain::EnrichmentSettings;
use crate::core::library::LibraryResult;
use crate::enrichment::open_library::OpenLibraryClient;
use crate::enrichment::pool::BatchEnricher;

pub fn create_enricher(settings: &EnrichmentSettings) -> LibraryResult<BatchEnricher> {
    let client = OpenLibraryClient::new(settings.base_url.as_str(), settings.timeout)?;
    Ok(BatchEnricher::new(Arc::new(client), settings))
}
