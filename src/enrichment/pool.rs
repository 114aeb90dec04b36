use std::sync::Arc;
use std::time::Duration;
use futures_util::{stream, StreamExt};
use crate::core::domain::EnrichmentSettings;
use crate::enrichment::{BookMetadata, Enricher, EnrichmentError};

/// Result of enriching one isbn inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentOutcome {
    pub isbn: String,
    pub result: Result<Option<BookMetadata>, EnrichmentError>,
}

/// Runs lookups against an [`Enricher`] with a per-call timeout and a cap on
/// how many calls are in flight at once.
#[derive(Clone)]
pub struct BatchEnricher {
    enricher: Arc<dyn Enricher>,
    timeout: Duration,
    max_concurrency: usize,
    max_retries: u32,
    backoff: Duration,
}

impl BatchEnricher {
    pub fn new(enricher: Arc<dyn Enricher>, settings: &EnrichmentSettings) -> Self {
        Self {
            enricher,
            timeout: settings.timeout,
            max_concurrency: settings.max_concurrency.max(1),
            max_retries: settings.max_retries,
            backoff: settings.backoff,
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Looks up a single isbn. Retryable failures are retried up to `max_retries`
    /// times with exponential backoff.
    pub async fn fetch(&self, isbn: &str) -> Result<Option<BookMetadata>, EnrichmentError> {
        let mut attempt = 0;
        let mut delay = self.backoff;
        loop {
            let result = match tokio::time::timeout(self.timeout, self.enricher.lookup(isbn)).await {
                Ok(result) => result,
                Err(_) => Err(EnrichmentError::Timeout(self.timeout)),
            };
            match result {
                Err(err) if err.retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(isbn, attempt, error = %err, "enrichment lookup failed; retrying");
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
                other => return other,
            }
        }
    }

    /// Looks up every isbn; outcomes come back in input order, one per isbn.
    pub async fn fetch_all(&self, isbns: &[String]) -> Vec<EnrichmentOutcome> {
        stream::iter(isbns.iter().cloned())
            .map(|isbn| async move {
                let result = self.fetch(isbn.as_str()).await;
                if let Err(err) = &result {
                    tracing::warn!(isbn = %isbn, error = %err, "enrichment lookup failed");
                }
                EnrichmentOutcome { isbn, result }
            })
            .buffered(self.max_concurrency)
            .collect()
            .await
    }
}
