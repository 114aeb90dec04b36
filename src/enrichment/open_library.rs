use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use crate::enrichment::{BookMetadata, Enricher, EnrichmentError};

/// Client for the Open Library books API (`/api/books?bibkeys=ISBN:...&jscmd=data`).
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OpenLibraryRecord {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<NamedEntry>,
    #[serde(default)]
    publishers: Vec<NamedEntry>,
    publish_date: Option<String>,
    number_of_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: Option<String>,
}

impl OpenLibraryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EnrichmentError> {
        let http = Client::builder()
            .user_agent("bookshelf/0.1")
            .timeout(timeout)
            .build()
            .map_err(|error| EnrichmentError::Unreachable(format!("failed to build http client: {error}")))?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/books", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Enricher for OpenLibraryClient {
    async fn lookup(&self, isbn: &str) -> Result<Option<BookMetadata>, EnrichmentError> {
        let bibkey = format!("ISBN:{isbn}");
        let response = self
            .http
            .get(self.endpoint())
            .query(&[("bibkeys", bibkey.as_str()), ("format", "json"), ("jscmd", "data")])
            .send()
            .await
            .map_err(|error| EnrichmentError::Unreachable(format!("failed to reach {}: {error}", self.base_url)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Status { status, body });
        }

        let mut records: HashMap<String, OpenLibraryRecord> = response.json().await.map_err(|error| {
            EnrichmentError::InvalidResponse(format!("failed to decode Open Library response: {error}"))
        })?;

        let record = match records.remove(&bibkey) {
            Some(record) => record,
            None => {
                tracing::debug!(isbn, "no Open Library record");
                return Ok(None);
            }
        };
        Ok(Some(BookMetadata {
            isbn: isbn.to_string(),
            title: record.title,
            author: record.authors.into_iter().next().and_then(|a| a.name),
            publisher: record.publishers.into_iter().next().and_then(|p| p.name),
            publish_date: record.publish_date,
            number_of_pages: record.number_of_pages,
        }))
    }
}
