use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use crate::core::repository::RepositoryStore;
use crate::gateway::GatewayPublisherVia;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
}

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

pub const DEFAULT_CATALOG_PATH: &str = "library.json";
pub const DEFAULT_OPEN_LIBRARY_URL: &str = "https://openlibrary.org";

// Configuration abstracts config options for the catalog service
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration {
    pub catalog_path: PathBuf,
    pub store: RepositoryStore,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub log_json: bool,
    pub events: GatewayPublisherVia,
    pub enrichment: EnrichmentSettings,
}

/// Tuning for calls to the remote bibliographic service.
#[derive(Debug, PartialEq, Clone)]
pub struct EnrichmentSettings {
    pub base_url: String,
    /// Upper bound for a single lookup, including the HTTP round trip.
    pub timeout: Duration,
    /// Maximum lookups in flight during a batch.
    pub max_concurrency: usize,
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further attempt.
    pub backoff: Duration,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPEN_LIBRARY_URL.to_string(),
            timeout: Duration::from_millis(10_000),
            max_concurrency: 4,
            max_retries: 0,
            backoff: Duration::from_millis(1_000),
        }
    }
}

impl Configuration {
    pub fn new(catalog_path: &str) -> Self {
        Configuration {
            catalog_path: PathBuf::from(catalog_path),
            store: RepositoryStore::JsonFile,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            log_level: "info".to_string(),
            log_json: false,
            events: GatewayPublisherVia::Logs,
            enrichment: EnrichmentSettings::default(),
        }
    }

    /// Load configuration from the process environment, honoring a `.env` file when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = EnrichmentSettings::default();

        let config = Configuration {
            catalog_path: PathBuf::from(get("BOOKSHELF_CATALOG_PATH")
                .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string())),
            store: parse_or("BOOKSHELF_STORE", get("BOOKSHELF_STORE"), RepositoryStore::JsonFile)?,
            bind_addr: parse_or("BOOKSHELF_BIND_ADDR", get("BOOKSHELF_BIND_ADDR"),
                                SocketAddr::from(([127, 0, 0, 1], 8000)))?,
            log_level: get("BOOKSHELF_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json: parse_or("BOOKSHELF_LOG_JSON", get("BOOKSHELF_LOG_JSON"), false)?,
            events: parse_or("BOOKSHELF_EVENTS", get("BOOKSHELF_EVENTS"), GatewayPublisherVia::Logs)?,
            enrichment: EnrichmentSettings {
                base_url: get("OPEN_LIBRARY_URL").unwrap_or(defaults.base_url),
                timeout: parse_or("BOOKSHELF_ENRICH_TIMEOUT_MS", get("BOOKSHELF_ENRICH_TIMEOUT_MS"), 10_000u64)
                    .map(Duration::from_millis)?,
                max_concurrency: parse_or("BOOKSHELF_ENRICH_CONCURRENCY", get("BOOKSHELF_ENRICH_CONCURRENCY"),
                                          defaults.max_concurrency)?,
                max_retries: parse_or("BOOKSHELF_ENRICH_RETRIES", get("BOOKSHELF_ENRICH_RETRIES"),
                                      defaults.max_retries)?,
                backoff: parse_or("BOOKSHELF_ENRICH_BACKOFF_MS", get("BOOKSHELF_ENRICH_BACKOFF_MS"), 1_000u64)
                    .map(Duration::from_millis)?,
            },
        };
        if config.enrichment.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue("BOOKSHELF_ENRICH_CONCURRENCY".to_string()));
        }
        tracing::debug!(
            catalog_path = %config.catalog_path.display(),
            store = ?config.store,
            bind_addr = %config.bind_addr,
            "loaded configuration"
        );
        Ok(config)
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;
    use crate::core::domain::{ConfigError, Configuration};
    use crate::core::repository::RepositoryStore;
    use crate::gateway::GatewayPublisherVia;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test.json");
        assert_eq!(PathBuf::from("test.json"), config.catalog_path);
        assert_eq!(RepositoryStore::JsonFile, config.store);
        assert_eq!(4, config.enrichment.max_concurrency);
        assert_eq!(0, config.enrichment.max_retries);
    }

    #[tokio::test]
    async fn test_should_load_defaults_from_empty_env() {
        let config = Configuration::from_lookup(lookup(&[])).expect("should load config");
        assert_eq!(PathBuf::from("library.json"), config.catalog_path);
        assert_eq!("127.0.0.1:8000", config.bind_addr.to_string());
        assert_eq!(GatewayPublisherVia::Logs, config.events);
        assert_eq!(Duration::from_secs(10), config.enrichment.timeout);
        assert_eq!("https://openlibrary.org", config.enrichment.base_url);
    }

    #[tokio::test]
    async fn test_should_load_overrides() {
        let config = Configuration::from_lookup(lookup(&[
            ("BOOKSHELF_CATALOG_PATH", "/tmp/books.json"),
            ("BOOKSHELF_STORE", "memory"),
            ("BOOKSHELF_BIND_ADDR", "0.0.0.0:9000"),
            ("BOOKSHELF_LOG_JSON", "true"),
            ("BOOKSHELF_EVENTS", "disabled"),
            ("BOOKSHELF_ENRICH_TIMEOUT_MS", "250"),
            ("BOOKSHELF_ENRICH_CONCURRENCY", "8"),
            ("BOOKSHELF_ENRICH_RETRIES", "2"),
        ])).expect("should load config");
        assert_eq!(PathBuf::from("/tmp/books.json"), config.catalog_path);
        assert_eq!(RepositoryStore::Memory, config.store);
        assert_eq!(9000, config.bind_addr.port());
        assert!(config.log_json);
        assert_eq!(GatewayPublisherVia::Disabled, config.events);
        assert_eq!(Duration::from_millis(250), config.enrichment.timeout);
        assert_eq!(8, config.enrichment.max_concurrency);
        assert_eq!(2, config.enrichment.max_retries);
    }

    #[tokio::test]
    async fn test_should_ignore_blank_values() {
        let config = Configuration::from_lookup(lookup(&[("BOOKSHELF_CATALOG_PATH", "  ")]))
            .expect("should load config");
        assert_eq!(PathBuf::from("library.json"), config.catalog_path);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_values() {
        let err = Configuration::from_lookup(lookup(&[("BOOKSHELF_ENRICH_CONCURRENCY", "many")]))
            .expect_err("should reject");
        assert_eq!(ConfigError::InvalidValue("BOOKSHELF_ENRICH_CONCURRENCY".to_string()), err);

        let err = Configuration::from_lookup(lookup(&[("BOOKSHELF_ENRICH_CONCURRENCY", "0")]))
            .expect_err("should reject");
        assert_eq!(ConfigError::InvalidValue("BOOKSHELF_ENRICH_CONCURRENCY".to_string()), err);

        let err = Configuration::from_lookup(lookup(&[("BOOKSHELF_STORE", "postgres")]))
            .expect_err("should reject");
        assert_eq!(ConfigError::InvalidValue("BOOKSHELF_STORE".to_string()), err);
    }
}
