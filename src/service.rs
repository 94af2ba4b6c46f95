//! Cache-first scrape orchestration
//!
//! Composes the key builder, cache store, validator, and extractor into
//! the cache-first fetch algorithm. [`Scraper::scrape`] is the only entry
//! point external collaborators call.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::ScrapeConfig;
use crate::extractor::{extract_content, fetch_page};
use crate::key::cache_key;
use crate::store::CacheStore;
use crate::types::NormalizedContent;
use crate::validate::{decode_entry, DecodedEntry};

/// Cache-first web-content scraper
///
/// Each call to [`scrape`](Self::scrape) is an independent unit of work;
/// concurrent calls for the same URL may both fetch and both write, with
/// last-writer-wins semantics in the store. No request coalescing, no
/// retries.
pub struct Scraper {
    client: Client,
    store: Arc<dyn CacheStore>,
    config: ScrapeConfig,
}

impl Scraper {
    /// Create a new scraper over a cache store
    pub fn new(store: Arc<dyn CacheStore>, config: ScrapeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            store,
            config,
        }
    }

    /// Scrape a URL, serving a cached summary when one is available
    ///
    /// Always returns a structurally valid record; failure is signalled
    /// through the `error` field, never through a panic or error value
    /// crossing this boundary. A fresh successful extraction is stamped
    /// with `cachedAt`, persisted (unless oversized), and that same record
    /// is returned. Error records are returned directly and never cached.
    pub async fn scrape(&self, url: &str) -> NormalizedContent {
        debug!("Starting scrape process for: {}", url);

        let key = cache_key(url, self.config.max_key_chars);
        if let Some(record) = self.read_cached(&key, url).await {
            info!("Using cached content for: {}", url);
            return record;
        }

        debug!("Cache miss - proceeding with fresh scrape for: {}", url);

        match fetch_page(&self.client, url).await {
            Ok(html) => {
                let mut record = extract_content(url, &html, self.config.max_content_chars);
                record.cached_at = Some(Utc::now().timestamp_millis());
                self.write_cached(&key, &record, url).await;
                record
            }
            Err(e) => {
                warn!("Error scraping {}: {}", url, e);
                NormalizedContent::failed(url)
            }
        }
    }

    /// Read and validate a cached record; any failure degrades to a miss
    async fn read_cached(&self, key: &str, url: &str) -> Option<NormalizedContent> {
        let value = match self.store.get(key).await {
            Ok(v) => v,
            Err(e) => {
                warn!("Error retrieving cached content: {}", e);
                return None;
            }
        };

        match decode_entry(value) {
            DecodedEntry::Missing => None,
            DecodedEntry::Corrupt => {
                warn!("Invalid cached content format for URL: {}", url);
                if let Err(e) = self.store.delete(key).await {
                    warn!("Failed to delete corrupt cache entry: {}", e);
                }
                None
            }
            DecodedEntry::Valid(record) => {
                let age_ms = record
                    .cached_at
                    .map(|at| Utc::now().timestamp_millis() - at)
                    .unwrap_or(0);
                debug!("Cached content age: {} minutes", age_ms / 60_000);
                Some(record)
            }
        }
    }

    /// Persist a freshly extracted record; failures are logged and swallowed
    async fn write_cached(&self, key: &str, record: &NormalizedContent, url: &str) {
        let serialized = match serde_json::to_string(record) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize content for {}: {}", url, e);
                return;
            }
        };

        if serialized.len() > self.config.max_cached_bytes {
            warn!(
                "Content too large to cache for URL: {} ({} bytes)",
                url,
                serialized.len()
            );
            return;
        }

        match self
            .store
            .set(key, serialized, self.config.cache_ttl_secs)
            .await
        {
            Ok(()) => info!(
                "Successfully cached content for: {} (TTL {}s)",
                url, self.config.cache_ttl_secs
            ),
            Err(e) => warn!("Cache storage error: {}", e),
        }
    }
}
