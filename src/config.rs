//! Configuration for scraping and caching
//!
//! Defines the TTL, size ceilings, and fetch settings, with environment
//! variable overrides over hard defaults.

use std::env;

/// Configuration for the scrape pipeline
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Cache TTL in seconds for every write (default: 604800 = 7 days)
    pub cache_ttl_secs: u64,
    /// Maximum serialized record size to persist, in bytes (default: 1000000).
    /// Oversized records are still returned to the caller, never stored.
    pub max_cached_bytes: usize,
    /// Maximum length of the combined `content` field in characters
    /// (default: 10000)
    pub max_content_chars: usize,
    /// URL characters kept when building a cache key, before the namespace
    /// prefix (default: 200)
    pub max_key_chars: usize,
    /// Timeout per page fetch in seconds (default: 10)
    pub fetch_timeout_secs: u64,
    /// User agent sent with every fetch
    pub user_agent: String,
}

impl ScrapeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_secs: env::var("SCRAPE_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            max_cached_bytes: env::var("SCRAPE_MAX_CACHED_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_cached_bytes),
            max_content_chars: env::var("SCRAPE_MAX_CONTENT_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_content_chars),
            max_key_chars: defaults.max_key_chars,
            fetch_timeout_secs: env::var("SCRAPE_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fetch_timeout_secs),
            user_agent: env::var("SCRAPE_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.cache_ttl_secs == 0 {
            return Err("cache_ttl_secs must be at least 1".to_string());
        }
        if self.max_content_chars < 100 {
            return Err("max_content_chars must be at least 100".to_string());
        }
        if self.max_key_chars == 0 {
            return Err("max_key_chars must be at least 1".to_string());
        }
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 7 * 24 * 60 * 60,
            max_cached_bytes: 1_000_000,
            max_content_chars: 10_000,
            max_key_chars: 200,
            fetch_timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; ScrapeCacheBot/1.0)".to_string(),
        }
    }
}
