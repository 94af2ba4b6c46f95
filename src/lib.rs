//! Cache-first web-content scraping
//!
//! Given a URL, returns a normalized, size-bounded textual summary of the
//! page, serving a previously computed summary from the cache store when
//! available and falling back to a live fetch-and-extract pass otherwise.
//!
//! ## Architecture
//!
//! ```text
//! Scraper::scrape(url) → CacheStore (get) → decode + validate → hit → return
//!                              ↓ miss / corrupt entry (deleted)
//!                        HTTP fetch → extract → CacheStore (set, 7d TTL)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let store = Arc::new(MemoryStore::new());
//! let scraper = Scraper::new(store, ScrapeConfig::from_env());
//!
//! let record = scraper.scrape("https://example.com/article").await;
//! if record.error.is_none() {
//!     println!("{}", record.content);
//! }
//! ```
//!
//! The caller always receives a structurally valid [`NormalizedContent`];
//! success and failure are distinguished by the `error` field, never by a
//! panic or error crossing this boundary.

pub mod config;
pub mod extractor;
pub mod key;
pub mod service;
pub mod store;
pub mod types;
pub mod urls;
pub mod validate;

pub use config::ScrapeConfig;
pub use extractor::extract_content;
pub use key::cache_key;
pub use service::Scraper;
pub use store::{CacheStore, MemoryStore, StoreError, StoreValue};
pub use types::{FetchError, Headings, NormalizedContent, SCRAPE_ERROR_MESSAGE};
pub use urls::find_url;
pub use validate::{decode_entry, is_valid_record, DecodedEntry};
