//! Cache store abstraction and in-process backend
//!
//! The scrape pipeline talks to any key/value store with per-entry
//! expiration through [`CacheStore`]. Store failures never cross the
//! orchestrator boundary: a failed read degrades to a cache miss and a
//! failed write is logged and swallowed.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;

/// A value handed back by the store
///
/// The store may return entries either as a JSON-serialized string or as
/// an already-structured value; callers must accept both. Decoding is
/// normalized in one step by [`crate::validate::decode_entry`] and no
/// other logic branches on the encoding.
#[derive(Debug, Clone)]
pub enum StoreValue {
    /// Serialized string, expected to parse as JSON
    Raw(String),
    /// Already-structured value
    Structured(serde_json::Value),
}

/// Errors surfaced by a cache store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (network/auth failure)
    #[error("cache store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the operation
    #[error("cache store backend error: {0}")]
    Backend(String),
}

/// Key/value store with per-entry expiration
///
/// Implementations must be safe to share across many concurrent scrape
/// calls; writes are last-writer-wins and need no coordination.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the value stored under `key`, `None` on miss or expiry
    async fn get(&self, key: &str) -> Result<Option<StoreValue>, StoreError>;

    /// Store a serialized value under `key`, expiring after `ttl_secs`
    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), StoreError>;

    /// Remove the entry under `key`, if any
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

struct Entry {
    value: StoreValue,
    inserted_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

/// In-process [`CacheStore`] backed by a `RwLock<HashMap>`
///
/// Expired entries are unreadable immediately and lazily purged on write.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already-structured value directly
    ///
    /// Exercises the [`StoreValue::Structured`] read path, which a plain
    /// `set` (always `Raw`) cannot reach.
    pub fn insert_structured(&self, key: &str, value: serde_json::Value, ttl_secs: u64) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                key.to_string(),
                Entry {
                    value: StoreValue::Structured(value),
                    inserted_at: Instant::now(),
                    ttl: Duration::from_secs(ttl_secs),
                },
            );
        }
    }

    /// Whether a live (unexpired) entry exists under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.get(key).is_some_and(|e| !e.expired()))
            .unwrap_or(false)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.values().filter(|e| !e.expired()).count())
            .unwrap_or(0)
    }

    /// Whether the store holds no live entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<StoreValue>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match entries.get(key) {
            Some(entry) if !entry.expired() => Ok(Some(entry.value.clone())),
            _ => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        entries.retain(|_, entry| !entry.expired());
        entries.insert(
            key.to_string(),
            Entry {
                value: StoreValue::Raw(value),
                inserted_at: Instant::now(),
                ttl: Duration::from_secs(ttl_secs),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        entries.remove(key);
        Ok(())
    }
}
