//! Core types for scraped page content

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed error message carried by a failed scrape record.
pub const SCRAPE_ERROR_MESSAGE: &str = "Error scraping URL";

/// Level-1 and level-2 heading texts of a page, each the cleaned
/// concatenation of every heading at that level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headings {
    /// All `<h1>` texts, concatenated and cleaned
    pub h1: String,
    /// All `<h2>` texts, concatenated and cleaned
    pub h2: String,
}

/// Normalized summary of one URL's page content
///
/// This is the unit moved through the whole pipeline: produced by the
/// extractor, persisted in the cache store, and returned to callers.
/// Field names serialize in camelCase so records round-trip against the
/// cache schema unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedContent {
    /// The original request URL, unmodified
    pub url: String,
    /// Page title, cleaned
    pub title: String,
    /// Level-1 and level-2 heading texts
    pub headings: Headings,
    /// `meta[name=description]` content, cleaned, empty if absent
    pub meta_description: String,
    /// Flat combination of title, description, headings, and the text of
    /// structurally significant regions, cleaned and truncated
    pub content: String,
    /// Set only when fetch/extraction failed; serializes as `null` on
    /// success. When set, every other text field is empty.
    pub error: Option<String>,
    /// Epoch milliseconds at store time; present only on records that were
    /// written to or read from the cache store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<i64>,
}

impl NormalizedContent {
    /// Build the terminal error record for a URL that could not be scraped
    ///
    /// All content fields are empty and `error` carries the fixed message;
    /// error records are returned to the caller but never cached.
    pub fn failed(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: String::new(),
            headings: Headings {
                h1: String::new(),
                h2: String::new(),
            },
            meta_description: String::new(),
            content: String::new(),
            error: Some(SCRAPE_ERROR_MESSAGE.to_string()),
            cached_at: None,
        }
    }

    /// Whether this record represents a failed scrape
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Errors that can occur while fetching a page
///
/// These stay internal to the scrape pipeline: the orchestrator converts
/// any of them into an error-tagged [`NormalizedContent`] before the
/// result crosses the crate boundary.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),

    /// Transport-level HTTP error (DNS, connection, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success HTTP status
    #[error("HTTP {0} for: {1}")]
    Status(u16, String),

    /// URL failed to parse or uses an unsupported scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let record = NormalizedContent {
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            headings: Headings {
                h1: "Heading".to_string(),
                h2: String::new(),
            },
            meta_description: "A page".to_string(),
            content: "Example Heading A page".to_string(),
            error: None,
            cached_at: Some(1_700_000_000_000),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"metaDescription\":\"A page\""));
        assert!(json.contains("\"cachedAt\":1700000000000"));
        assert!(json.contains("\"error\":null"));
    }

    #[test]
    fn test_cached_at_skipped_when_absent() {
        let record = NormalizedContent::failed("https://example.com");
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("cachedAt"));
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let json = r#"{
            "url": "https://example.com",
            "title": "T",
            "headings": {"h1": "", "h2": ""},
            "metaDescription": "",
            "content": "T"
        }"#;

        let record: NormalizedContent = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "T");
        assert!(record.error.is_none());
        assert!(record.cached_at.is_none());
    }

    #[test]
    fn test_failed_record_mutual_exclusion() {
        let record = NormalizedContent::failed("https://example.com/missing");
        assert!(record.is_error());
        assert_eq!(record.error.as_deref(), Some(SCRAPE_ERROR_MESSAGE));
        assert!(record.title.is_empty());
        assert!(record.headings.h1.is_empty());
        assert!(record.headings.h2.is_empty());
        assert!(record.meta_description.is_empty());
        assert!(record.content.is_empty());
        assert!(record.cached_at.is_none());
    }

    #[test]
    fn test_fetch_error_display() {
        let error = FetchError::Status(503, "https://example.com".to_string());
        assert!(error.to_string().contains("503"));

        let error = FetchError::Timeout("https://slow.example.com".to_string());
        assert!(error.to_string().contains("Timeout"));
    }
}
