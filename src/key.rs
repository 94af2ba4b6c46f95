//! Cache key derivation
//!
//! Derives a bounded, deterministic storage key from a URL.

/// Namespace prefix separating scrape entries from unrelated store usage.
pub const KEY_NAMESPACE: &str = "scraper:";

/// Build the cache key for a URL
///
/// Keeps the first `max_chars` characters of the URL (protects the store
/// from oversized keys) and prefixes the fixed namespace. Pure function,
/// no failure modes; truncation is character-based so it never splits a
/// UTF-8 code point.
pub fn cache_key(url: &str, max_chars: usize) -> String {
    let truncated: String = url.chars().take(max_chars).collect();
    format!("{}{}", KEY_NAMESPACE, truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url_kept_whole() {
        let key = cache_key("https://example.com/page", 200);
        assert_eq!(key, "scraper:https://example.com/page");
    }

    #[test]
    fn test_long_url_truncated() {
        let url = format!("https://example.com/{}", "a".repeat(300));
        let key = cache_key(&url, 200);

        let unprefixed = key.strip_prefix(KEY_NAMESPACE).unwrap();
        assert_eq!(unprefixed.chars().count(), 200);
        assert_eq!(unprefixed, &url.chars().take(200).collect::<String>());
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let url = format!("https://example.com/{}", "é".repeat(300));
        let key = cache_key(&url, 200);
        assert_eq!(key.strip_prefix(KEY_NAMESPACE).unwrap().chars().count(), 200);
    }

    #[test]
    fn test_deterministic() {
        let url = "https://example.com/article?id=42";
        assert_eq!(cache_key(url, 200), cache_key(url, 200));
    }
}
