//! URL detection in free-form text
//!
//! Callers pull a URL out of a chat message before handing it to
//! [`crate::Scraper::scrape`].

use std::sync::OnceLock;

use regex::Regex;

static URL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn url_pattern() -> &'static Regex {
    URL_PATTERN.get_or_init(|| {
        Regex::new(
            r"https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*",
        )
        .expect("URL pattern is valid")
    })
}

/// Find the first http(s) URL in a message, if any
pub fn find_url(text: &str) -> Option<&str> {
    url_pattern().find(text).map(|m| m.as_str())
}
