//! HTTP fetch and HTML content extraction
//!
//! Fetches raw hypertext for a URL and reduces it to a normalized content
//! record: title, meta description, headings, and a flat combination of
//! the structurally significant regions of the page, cleaned and bounded.

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::types::{FetchError, Headings, NormalizedContent};

/// Elements whose text must never contribute to extracted content.
const STRIPPED_TAGS: [&str; 4] = ["script", "style", "iframe", "noscript"];

/// Fixed set of "content container" selectors checked after article/main.
const CONTENT_CONTAINER_SELECTOR: &str = ".content, #content, [class='content']";

/// Fetch the raw hypertext body for a URL
///
/// Single GET with no custom headers; the client's default timeout and
/// redirect policy apply. Non-success statuses and transport failures come
/// back as [`FetchError`]; the orchestrator turns them into the terminal
/// error record.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(url.to_string()));
    }

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout(url.to_string())
        } else {
            FetchError::Http(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16(), url.to_string()));
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Http(e.to_string()))
}

/// Reduce fetched hypertext to a [`NormalizedContent`] record
///
/// The combined `content` field concatenates, in fixed order: title, meta
/// description, h1 texts, h2 texts, `<article>` text, `<main>` text,
/// content-container text, paragraph text, and list-item text, then cleans
/// the result and truncates it to `max_chars` characters. Script, style,
/// iframe, and noscript subtrees never contribute text.
pub fn extract_content(url: &str, html: &str, max_chars: usize) -> NormalizedContent {
    let document = Html::parse_document(html);

    let title = select_text(&document, "title");
    let meta_description = select_attr(&document, "meta[name='description']", "content");
    let h1 = select_text(&document, "h1");
    let h2 = select_text(&document, "h2");
    let article_text = select_text(&document, "article");
    let main_text = select_text(&document, "main");
    let container_text = select_text(&document, CONTENT_CONTAINER_SELECTOR);
    let paragraphs = select_text(&document, "p");
    let list_items = select_text(&document, "li");

    let combined = [
        title.as_str(),
        meta_description.as_str(),
        h1.as_str(),
        h2.as_str(),
        article_text.as_str(),
        main_text.as_str(),
        container_text.as_str(),
        paragraphs.as_str(),
        list_items.as_str(),
    ]
    .join(" ");

    NormalizedContent {
        url: url.to_string(),
        title: clean_text(&title),
        headings: Headings {
            h1: clean_text(&h1),
            h2: clean_text(&h2),
        },
        meta_description: clean_text(&meta_description),
        content: truncate_chars(&clean_text(&combined), max_chars),
        error: None,
        cached_at: None,
    }
}

/// Concatenated text of every element matching `selector_str`, with
/// stripped subtrees skipped
fn select_text(document: &Html, selector_str: &str) -> String {
    let mut out = String::new();
    if let Ok(selector) = Selector::parse(selector_str) {
        for element in document.select(&selector) {
            push_element_text(element, &mut out);
        }
    }
    out
}

/// First matching element's attribute value, empty string if absent
fn select_attr(document: &Html, selector_str: &str, attr: &str) -> String {
    if let Ok(selector) = Selector::parse(selector_str) {
        if let Some(element) = document.select(&selector).next() {
            return element.value().attr(attr).unwrap_or("").to_string();
        }
    }
    String::new()
}

/// Collect descendant text, skipping script/style/iframe/noscript subtrees
fn push_element_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(&text.text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !STRIPPED_TAGS.contains(&child_element.value().name()) {
                push_element_text(child_element, out);
            }
        }
    }
}

/// Clean text: collapse whitespace runs to single spaces and trim
///
/// Idempotent: cleaning an already-clean string yields the same string.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Hard-truncate to `max_chars` characters, never splitting a code point
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Sample Article</title>
            <meta name="description" content="A sample page about testing.">
            <script>var leaked = "script text must not appear";</script>
            <style>.hidden { display: none; }</style>
        </head>
        <body>
            <h1>Primary Heading</h1>
            <h2>First Subheading</h2>
            <h2>Second Subheading</h2>
            <article>
                Article body text.
                <script>console.log("inline script inside article");</script>
            </article>
            <main>Main region text.</main>
            <div class="content">Container region text.</div>
            <p>A paragraph of prose.</p>
            <ul><li>First item</li><li>Second item</li></ul>
            <iframe src="https://ads.example.com">iframe fallback text</iframe>
            <noscript>Please enable JavaScript.</noscript>
        </body>
        </html>
    "#;

    #[test]
    fn test_extracts_structured_fields() {
        let record = extract_content("https://example.com/a", SAMPLE_HTML, 10_000);

        assert_eq!(record.url, "https://example.com/a");
        assert_eq!(record.title, "Sample Article");
        assert_eq!(record.meta_description, "A sample page about testing.");
        assert_eq!(record.headings.h1, "Primary Heading");
        assert_eq!(record.headings.h2, "First Subheading Second Subheading");
        assert!(record.error.is_none());
        assert!(record.cached_at.is_none());
    }

    #[test]
    fn test_combined_content_order() {
        let record = extract_content("https://example.com/a", SAMPLE_HTML, 10_000);

        let title_pos = record.content.find("Sample Article").unwrap();
        let desc_pos = record.content.find("A sample page").unwrap();
        let h1_pos = record.content.find("Primary Heading").unwrap();
        let article_pos = record.content.find("Article body").unwrap();
        let para_pos = record.content.find("A paragraph of prose").unwrap();
        let item_pos = record.content.find("First item").unwrap();

        assert!(title_pos < desc_pos);
        assert!(desc_pos < h1_pos);
        assert!(h1_pos < article_pos);
        assert!(article_pos < para_pos);
        assert!(para_pos < item_pos);
    }

    #[test]
    fn test_strips_non_text_elements() {
        let record = extract_content("https://example.com/a", SAMPLE_HTML, 10_000);

        assert!(!record.content.contains("script text"));
        assert!(!record.content.contains("inline script"));
        assert!(!record.content.contains("display: none"));
        assert!(!record.content.contains("iframe fallback"));
        assert!(!record.content.contains("enable JavaScript"));
    }

    #[test]
    fn test_missing_meta_description_is_empty() {
        let html = "<html><head><title>T</title></head><body><p>Body</p></body></html>";
        let record = extract_content("https://example.com", html, 10_000);
        assert_eq!(record.meta_description, "");
    }

    #[test]
    fn test_empty_document() {
        let record = extract_content("https://example.com", "", 10_000);
        assert_eq!(record.title, "");
        assert_eq!(record.headings.h1, "");
        assert_eq!(record.content, "");
        assert!(record.error.is_none());
    }

    #[test]
    fn test_content_length_bound() {
        let body: String = (0..2000).map(|i| format!("<p>paragraph {}</p>", i)).collect();
        let html = format!("<html><body>{}</body></html>", body);
        let record = extract_content("https://example.com", &html, 10_000);

        assert!(record.content.chars().count() <= 10_000);
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let text = "é".repeat(50);
        let truncated = truncate_chars(&text, 10);
        assert_eq!(truncated.chars().count(), 10);
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Hello \n\n  world \t test  "), "Hello world test");
    }

    #[test]
    fn test_clean_text_idempotent() {
        for raw in ["  a \n b  ", "already clean", "", "\t\n", "one  two\tthree"] {
            let once = clean_text(raw);
            assert_eq!(clean_text(&once), once);
        }
    }
}
