//! Decode and validate values read from the cache store
//!
//! A cache read may hand back a serialized string or a structured value,
//! possibly written by an older schema version. Everything is normalized
//! here in one step; anything that fails the structural check is reported
//! as corrupt so the orchestrator can purge the key and fall back to a
//! fresh extraction.

use serde_json::Value;

use crate::store::StoreValue;
use crate::types::NormalizedContent;

/// Outcome of decoding one cache read
#[derive(Debug)]
pub enum DecodedEntry {
    /// Nothing stored under the key
    Missing,
    /// Stored value is unparseable or fails the structural check; the
    /// offending key must be deleted and the read treated as a miss
    Corrupt,
    /// A well-formed record, returned unchanged
    Valid(NormalizedContent),
}

/// Structural check that a value has the expected record shape
///
/// Requires `url`, `title`, `metaDescription`, and `content` as strings, a
/// `headings` object with string `h1`/`h2`, and `error` as a string,
/// null, or absent. Guards against schema drift from a previous version
/// silently corrupting responses.
pub fn is_valid_record(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    let is_str = |key: &str| obj.get(key).is_some_and(Value::is_string);

    let headings_ok = obj
        .get("headings")
        .and_then(Value::as_object)
        .is_some_and(|h| {
            h.get("h1").is_some_and(Value::is_string) && h.get("h2").is_some_and(Value::is_string)
        });

    let error_ok = match obj.get("error") {
        None | Some(Value::Null) | Some(Value::String(_)) => true,
        Some(_) => false,
    };

    is_str("url") && is_str("title") && is_str("metaDescription") && is_str("content")
        && headings_ok
        && error_ok
}

/// Decode one cache read into a [`DecodedEntry`]
///
/// `Raw` values are parsed as JSON first; either encoding then passes
/// through [`is_valid_record`] and deserialization. No other logic
/// branches on the store's encoding.
pub fn decode_entry(value: Option<StoreValue>) -> DecodedEntry {
    let parsed = match value {
        None => return DecodedEntry::Missing,
        Some(StoreValue::Raw(raw)) => match serde_json::from_str::<Value>(&raw) {
            Ok(v) => v,
            Err(_) => return DecodedEntry::Corrupt,
        },
        Some(StoreValue::Structured(v)) => v,
    };

    if !is_valid_record(&parsed) {
        return DecodedEntry::Corrupt;
    }

    match serde_json::from_value(parsed) {
        Ok(record) => DecodedEntry::Valid(record),
        Err(_) => DecodedEntry::Corrupt,
    }
}
