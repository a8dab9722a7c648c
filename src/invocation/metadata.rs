//! Carrier context propagated to handlers.
//!
//! # Responsibilities
//! - Hold multi-valued metadata keyed by lowercase header name
//! - Merge transport headers over metadata already attached upstream
//!
//! # Design Decisions
//! - Keys are lowercased on insertion, like HTTP/2 and gRPC metadata
//! - Values are kept as raw bytes; header values may carry obs-text that is
//!   not UTF-8, and handlers see exactly what the caller sent
//! - Merge is "set" per key: a header replaces every prior value of that
//!   key, keys absent from the headers are kept
//! - Merging returns a new map; the source is left untouched

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::http::HeaderMap;

/// Multi-valued metadata mapping, e.g. tracing and propagation headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, Vec<Bytes>>,
}

impl Metadata {
    /// Create an empty metadata set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all values of `key`.
    pub fn set<I, V>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Bytes>,
    {
        let values: Vec<Bytes> = values.into_iter().map(Into::into).collect();
        self.entries.insert(key.to_ascii_lowercase(), values);
    }

    /// Add one value to `key`, keeping existing values.
    pub fn append(&mut self, key: &str, value: impl Into<Bytes>) {
        self.entries
            .entry(key.to_ascii_lowercase())
            .or_default()
            .push(value.into());
    }

    /// All raw values stored for `key`.
    pub fn get(&self, key: &str) -> &[Bytes] {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First raw value stored for `key`.
    pub fn get_first_bytes(&self, key: &str) -> Option<&[u8]> {
        self.get(key).first().map(|v| &v[..])
    }

    /// First value stored for `key`, if it is valid UTF-8.
    pub fn get_first(&self, key: &str) -> Option<&str> {
        self.get_first_bytes(key)
            .and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Values of `key` that are valid UTF-8, in order.
    pub fn get_all_str(&self, key: &str) -> impl Iterator<Item = &str> {
        self.get(key)
            .iter()
            .filter_map(|v| std::str::from_utf8(v).ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over keys and their raw values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Bytes])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Build a new set from `self` with every header in `headers` set on top.
    pub fn merged_with_headers(&self, headers: &HeaderMap) -> Metadata {
        let mut merged = self.clone();
        for name in headers.keys() {
            let values = headers
                .get_all(name)
                .iter()
                .map(|v| Bytes::copy_from_slice(v.as_bytes()));
            merged.set(name.as_str(), values);
        }
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: AsRef<str>,
    V: Into<Bytes>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut md = Metadata::new();
        for (k, v) in iter {
            md.append(k.as_ref(), v);
        }
        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut md = Metadata::new();
        md.append("Trace-Id", "abc");
        assert_eq!(md.get("trace-id"), [Bytes::from_static(b"abc")]);
        assert_eq!(md.get_first("TRACE-ID"), Some("abc"));
        assert!(md.get("missing").is_empty());
    }

    #[test]
    fn test_merge_keeps_existing_and_adds_headers() {
        let existing: Metadata = [("b", "2")].into_iter().collect();
        let mut headers = HeaderMap::new();
        headers.insert("a", HeaderValue::from_static("1"));

        let merged = existing.merged_with_headers(&headers);
        assert_eq!(merged.get_first("a"), Some("1"));
        assert_eq!(merged.get_first("b"), Some("2"));
        // source untouched
        assert!(!existing.contains_key("a"));
    }

    #[test]
    fn test_merge_header_overwrites_same_key() {
        let existing: Metadata = [("b", "2"), ("b", "3"), ("c", "keep")].into_iter().collect();
        let mut headers = HeaderMap::new();
        headers.insert("B", HeaderValue::from_static("override"));

        let merged = existing.merged_with_headers(&headers);
        assert_eq!(merged.get_all_str("b").collect::<Vec<_>>(), ["override"]);
        assert_eq!(merged.get_first("c"), Some("keep"));
    }

    #[test]
    fn test_merge_keeps_all_values_of_repeated_header() {
        let mut headers = HeaderMap::new();
        headers.append("x-hop", HeaderValue::from_static("one"));
        headers.append("x-hop", HeaderValue::from_static("two"));

        let merged = Metadata::new().merged_with_headers(&headers);
        assert_eq!(merged.get_all_str("x-hop").collect::<Vec<_>>(), ["one", "two"]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_non_utf8_header_value_kept_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert("x-raw", HeaderValue::from_bytes(b"caf\xe9").unwrap());

        let merged = Metadata::new().merged_with_headers(&headers);
        assert_eq!(merged.get_first_bytes("x-raw"), Some(&b"caf\xe9"[..]));
        assert_eq!(merged.get_first("x-raw"), None);
    }
}
