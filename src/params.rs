//! Captured path parameters and query string parsing.
//!
//! - [`RouteParams`]: values captured by `:name` segments and named
//!   catch-alls when a pattern matches (e.g. `id` in `/users/:id`).
//! - [`QueryParams`]: the `?key=value&...` part of a location, split off by
//!   [`Location::parse`](crate::Location::parse) before resolution.
//!
//! # Example
//!
//! ```
//! use route_table::{RouteParams, QueryParams};
//!
//! let mut params = RouteParams::new();
//! params.insert("id", "42");
//! assert_eq!(params.get_as::<u32>("id"), Some(42));
//!
//! let query = QueryParams::from_query_string("page=1&sort=name");
//! assert_eq!(query.get_as::<u32>("page"), Some(1));
//! assert_eq!(query.get("sort"), Some("name"));
//! ```

use std::collections::HashMap;

/// Parameters captured from path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// No captures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value captured for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Captured value parsed into `T`.
    ///
    /// `None` when the key is absent or the value does not parse.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Set `key`, replacing any earlier capture.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over all `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Query parameters parsed from a query string.
///
/// Keys may repeat (`?tag=a&tag=b`); insertion order of keys is kept so
/// [`to_query_string`](Self::to_query_string) is stable.
///
/// # Example
///
/// ```
/// use route_table::QueryParams;
///
/// let query = QueryParams::from_query_string("tag=rust&tag=router&q=a%20b");
/// assert_eq!(query.get_all("tag"), ["rust", "router"]);
/// assert_eq!(query.get("q"), Some("a b"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a query string, with or without the leading `?`.
    ///
    /// A key without `=` is kept with an empty value.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_uri_component(key), decode_uri_component(value))
            })
            .collect();

        Self { pairs }
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get all values for a key, in the order they appeared.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Get the first value for a key, parsed as type `T`.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Append a value; existing values for the key are kept.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Serialize back into a query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    encode_uri_component(key),
                    encode_uri_component(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of `key=value` pairs, counting repeated keys.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub(crate) fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Decode `%XX` escapes and `+`; malformed escapes are kept verbatim.
fn decode_uri_component(s: &str) -> String {
    percent_decode(s, true)
}

/// Decode `%XX` escapes in a path segment. `+` is literal in paths.
pub(crate) fn decode_path_segment(s: &str) -> String {
    percent_decode(s, false)
}

fn percent_decode(s: &str, plus_as_space: bool) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let decoded = s
                    .get(i + 1..i + 3)
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = decoded {
                    out.push(byte);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_params_lookup_and_parse() {
        let mut params = RouteParams::new();
        params.insert("id", "123");

        assert_eq!(params.get("id"), Some("123"));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
        assert_eq!(params.get_as::<i32>("id"), Some(123));
        assert_eq!(params.get_as::<i32>("missing"), None);
    }

    #[test]
    fn test_route_params_from_iter() {
        let params: RouteParams = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.iter().count(), 2);
        assert_eq!(params.get("b"), Some("2"));
    }

    #[test]
    fn test_repeated_query_keys_keep_order() {
        let query = QueryParams::from_query_string("tag=rust&tag=router&tag=ui");

        assert_eq!(query.get_all("tag"), vec!["rust", "router", "ui"]);
        assert_eq!(query.get("tag"), Some("rust"));
        assert_eq!(query.len(), 3);
    }

    #[test]
    fn test_query_params_leading_question_mark_and_bare_key() {
        let query = QueryParams::from_query_string("?debug&page=2");
        assert!(query.contains("debug"));
        assert_eq!(query.get("debug"), Some(""));
        assert_eq!(query.get_as::<u32>("page"), Some(2));
    }

    #[test]
    fn test_uri_encoding_multibyte() {
        assert_eq!(encode_uri_component("hello world"), "hello%20world");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
        assert_eq!(decode_uri_component("%C3%A9"), "é");
    }

    #[test]
    fn test_uri_decoding() {
        assert_eq!(decode_uri_component("hello%20world"), "hello world");
        assert_eq!(decode_uri_component("hello+world"), "hello world");
        assert_eq!(decode_uri_component("100%"), "100%");
        assert_eq!(decode_uri_component("%zz"), "%zz");
    }

    #[test]
    fn test_path_segment_decoding_keeps_plus() {
        assert_eq!(decode_path_segment("a+b"), "a+b");
        assert_eq!(decode_path_segment("a%2Fb"), "a/b");
        assert_eq!(decode_path_segment("%E2%9C%93"), "✓");
    }

    #[test]
    fn test_to_query_string_keeps_order() {
        let mut query = QueryParams::new();
        query.insert("page", "1");
        query.insert("q", "a b");
        assert_eq!(query.to_query_string(), "page=1&q=a%20b");
    }

    #[test]
    fn test_blank_query_string_has_no_pairs() {
        assert!(QueryParams::from_query_string("").is_empty());
        assert!(QueryParams::from_query_string("?").is_empty());
    }
}
