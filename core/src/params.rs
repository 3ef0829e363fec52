//! Ordered string parameter set sent with every request.
//!
//! # Design
//! Keys are unique and kept sorted (`BTreeMap`), so the encoded query string
//! or form body is deterministic for a given set of inputs. Inserting an
//! existing key overwrites it.
//!
//! The `insert_*` helpers encode the "meaningfully provided" rules shared by
//! every endpoint: ids only when positive, strings only when not blank, lists
//! comma-joined and omitted when empty.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Parameters for a single request, keyed by their wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unconditionally. Last write wins.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Insert a numeric identifier if it is present and greater than zero.
    pub fn insert_id(&mut self, key: &str, id: Option<u64>) {
        if let Some(id) = id.filter(|id| *id > 0) {
            self.insert(key, id.to_string());
        }
    }

    /// Insert a string if it is present and not empty or whitespace-only.
    pub fn insert_text(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.insert(key, value);
        }
    }

    /// Insert a boolean as lowercase `true`/`false`, the only spelling the
    /// API accepts.
    pub fn insert_flag(&mut self, key: &str, value: bool) {
        self.insert(key, value.to_string());
    }

    /// Comma-join `items` under `key`. An empty slice leaves the key out.
    pub fn insert_joined<T: Display>(&mut self, key: &str, items: &[T]) {
        if items.is_empty() {
            return;
        }
        let joined = items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.insert(key, joined);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` encoding, used for both query
    /// strings and POST bodies.
    pub fn to_form(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut params = Params::new();
        params.insert("count", "20");
        params.insert("count", "200");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("count"), Some("200"));
    }

    #[test]
    fn ids_must_be_positive() {
        let mut params = Params::new();
        params.insert_id("since_id", Some(0));
        params.insert_id("max_id", None);
        params.insert_id("list_id", Some(42));
        assert!(!params.contains_key("since_id"));
        assert!(!params.contains_key("max_id"));
        assert_eq!(params.get("list_id"), Some("42"));
    }

    #[test]
    fn blank_text_is_omitted() {
        let mut params = Params::new();
        params.insert_text("slug", Some(""));
        params.insert_text("screen_name", Some("   \t"));
        params.insert_text("owner_screen_name", None);
        assert!(params.is_empty());

        params.insert_text("slug", Some(" tech "));
        assert_eq!(params.get("slug"), Some(" tech "));
    }

    #[test]
    fn flags_are_always_sent_in_lowercase() {
        let mut params = Params::new();
        params.insert_flag("include_rts", true);
        params.insert_flag("skip_status", false);
        assert_eq!(params.get("include_rts"), Some("true"));
        assert_eq!(params.get("skip_status"), Some("false"));
        assert_eq!(params.to_form(), "include_rts=true&skip_status=false");
    }

    #[test]
    fn joined_lists_have_no_trailing_separator() {
        let mut params = Params::new();
        params.insert_joined("user_id", &[1u64, 2, 3]);
        params.insert_joined("screen_name", &["alice"]);
        let value = params.get("user_id").unwrap();
        assert_eq!(value, "1,2,3");
        assert_eq!(value.matches(',').count(), 2);
        assert_eq!(params.get("screen_name"), Some("alice"));
    }

    #[test]
    fn empty_list_is_omitted() {
        let mut params = Params::new();
        params.insert_joined::<u64>("user_id", &[]);
        assert!(!params.contains_key("user_id"));
    }

    #[test]
    fn form_encoding_is_sorted_and_escaped() {
        let params: Params = [("slug", "rust lang"), ("count", "20"), ("q", "a&b")]
            .into_iter()
            .collect();
        assert_eq!(params.to_form(), "count=20&q=a%26b&slug=rust+lang");
    }
}
