//! The key/value tag set attached to every OSM element.
//!
//! `Tags` has no public mutators.  Values are added while an element is under
//! construction (through the builders in [`element`](crate::element)); once
//! the element is built and handed to a consumer its tags are read-only.

use rustc_hash::FxHashMap;

/// An element's tags.  Keys are unique; iteration order is unspecified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tags(FxHashMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tag.  Only reachable during element construction.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// `true` if the tag `key=value` is present.
    #[inline]
    pub fn has(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Tags(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
