//! Attribute map of a single start tag.

use std::str::FromStr;

use osmg_core::OsmId;

use crate::{XmlError, XmlResult};

/// Attributes in document order.  OSM tags carry a handful of attributes,
/// so lookup is a linear scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attrs(Vec<(String, String)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The attribute value, or the empty string when absent.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn required(&self, element: &str, key: &'static str) -> XmlResult<&str> {
        self.get(key).ok_or_else(|| XmlError::MissingAttribute {
            element:   element.to_string(),
            attribute: key,
        })
    }

    /// Parse a required numeric attribute.
    pub fn number<T: FromStr>(&self, element: &str, key: &'static str) -> XmlResult<T> {
        let raw = self.required(element, key)?;
        raw.trim().parse::<T>().map_err(|_| XmlError::InvalidNumber {
            element:   element.to_string(),
            attribute: key,
            value:     raw.to_string(),
        })
    }

    /// Parse a required id-valued attribute (`id`, `ref`).
    pub fn osm_id(&self, element: &str, key: &'static str) -> XmlResult<OsmId> {
        self.number::<i64>(element, key).map(OsmId)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attrs(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
