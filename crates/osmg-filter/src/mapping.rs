//! Tag-value mappings: the building block of every evaluator section.
//!
//! A mapping lists, per tag key, the values it accepts.  The value `"*"`
//! accepts anything for that key.  In YAML a key maps to a list of values or
//! to a single value.  Unquoted numbers and booleans are read as their text:
//!
//! ```yaml
//! highway: [primary, secondary]
//! area: "*"
//! oneway: [1, -1]
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

use osmg_core::Tags;

/// Value that matches any value of its key.
pub const WILDCARD: &str = "*";

/// Tag key → set of accepted values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "FxHashMap<String, ValueList>")]
pub struct TagMapping(FxHashMap<String, FxHashSet<String>>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueList {
    One(Scalar),
    Many(Vec<Scalar>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(s)  => s,
            Scalar::Int(n)   => n.to_string(),
            Scalar::Float(x) => x.to_string(),
            Scalar::Bool(b)  => b.to_string(),
        }
    }
}

impl From<FxHashMap<String, ValueList>> for TagMapping {
    fn from(raw: FxHashMap<String, ValueList>) -> Self {
        TagMapping(
            raw.into_iter()
                .map(|(key, values)| {
                    let set = match values {
                        ValueList::One(v)  => FxHashSet::from_iter([String::from(v)]),
                        ValueList::Many(v) => v.into_iter().map(String::from).collect(),
                    };
                    (key, set)
                })
                .collect(),
        )
    }
}

impl TagMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `values` to the accepted set of `key`.
    pub fn insert<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.0
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    /// `true` iff `key` is listed and its set holds `value` or the wildcard.
    #[inline]
    pub fn matches(&self, key: &str, value: &str) -> bool {
        self.0
            .get(key)
            .is_some_and(|values| values.contains(value) || values.contains(WILDCARD))
    }

    /// `true` if any tag in `tags` matches.
    pub fn matches_any(&self, tags: &Tags) -> bool {
        !self.is_empty() && tags.iter().any(|(k, v)| self.matches(k, v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
