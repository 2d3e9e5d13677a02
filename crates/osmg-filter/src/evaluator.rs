//! Tag evaluators.
//!
//! # Semantics of [`InclExclTagEvaluator`]
//!
//! Every tag `(k, v)` of the element is checked against four mappings:
//!
//! | Section         | Effect of a match                                        |
//! |-----------------|----------------------------------------------------------|
//! | `exclude`       | reject immediately                                       |
//! | `excludeUnless` | reject immediately, unless *any* tag matches `unless`    |
//! | `include`       | remember that the element is wanted, keep scanning       |
//!
//! After the scan the element is accepted only if some tag matched
//! `include`.  An empty tag set is therefore always rejected.
//!
//! # Configuration
//!
//! ```yaml
//! include:
//!   highway: [trunk, primary]
//! excludeUnless:
//!   access: "no"
//! unless:
//!   motor_vehicle: "yes"
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use osmg_core::Tags;

use crate::{FilterError, FilterResult, TagMapping};

/// Pure predicate over a tag set.
pub trait TagEvaluator: Send + Sync {
    fn test(&self, tags: &Tags) -> bool;
}

// ── InclExclTagEvaluator ──────────────────────────────────────────────────────

/// Include/exclude evaluator.  Immutable after construction.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InclExclTagEvaluator {
    #[serde(default)]
    include:        TagMapping,
    #[serde(default)]
    exclude:        TagMapping,
    #[serde(default)]
    exclude_unless: TagMapping,
    #[serde(default)]
    unless:         TagMapping,
}

impl InclExclTagEvaluator {
    /// An evaluator with four empty sections.  Rejects everything until an
    /// `include` entry is added.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.include.insert(key, values);
        self
    }

    pub fn exclude<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.exclude.insert(key, values);
        self
    }

    pub fn exclude_unless<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.exclude_unless.insert(key, values);
        self
    }

    pub fn unless<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.unless.insert(key, values);
        self
    }

    pub fn from_yaml_str(s: &str) -> FilterResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }
}

impl TagEvaluator for InclExclTagEvaluator {
    fn test(&self, tags: &Tags) -> bool {
        let mut included = false;
        // Lazily computed: does any tag of the element match `unless`?
        let mut waived: Option<bool> = None;

        for (key, value) in tags.iter() {
            if self.exclude.matches(key, value) {
                return false;
            }
            if self.exclude_unless.matches(key, value)
                && !*waived.get_or_insert_with(|| self.unless.matches_any(tags))
            {
                return false;
            }
            if self.include.matches(key, value) {
                included = true;
            }
        }
        included
    }
}

impl<T: TagEvaluator + ?Sized> TagEvaluator for Box<T> {
    fn test(&self, tags: &Tags) -> bool {
        (**self).test(tags)
    }
}

// ── EvaluatorSet ──────────────────────────────────────────────────────────────

/// Named evaluators loaded from one YAML document:
///
/// ```yaml
/// test1:
///   include: { highway: [trunk] }
/// test3:
///   include: {}
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct EvaluatorSet(BTreeMap<String, InclExclTagEvaluator>);

impl EvaluatorSet {
    pub fn from_yaml_str(s: &str) -> FilterResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> FilterResult<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> FilterResult<Self> {
        let file = std::fs::File::open(path)?;
        let set = Self::from_reader(file)?;
        log::debug!("loaded {} tag evaluators from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn get(&self, name: &str) -> FilterResult<&InclExclTagEvaluator> {
        self.0
            .get(name)
            .ok_or_else(|| FilterError::MissingEvaluator(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
