//! Import profile: everything graph assembly needs to classify a way.
//!
//! # YAML format
//!
//! ```yaml
//! modes:
//!   car:
//!     include: { highway: [primary, residential] }
//!     excludeUnless: { access: ["no", private] }
//!     unless: { motor_vehicle: ["yes", designated] }
//!   walk:
//!     include: { highway: "*" }
//!     exclude: { foot: ["no"], highway: [motorway] }
//! direction:            # optional, see `TagDirectionPolicy::default`
//!   oneway:  { include: { oneway: ["yes"] } }
//!   reverse: { include: { oneway: ["-1"] } }
//!   bidirectional_modes: [walk]
//! defaults:             # optional, see `RoadDefaults::default`
//!   fallback_speed_kmh: 30
//!   lanes: 1
//! ```
//!
//! A way is relevant iff at least one mode evaluator accepts it.  Quote YAML
//! values such as `"no"`, `"yes"`, and numbers so they stay strings.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use osmg_core::{Tags, TransportMode, TransportModes};

use crate::direction::{Direction, DirectionPolicy, TagDirectionPolicy};
use crate::{FilterError, FilterResult, InclExclTagEvaluator, RoadDefaults, TagEvaluator};

// ── Document shape ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileDocument {
    modes:     BTreeMap<String, InclExclTagEvaluator>,
    #[serde(default)]
    direction: Option<DirectionDocument>,
    #[serde(default)]
    defaults:  RoadDefaults,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DirectionDocument {
    oneway:              InclExclTagEvaluator,
    #[serde(default)]
    reverse:             InclExclTagEvaluator,
    #[serde(default)]
    bidirectional_modes: Vec<String>,
}

fn parse_modes<'a>(names: impl IntoIterator<Item = &'a str>) -> FilterResult<TransportModes> {
    names
        .into_iter()
        .map(|name| name.parse::<TransportMode>().map_err(FilterError::from))
        .collect()
}

// ── ImportProfile ─────────────────────────────────────────────────────────────

/// Per-mode evaluators, direction policy, and road defaults.
///
/// Immutable after construction; share one instance between imports with
/// `Arc<ImportProfile>`.
pub struct ImportProfile {
    modes:     Vec<(TransportMode, Box<dyn TagEvaluator>)>,
    direction: Box<dyn DirectionPolicy>,
    defaults:  RoadDefaults,
}

impl ImportProfile {
    /// A profile with no modes (accepts nothing), the stock direction policy,
    /// and stock road defaults.
    pub fn new() -> Self {
        Self {
            modes:     Vec::new(),
            direction: Box::new(TagDirectionPolicy::default()),
            defaults:  RoadDefaults::default(),
        }
    }

    /// Register the evaluator deciding whether `mode` may use a way.
    ///
    /// Registering a mode twice keeps both evaluators; either accepting is
    /// enough.
    pub fn with_mode(mut self, mode: TransportMode, evaluator: impl TagEvaluator + 'static) -> Self {
        self.modes.push((mode, Box::new(evaluator)));
        self
    }

    pub fn with_direction(mut self, policy: impl DirectionPolicy + 'static) -> Self {
        self.direction = Box::new(policy);
        self
    }

    pub fn with_defaults(mut self, defaults: RoadDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    // ── Loading ───────────────────────────────────────────────────────────

    pub fn from_yaml_str(s: &str) -> FilterResult<Self> {
        Self::from_document(serde_yaml::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> FilterResult<Self> {
        Self::from_document(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> FilterResult<Self> {
        let file = std::fs::File::open(path)?;
        let profile = Self::from_reader(file)?;
        log::info!(
            "loaded import profile {} (modes: {})",
            path.display(),
            profile.known_modes()
        );
        Ok(profile)
    }

    fn from_document(doc: ProfileDocument) -> FilterResult<Self> {
        if doc.modes.is_empty() {
            return Err(FilterError::Config("profile declares no transport modes".into()));
        }

        let mut profile = Self::new().with_defaults(doc.defaults);
        for (name, evaluator) in doc.modes {
            let mode: TransportMode = name.parse()?;
            profile = profile.with_mode(mode, evaluator);
        }

        if let Some(dir) = doc.direction {
            let bidirectional = parse_modes(dir.bidirectional_modes.iter().map(String::as_str))?;
            profile = profile.with_direction(TagDirectionPolicy::new(
                dir.oneway,
                dir.reverse,
                bidirectional,
            ));
        }
        Ok(profile)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Modes whose evaluator accepts `tags`.  Empty means "not relevant".
    pub fn modes_for(&self, tags: &Tags) -> TransportModes {
        self.modes
            .iter()
            .filter(|(_, evaluator)| evaluator.test(tags))
            .fold(TransportModes::empty(), |set, (mode, _)| set | mode.flag())
    }

    pub fn direction(&self, tags: &Tags) -> Direction {
        self.direction.direction(tags)
    }

    pub fn bidirectional_modes(&self) -> TransportModes {
        self.direction.bidirectional_modes()
    }

    pub fn defaults(&self) -> &RoadDefaults {
        &self.defaults
    }

    /// Every mode that has an evaluator.
    pub fn known_modes(&self) -> TransportModes {
        self.modes.iter().map(|(mode, _)| *mode).collect()
    }
}

impl Default for ImportProfile {
    fn default() -> Self {
        Self::new()
    }
}
