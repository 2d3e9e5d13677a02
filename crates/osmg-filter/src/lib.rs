//! `osmg-filter` — decides which OSM elements are routing relevant.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`mapping`]   | `TagMapping` — key → accepted values, with `"*"` wildcard     |
//! | [`evaluator`] | `TagEvaluator` trait, `InclExclTagEvaluator`, `EvaluatorSet` |
//! | [`direction`] | `Direction`, `DirectionPolicy`, `TagDirectionPolicy`         |
//! | [`road`]      | `RoadDefaults` — `maxspeed` / `lanes` parsing and fallbacks   |
//! | [`profile`]   | `ImportProfile` — the complete YAML-loaded import config     |
//! | [`error`]     | `FilterError`, `FilterResult<T>`                             |
//!
//! Every type here is immutable once constructed, so one profile can be
//! shared (e.g. behind an `Arc`) by any number of concurrent imports.

pub mod direction;
pub mod error;
pub mod evaluator;
pub mod mapping;
pub mod profile;
pub mod road;


pub use direction::{AlwaysBoth, Direction, DirectionPolicy, TagDirectionPolicy};
pub use error::{FilterError, FilterResult};
pub use evaluator::{EvaluatorSet, InclExclTagEvaluator, TagEvaluator};
pub use mapping::{TagMapping, WILDCARD};
pub use profile::ImportProfile;
pub use road::{DirectionalLanes, RoadDefaults, SpeedValue};
