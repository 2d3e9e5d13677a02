//! Speed and lane attributes of a way.
//!
//! Explicit `maxspeed` / `lanes` tags win.  Otherwise the speed falls back to
//! a per-`highway` default and then to a global fallback; lanes fall back to
//! a fixed default.
//!
//! Speeds are configured in km/h (the OSM unit) and reported in **m/s**.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use osmg_core::Tags;

use crate::Direction;

/// Speed assumed for `maxspeed=walk`.
const WALK_KMH: f64 = 6.0;
const MPH_TO_KMH: f64 = 1.609344;
const KNOTS_TO_KMH: f64 = 1.852;

// ── SpeedValue ────────────────────────────────────────────────────────────────

/// A parsed `maxspeed` value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SpeedValue {
    Kmh(f64),
    Mph(f64),
    Knots(f64),
    /// `maxspeed=none` — no posted limit.
    Unlimited,
    /// `maxspeed=walk`.
    Walk,
}

impl SpeedValue {
    /// Parse a `maxspeed` value.  Only the first of `;`-separated values is
    /// considered.  Returns `None` for zone codes (`DE:urban`) and garbage.
    pub fn parse(raw: &str) -> Option<SpeedValue> {
        let first = raw.split(';').next()?.trim();
        match first {
            "none" => return Some(SpeedValue::Unlimited),
            "walk" => return Some(SpeedValue::Walk),
            _ => {}
        }

        let (number, unit) = match first.find(|c: char| c.is_ascii_alphabetic()) {
            Some(i) => (first[..i].trim(), first[i..].trim()),
            None    => (first, ""),
        };
        let n: f64 = number.parse().ok().filter(|n: &f64| n.is_finite() && *n > 0.0)?;

        match unit {
            ""             => Some(SpeedValue::Kmh(n)),
            "km/h" | "kmh" => Some(SpeedValue::Kmh(n)),
            "mph"          => Some(SpeedValue::Mph(n)),
            "knots"        => Some(SpeedValue::Knots(n)),
            _              => None,
        }
    }

    /// Speed in km/h, or `None` when the value states no limit.
    pub fn in_kmh(self) -> Option<f64> {
        match self {
            SpeedValue::Kmh(v)    => Some(v),
            SpeedValue::Mph(v)    => Some(v * MPH_TO_KMH),
            SpeedValue::Knots(v)  => Some(v * KNOTS_TO_KMH),
            SpeedValue::Walk      => Some(WALK_KMH),
            SpeedValue::Unlimited => None,
        }
    }
}

impl fmt::Display for SpeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedValue::Kmh(v)    => write!(f, "{v}"),
            SpeedValue::Mph(v)    => write!(f, "{v} mph"),
            SpeedValue::Knots(v)  => write!(f, "{v} knots"),
            SpeedValue::Unlimited => f.write_str("none"),
            SpeedValue::Walk      => f.write_str("walk"),
        }
    }
}

// ── Lanes ─────────────────────────────────────────────────────────────────────

/// Lane counts for travel along (`forward`) and against (`backward`) the
/// node order of a way.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DirectionalLanes {
    pub forward:  u16,
    pub backward: u16,
}

fn parse_count(tags: &Tags, key: &str) -> Option<u16> {
    tags.get(key)?
        .split(';')
        .next()?
        .trim()
        .parse::<u16>()
        .ok()
        .filter(|&n| n > 0)
}

// ── RoadDefaults ──────────────────────────────────────────────────────────────

/// Fallback speeds and lane counts.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoadDefaults {
    /// Default speed per `highway` value, km/h.
    pub speeds_kmh:         FxHashMap<String, f64>,
    /// Speed for ways with neither `maxspeed` nor a listed `highway` value.
    pub fallback_speed_kmh: f64,
    /// Lanes per direction when untagged.
    pub lanes:              u16,
}

impl Default for RoadDefaults {
    /// Conservative urban defaults per road class.
    fn default() -> Self {
        let speeds_kmh = [
            ("motorway", 105.0),
            ("motorway_link", 105.0),
            ("trunk", 89.0),
            ("trunk_link", 89.0),
            ("primary", 72.0),
            ("primary_link", 72.0),
            ("secondary", 64.0),
            ("secondary_link", 64.0),
            ("tertiary", 48.0),
            ("tertiary_link", 48.0),
            ("residential", 32.0),
            ("living_street", 10.0),
            ("service", 24.0),
            ("unclassified", 24.0),
            ("footway", WALK_KMH),
            ("pedestrian", WALK_KMH),
            ("steps", WALK_KMH),
            ("path", WALK_KMH),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self { speeds_kmh, fallback_speed_kmh: 32.0, lanes: 1 }
    }
}

impl RoadDefaults {
    /// Maximum allowed speed in m/s.
    pub fn max_speed_mps(&self, tags: &Tags) -> f64 {
        let posted = tags.get("maxspeed").and_then(|raw| {
            let parsed = SpeedValue::parse(raw);
            if parsed.is_none() {
                log::debug!("ignoring unparseable maxspeed={raw:?}");
            }
            parsed
        });

        let kmh = posted
            .and_then(SpeedValue::in_kmh)
            .or_else(|| {
                tags.get("highway")
                    .and_then(|hw| self.speeds_kmh.get(hw).copied())
            })
            .unwrap_or(self.fallback_speed_kmh);
        kmh / 3.6
    }

    /// Lanes per travel direction.
    ///
    /// One-way roads put all of `lanes` on the travelled side.  Two-way roads
    /// use `lanes:forward` / `lanes:backward` when present and otherwise split
    /// `lanes`, giving the odd lane to the backward side.
    pub fn lanes(&self, tags: &Tags, direction: Direction) -> DirectionalLanes {
        let total = parse_count(tags, "lanes");
        let default = self.lanes.max(1);

        match direction {
            Direction::Forward => DirectionalLanes {
                forward:  total.unwrap_or(default),
                backward: default,
            },
            Direction::Backward => DirectionalLanes {
                forward:  default,
                backward: total.unwrap_or(default),
            },
            Direction::Both => {
                let forward = parse_count(tags, "lanes:forward")
                    .or_else(|| total.map(|t| (t / 2).max(1)))
                    .unwrap_or(default);
                let backward = parse_count(tags, "lanes:backward")
                    .or_else(|| total.map(|t| t.saturating_sub(forward).max(1)))
                    .unwrap_or(default);
                DirectionalLanes { forward, backward }
            }
        }
    }
}
