//! Directed edges: the in-progress builder and the finalized edge.
//!
//! # Lifecycle
//!
//! 1. [`InternalEdgeBuilder`] — endpoints are still OSM node ids (temporary),
//!    attributes may still grow ([`add_modes`](InternalEdgeBuilder::add_modes)).
//! 2. [`InternalEdge`] — endpoints are permanent [`NodeId`]s and every
//!    attribute is also exposed through the [`EdgeAttributes`] map handed to
//!    the caller's edge construction function.
//!
//! # Equality
//!
//! Two builders are equal when way id, lane count, mode set, and max speed
//! are equal.  Endpoints and unique ids do not take part: the assembler only
//! compares builders already known to join the same ordered node pair.

use std::collections::BTreeMap;
use std::fmt;

use osmg_core::{EdgeId, NodeId, OsmId, TransportModes, WayUid};

/// Keys always present in [`InternalEdge::attributes`].
pub mod keys {
    pub const WAY_ID:        &str = "way_id";
    pub const UNIQUE_WAY_ID: &str = "unique_way_id";
    pub const OPPOSITE_ID:   &str = "opposite_unique_way_id";
    pub const MODES:         &str = "modes";
    pub const MAX_SPEED:     &str = "max_speed";
    pub const LANES:         &str = "lanes";
}

// ── Attribute values ──────────────────────────────────────────────────────────

/// Value in an edge's open-ended attribute map.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Text(String),
    Modes(TransportModes),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(v)   => write!(f, "{v}"),
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Text(v)  => f.write_str(v),
            AttrValue::Modes(m) => write!(f, "{m}"),
        }
    }
}

pub type EdgeAttributes = BTreeMap<String, AttrValue>;

// ── InternalEdgeBuilder ───────────────────────────────────────────────────────

/// One directed segment of a way, before node ids are resolved.
#[derive(Clone, Debug)]
pub struct InternalEdgeBuilder {
    from:      OsmId,
    to:        OsmId,
    way_id:    OsmId,
    way_uid:   WayUid,
    opposite:  WayUid,
    length:    f64,
    modes:     TransportModes,
    max_speed: f64,
    lanes:     u16,
    extra:     EdgeAttributes,
}

impl InternalEdgeBuilder {
    /// A segment `from → to` of way `way_id` with no opposite, no modes,
    /// zero length and speed, and one lane.
    pub fn new(from: OsmId, to: OsmId, way_id: OsmId, way_uid: WayUid) -> Self {
        Self {
            from,
            to,
            way_id,
            way_uid,
            opposite:  WayUid::INVALID,
            length:    0.0,
            modes:     TransportModes::empty(),
            max_speed: 0.0,
            lanes:     1,
            extra:     EdgeAttributes::new(),
        }
    }

    pub fn with_opposite(mut self, opposite: WayUid) -> Self {
        self.opposite = opposite;
        self
    }

    /// Length in the caller's unit (metres for the stock length functions).
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_modes(mut self, modes: TransportModes) -> Self {
        self.modes = modes;
        self
    }

    /// Maximum allowed speed in m/s.
    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_lanes(mut self, lanes: u16) -> Self {
        self.lanes = lanes;
        self
    }

    /// Attach an additional attribute.  Standard keys set at build time win
    /// over extra attributes of the same name.
    pub fn with_attr(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Widen the mode set.  Modes are never removed.
    pub fn add_modes(&mut self, modes: TransportModes) {
        self.modes |= modes;
    }

    pub fn from(&self) -> OsmId { self.from }
    pub fn to(&self) -> OsmId { self.to }
    pub fn way_id(&self) -> OsmId { self.way_id }
    pub fn way_uid(&self) -> WayUid { self.way_uid }
    pub fn opposite(&self) -> WayUid { self.opposite }
    pub fn length(&self) -> f64 { self.length }
    pub fn modes(&self) -> TransportModes { self.modes }
    pub fn max_speed(&self) -> f64 { self.max_speed }
    pub fn lanes(&self) -> u16 { self.lanes }

    pub fn has_opposite(&self) -> bool {
        self.opposite.is_valid()
    }

    /// Finalize with permanent endpoint ids.
    pub fn build(self, id: EdgeId, from: NodeId, to: NodeId) -> InternalEdge {
        let mut attributes = self.extra;
        attributes.insert(keys::WAY_ID.into(), AttrValue::Int(self.way_id.0));
        attributes.insert(keys::UNIQUE_WAY_ID.into(), AttrValue::Int(i64::from(self.way_uid.0)));
        attributes.insert(keys::OPPOSITE_ID.into(), AttrValue::Int(i64::from(self.opposite.0)));
        attributes.insert(keys::MODES.into(), AttrValue::Modes(self.modes));
        attributes.insert(keys::MAX_SPEED.into(), AttrValue::Float(self.max_speed));
        attributes.insert(keys::LANES.into(), AttrValue::Int(i64::from(self.lanes)));

        InternalEdge {
            id,
            from,
            to,
            length:    self.length,
            way_id:    self.way_id,
            way_uid:   self.way_uid,
            opposite:  self.opposite,
            modes:     self.modes,
            max_speed: self.max_speed,
            lanes:     self.lanes,
            attributes,
        }
    }
}

impl PartialEq for InternalEdgeBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.way_id == other.way_id
            && self.lanes == other.lanes
            && self.modes == other.modes
            && self.max_speed == other.max_speed
    }
}

// ── InternalEdge ──────────────────────────────────────────────────────────────

/// Input to the caller's edge construction function.
#[derive(Clone, Debug, PartialEq)]
pub struct InternalEdge {
    pub id:         EdgeId,
    pub from:       NodeId,
    pub to:         NodeId,
    pub length:     f64,
    pub way_id:     OsmId,
    pub way_uid:    WayUid,
    /// `WayUid::INVALID` when the edge has no reverse counterpart.
    pub opposite:   WayUid,
    pub modes:      TransportModes,
    /// m/s.
    pub max_speed:  f64,
    pub lanes:      u16,
    /// The typed fields above under their [`keys`], plus any extra attributes.
    pub attributes: EdgeAttributes,
}
