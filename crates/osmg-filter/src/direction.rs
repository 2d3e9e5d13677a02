//! Travel direction of a way.
//!
//! Whether a way yields edges in one or both directions is a pluggable
//! [`DirectionPolicy`].  The stock [`TagDirectionPolicy`] decides with two
//! tag evaluators, so the one-way vocabulary lives in configuration:
//!
//! ```yaml
//! oneway:
//!   include: { oneway: ["yes", "true", "1"], junction: [roundabout] }
//!   exclude: { oneway: ["no"] }
//! reverse:
//!   include: { oneway: ["-1", reverse] }
//! bidirectional_modes: [walk]
//! ```
//!
//! Modes in `bidirectional_modes` ignore one-way restrictions: a one-way
//! street still gets a contra-flow edge restricted to those modes.

use osmg_core::{Tags, TransportModes};

use crate::{InclExclTagEvaluator, TagEvaluator};

/// Which way(s) along its node sequence a way may be travelled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Both along and against the node order.
    Both,
    /// Along the node order only.
    Forward,
    /// Against the node order only (`oneway=-1`).
    Backward,
}

impl Direction {
    #[inline]
    pub fn is_oneway(self) -> bool {
        !matches!(self, Direction::Both)
    }
}

/// Pluggable bidirectionality rule.
pub trait DirectionPolicy: Send + Sync {
    fn direction(&self, tags: &Tags) -> Direction;

    /// Modes allowed against a one-way restriction.  Empty by default.
    fn bidirectional_modes(&self) -> TransportModes {
        TransportModes::empty()
    }
}

/// Every way is two-way.  Useful for pedestrian-only graphs.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysBoth;

impl DirectionPolicy for AlwaysBoth {
    fn direction(&self, _tags: &Tags) -> Direction {
        Direction::Both
    }
}

/// Direction from two evaluators: `reverse` is checked first, then `oneway`.
#[derive(Clone, Debug)]
pub struct TagDirectionPolicy {
    oneway:              InclExclTagEvaluator,
    reverse:             InclExclTagEvaluator,
    bidirectional_modes: TransportModes,
}

impl TagDirectionPolicy {
    pub fn new(
        oneway: InclExclTagEvaluator,
        reverse: InclExclTagEvaluator,
        bidirectional_modes: TransportModes,
    ) -> Self {
        Self { oneway, reverse, bidirectional_modes }
    }
}

impl Default for TagDirectionPolicy {
    /// OSM convention: explicit `oneway=yes|true|1`, roundabouts, and
    /// motorways are one-way unless tagged `oneway=no`; `oneway=-1` is
    /// one-way against the node order.  Pedestrians may walk both ways.
    fn default() -> Self {
        let oneway = InclExclTagEvaluator::new()
            .include("oneway", ["yes", "true", "1"])
            .include("junction", ["roundabout", "circular"])
            .include("highway", ["motorway", "motorway_link"])
            .exclude("oneway", ["no", "false", "0"]);
        let reverse = InclExclTagEvaluator::new().include("oneway", ["-1", "reverse"]);
        Self::new(oneway, reverse, TransportModes::WALK)
    }
}

impl DirectionPolicy for TagDirectionPolicy {
    fn direction(&self, tags: &Tags) -> Direction {
        if self.reverse.test(tags) {
            Direction::Backward
        } else if self.oneway.test(tags) {
            Direction::Forward
        } else {
            Direction::Both
        }
    }

    fn bidirectional_modes(&self) -> TransportModes {
        self.bidirectional_modes
    }
}
