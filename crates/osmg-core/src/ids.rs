//! Strongly typed identifier wrappers.
//!
//! [`OsmId`] is the identity an element carries in the source extract.  OSM
//! ids are 64-bit and may be negative (unsaved editor objects), so it wraps
//! an `i64`.
//!
//! The graph-side ids ([`NodeId`], [`EdgeId`], [`WayUid`]) are dense indices
//! assigned by the importer.  They are `Copy + Ord + Hash` so they can be used
//! as map keys and sorted collection elements without ceremony.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Permanent index of a node in the assembled graph.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed edge in the assembled graph.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Importer-assigned unique id of an imported way, shared by all of its
    /// edges in both directions.
    ///
    /// `WayUid::INVALID` doubles as the "no opposite edge" marker.
    pub struct WayUid(u32);
}

// ── OsmId ─────────────────────────────────────────────────────────────────────

/// Identity of a node, way, or relation in the OSM source.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct OsmId(pub i64);

impl fmt::Display for OsmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OsmId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(OsmId)
    }
}

impl From<i64> for OsmId {
    #[inline]
    fn from(id: i64) -> Self {
        OsmId(id)
    }
}
