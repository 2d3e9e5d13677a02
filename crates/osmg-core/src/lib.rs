//! `osmg-core` — foundational types for the `osmg` OSM graph importer.
//!
//! This crate is a dependency of every other `osmg-*` crate.  It has no
//! `osmg-*` dependencies and only small external ones (`bitflags`,
//! `rustc-hash`, `thiserror`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `OsmId`, `NodeId`, `EdgeId`, `WayUid`                     |
//! | [`geo`]         | `GeoPoint`                                                |
//! | [`transport`]   | `TransportMode`, `TransportModes`                         |
//! | [`tags`]        | `Tags` — an element's read-only key/value set             |
//! | [`element`]     | `OsmNode`, `OsmWay`, `OsmRelation`, `OsmElement`, builders |
//! | [`consumer`]    | `ElementConsumer` — receiver of completed elements        |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |

pub mod consumer;
pub mod element;
pub mod error;
pub mod geo;
pub mod ids;
pub mod tags;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use consumer::ElementConsumer;
pub use element::{
    ElementKind, NodeBuilder, OsmElement, OsmNode, OsmRelation, OsmWay,
    RelationBuilder, WayBuilder,
};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId, OsmId, WayUid};
pub use tags::Tags;
pub use transport::{TransportMode, TransportModes};
