//! `osmg-graph` — turns filtered OSM ways into a directed multigraph.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`node`]      | `InternalNode`, `NodeIndex` (OSM id → permanent `NodeId`)       |
//! | [`edge`]      | `InternalEdgeBuilder`, `InternalEdge`, `AttrValue`, attribute keys |
//! | [`assembler`] | `GraphAssembler` (an `ElementConsumer`), `GraphParts`, stats    |
//! | [`checksum`]  | `checksum` — 8-hex-digit source fingerprint                     |
//! | [`cache`]     | checksum stamp files next to a cached graph                     |
//! | [`import`]    | `import_file` — checksum, parse, assemble                        |
//! | [`error`]     | `GraphError`, `GraphResult<T>`                                  |
//!
//! # Data flow
//!
//! ```text
//! bytes → osmg_xml → OsmElement → GraphAssembler ─┬─ create_node(InternalNode) → N
//!                                                 └─ create_edge(InternalEdge) → E
//! ```
//!
//! The final graph type is the caller's.  This crate only knows the two
//! construction functions it is handed.

pub mod assembler;
pub mod cache;
pub mod checksum;
pub mod edge;
pub mod error;
pub mod import;
pub mod node;

#[cfg(test)]
mod tests;

pub use assembler::{AssemblyStats, GraphAssembler, GraphParts};
pub use cache::{cache_is_valid, read_stamp, stamp_path, write_stamp};
pub use checksum::{checksum, checksum_reader, CHECKSUM_LEN};
pub use edge::{AttrValue, EdgeAttributes, InternalEdge, InternalEdgeBuilder};
pub use error::{GraphError, GraphResult};
pub use import::{import_file, ImportedGraph};
pub use node::{InternalNode, NodeIndex};
