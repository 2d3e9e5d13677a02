//! One-call import pipeline: fingerprint, parse, assemble.
//!
//! # Usage
//!
//! ```ignore
//! let profile = Arc::new(ImportProfile::from_path(Path::new("config/profile.yaml"))?);
//! let imported = osmg_graph::import_file(
//!     Path::new("city.osm"),
//!     profile,
//!     haversine_m,
//!     |n| n,
//!     |e| e,
//! )?;
//! ```

use std::path::Path;
use std::sync::Arc;

use osmg_core::GeoPoint;
use osmg_filter::ImportProfile;
use osmg_xml::ParseStats;

use crate::{checksum, GraphAssembler, GraphParts, GraphResult, InternalEdge, InternalNode};

/// Output of [`import_file`].
#[derive(Debug)]
pub struct ImportedGraph<N, E> {
    pub graph:    GraphParts<N, E>,
    /// Fingerprint of the source, for a cache stamp.
    pub checksum: String,
    pub parse:    ParseStats,
}

/// Import the OSM XML file at `path`.
///
/// The source is fingerprinted before any parsing, so an unreadable file
/// fails early.  Any structural parse error aborts the import; no partial
/// graph is returned.
pub fn import_file<L, N, E>(
    path: &Path,
    profile: Arc<ImportProfile>,
    length: L,
    create_node: impl FnMut(InternalNode) -> N,
    create_edge: impl FnMut(InternalEdge) -> E,
) -> GraphResult<ImportedGraph<N, E>>
where
    L: Fn(GeoPoint, GeoPoint) -> f64,
{
    let checksum = checksum(path)?;
    log::info!("importing {} (checksum {checksum})", path.display());

    let mut assembler = GraphAssembler::new(profile, length);
    let parse = osmg_xml::parse_file(path, &mut assembler)?;
    let graph = assembler.finish(create_node, create_edge)?;

    Ok(ImportedGraph { graph, checksum, parse })
}
