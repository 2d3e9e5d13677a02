//! CSV cache of an imported [`RoadGraph`].
//!
//! Writes two files into the cache directory:
//! - `nodes.csv`: one row per node, in `NodeId` order
//! - `edges.csv`: one row per edge, in `EdgeId` (CSR) order
//!
//! `edges.csv` carries the checksum stamp of the OSM source.  A cache whose
//! stamp matches but whose files cannot be read back counts as missing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use osmg_core::{GeoPoint, NodeId, OsmId, TransportMode, TransportModes, WayUid};
use osmg_graph::cache_is_valid;

use crate::network::{RoadEdge, RoadGraph, RoadNode};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct NodeRecord {
    node_id: u32,
    osm_id:  i64,
    lat:     f64,
    lon:     f64,
}

#[derive(Serialize, Deserialize)]
struct EdgeRecord {
    edge_id:        u32,
    from:           u32,
    to:             u32,
    length_m:       f64,
    way_id:         i64,
    way_uid:        u32,
    opposite:       u32,
    modes:          String,
    max_speed_mps:  f64,
    lanes:          u16,
    travel_ms:      u32,
}

// ── Paths ─────────────────────────────────────────────────────────────────────

pub fn nodes_path(dir: &Path) -> PathBuf {
    dir.join("nodes.csv")
}

/// The file the checksum stamp belongs to.
pub fn edges_path(dir: &Path) -> PathBuf {
    dir.join("edges.csv")
}

// ── Save / load ───────────────────────────────────────────────────────────────

pub fn save(graph: &RoadGraph, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating cache directory {}", dir.display()))?;

    let mut nodes = csv::Writer::from_path(nodes_path(dir))?;
    for (i, n) in graph.nodes.iter().enumerate() {
        nodes.serialize(NodeRecord {
            node_id: i as u32,
            osm_id:  n.osm_id.0,
            lat:     n.pos.lat,
            lon:     n.pos.lon,
        })?;
    }
    nodes.flush()?;

    let mut edges = csv::Writer::from_path(edges_path(dir))?;
    for (i, (e, &travel_ms)) in graph.edges.iter().zip(&graph.edge_travel_ms).enumerate() {
        edges.serialize(EdgeRecord {
            edge_id:       i as u32,
            from:          e.from.0,
            to:            e.to.0,
            length_m:      e.length_m,
            way_id:        e.way_id.0,
            way_uid:       e.way_uid.0,
            opposite:      e.opposite.0,
            modes:         e.modes.to_string(),
            max_speed_mps: e.max_speed_mps,
            lanes:         e.lanes,
            travel_ms,
        })?;
    }
    edges.flush()?;

    log::info!(
        "cached {} nodes and {} edges in {}",
        graph.node_count(),
        graph.edge_count(),
        dir.display()
    );
    Ok(())
}

pub fn load(dir: &Path) -> Result<RoadGraph> {
    let mut nodes = Vec::new();
    let mut reader = csv::Reader::from_path(nodes_path(dir))?;
    for row in reader.deserialize::<NodeRecord>() {
        let row = row?;
        nodes.push(RoadNode {
            osm_id: OsmId(row.osm_id),
            pos:    GeoPoint::new(row.lat, row.lon),
        });
    }

    let mut edges = Vec::new();
    let mut reader = csv::Reader::from_path(edges_path(dir))?;
    for row in reader.deserialize::<EdgeRecord>() {
        let row = row?;
        edges.push(RoadEdge {
            from:          NodeId(row.from),
            to:            NodeId(row.to),
            length_m:      row.length_m,
            way_id:        OsmId(row.way_id),
            way_uid:       WayUid(row.way_uid),
            opposite:      WayUid(row.opposite),
            modes:         parse_modes(&row.modes)?,
            max_speed_mps: row.max_speed_mps,
            lanes:         row.lanes,
        });
    }

    Ok(RoadGraph::from_parts(nodes, edges))
}

/// The graph cached in `dir` for `source`, or `None` when the cache is stale,
/// missing, or unreadable.
pub fn load_cached(source: &Path, dir: &Path) -> Result<Option<RoadGraph>> {
    if !cache_is_valid(source, &edges_path(dir))? {
        return Ok(None);
    }
    match load(dir) {
        Ok(graph) => Ok(Some(graph)),
        Err(err) => {
            log::warn!("cache in {} is unreadable, re-importing: {err:#}", dir.display());
            Ok(None)
        }
    }
}

fn parse_modes(s: &str) -> Result<TransportModes> {
    let modes = s
        .split(',')
        .filter(|name| !name.is_empty())
        .map(str::parse::<TransportMode>)
        .collect::<Result<TransportModes, _>>()?;
    Ok(modes)
}
