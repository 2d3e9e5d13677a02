//! Reference downstream graph fed by the importer's construction functions.
//!
//! # Data layout
//!
//! Outgoing edges are stored in **Compressed Sparse Row (CSR)** form.  Given
//! a `NodeId n`, its outgoing edges occupy
//!
//! ```text
//! edge_*[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edge arrays are sorted by source node and indexed by `EdgeId`, so the
//! importer's edge ids are renumbered here.

use osmg_core::{EdgeId, GeoPoint, NodeId, OsmId, TransportMode, TransportModes, WayUid};
use osmg_graph::{InternalEdge, InternalNode};

// ── Factory outputs ───────────────────────────────────────────────────────────

/// What `create_node` keeps of an [`InternalNode`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoadNode {
    pub osm_id: OsmId,
    pub pos:    GeoPoint,
}

impl From<InternalNode> for RoadNode {
    fn from(n: InternalNode) -> Self {
        Self { osm_id: n.osm_id, pos: n.pos }
    }
}

/// What `create_edge` keeps of an [`InternalEdge`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoadEdge {
    pub from:          NodeId,
    pub to:            NodeId,
    pub length_m:      f64,
    pub way_id:        OsmId,
    pub way_uid:       WayUid,
    pub opposite:      WayUid,
    pub modes:         TransportModes,
    pub max_speed_mps: f64,
    pub lanes:         u16,
}

impl From<InternalEdge> for RoadEdge {
    fn from(e: InternalEdge) -> Self {
        Self {
            from:          e.from,
            to:            e.to,
            length_m:      e.length,
            way_id:        e.way_id,
            way_uid:       e.way_uid,
            opposite:      e.opposite,
            modes:         e.modes,
            max_speed_mps: e.max_speed,
            lanes:         e.lanes,
        }
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed multigraph in CSR format.
pub struct RoadGraph {
    pub nodes: Vec<RoadNode>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Edges sorted by source node; position = `EdgeId`.
    pub edges: Vec<RoadEdge>,

    /// Free-flow travel time in milliseconds at the edge's max speed.
    pub edge_travel_ms: Vec<u32>,
}

impl RoadGraph {
    /// Sort `edges` by source node and build the CSR arrays.
    pub fn from_parts(nodes: Vec<RoadNode>, mut edges: Vec<RoadEdge>) -> Self {
        let node_count = nodes.len();
        edges.sort_by_key(|e| e.from.0);

        let edge_travel_ms = edges.iter().map(travel_ms).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &edges {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edges.len());

        Self { nodes, node_out_start, edges, edge_travel_ms }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Number of edges each mode may use, in `TransportMode::ALL` order.
    pub fn edges_per_mode(&self) -> Vec<(TransportMode, usize)> {
        TransportMode::ALL
            .iter()
            .map(|&mode| (mode, self.edges.iter().filter(|e| e.modes.allows(mode)).count()))
            .collect()
    }
}

fn travel_ms(e: &RoadEdge) -> u32 {
    if e.max_speed_mps > 0.0 {
        (e.length_m / e.max_speed_mps * 1_000.0).round() as u32
    } else {
        u32::MAX
    }
}

// ── Length ────────────────────────────────────────────────────────────────────

/// Haversine great-circle distance in metres.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    const R: f64 = 6_371_000.0; // mean Earth radius, metres

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    R * c
}
