//! Incremental graph assembly.
//!
//! [`GraphAssembler`] is the [`ElementConsumer`] the parser feeds.  Work is
//! split in two phases:
//!
//! | Phase    | When                   | What                                                   |
//! |----------|------------------------|--------------------------------------------------------|
//! | collect  | each `accept` call     | record node positions, classify ways, assign `WayUid`s |
//! | `finish` | after the last element | prune, segment, merge, resolve `NodeId`s, call factories |
//!
//! Edge endpoints stay OSM ids until `finish`, so ways may arrive before the
//! nodes they reference.
//!
//! # Direction
//!
//! | Direction  | forward edges               | backward edges              |
//! |------------|-----------------------------|-----------------------------|
//! | `Both`     | all modes                   | all modes                   |
//! | `Forward`  | all modes                   | modes ∩ bidirectional modes |
//! | `Backward` | modes ∩ bidirectional modes | all modes                   |
//!
//! A direction whose mode set ends up empty yields no edges.  When a way
//! yields edges in both directions, every edge stores the way's `WayUid` as
//! its opposite; otherwise the opposite is `WayUid::INVALID`.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use osmg_core::{
    EdgeId, ElementConsumer, GeoPoint, NodeId, OsmElement, OsmId, OsmWay, TransportModes, WayUid,
};
use osmg_filter::{Direction, ImportProfile};

use crate::edge::{InternalEdge, InternalEdgeBuilder};
use crate::node::{dense_id, InternalNode, NodeIndex};
use crate::{GraphError, GraphResult};

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Counters collected while assembling one graph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// OSM nodes whose position was recorded.
    pub nodes:           u64,
    pub ways_seen:       u64,
    /// Ways with at least one allowed mode.
    pub ways_accepted:   u64,
    /// Ways no mode evaluator accepted.
    pub ways_dropped:    u64,
    /// Accepted ways left with fewer than two node references after pruning.
    pub ways_degenerate: u64,
    /// References to nodes absent from the input.
    pub dangling_refs:   u64,
    /// Segments folded into an equal edge on the same node pair.
    pub edges_merged:    u64,
    pub relations:       u64,
}

impl fmt::Display for AssemblyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {}/{} ways accepted ({} degenerate), {} dangling refs, {} merged edges",
            self.nodes,
            self.ways_accepted,
            self.ways_seen,
            self.ways_degenerate,
            self.dangling_refs,
            self.edges_merged,
        )
    }
}

// ── GraphParts ────────────────────────────────────────────────────────────────

/// Caller-typed nodes and edges, in `NodeId` / `EdgeId` order.
#[derive(Debug)]
pub struct GraphParts<N, E> {
    pub nodes: Vec<N>,
    pub edges: Vec<E>,
    pub stats: AssemblyStats,
}

// ── Pending way ───────────────────────────────────────────────────────────────

/// An accepted way waiting for `finish`.
struct PendingWay {
    way:       OsmWay,
    uid:       WayUid,
    forward:   TransportModes,
    backward:  TransportModes,
    max_speed: f64,
    lanes_fwd: u16,
    lanes_bwd: u16,
}

// ── GraphAssembler ────────────────────────────────────────────────────────────

/// Collects parsed elements and turns relevant ways into directed edges.
///
/// `L` computes the length of a segment between two positions; the unit is
/// the caller's (metres for a haversine length).
pub struct GraphAssembler<L> {
    profile:   Arc<ImportProfile>,
    length:    L,
    positions: FxHashMap<OsmId, GeoPoint>,
    ways:      Vec<PendingWay>,
    uids:      FxHashMap<OsmId, WayUid>,
    stats:     AssemblyStats,
    /// First error raised while consuming; reported by `finish`.
    failure:   Option<GraphError>,
}

impl<L> GraphAssembler<L>
where
    L: Fn(GeoPoint, GeoPoint) -> f64,
{
    pub fn new(profile: Arc<ImportProfile>, length: L) -> Self {
        Self {
            profile,
            length,
            positions: FxHashMap::default(),
            ways:      Vec::new(),
            uids:      FxHashMap::default(),
            stats:     AssemblyStats::default(),
            failure:   None,
        }
    }

    pub fn stats(&self) -> AssemblyStats {
        self.stats
    }

    /// The unique id of `way`, allocated on first sight.  Re-processing the
    /// same OSM way reuses its id.
    fn uid_for(&mut self, way: OsmId) -> GraphResult<WayUid> {
        if let Some(&uid) = self.uids.get(&way) {
            return Ok(uid);
        }
        let uid = dense_id(self.uids.len(), "ways")?;
        self.uids.insert(way, uid);
        Ok(uid)
    }

    fn add_way(&mut self, way: OsmWay) {
        self.stats.ways_seen += 1;

        let modes = self.profile.modes_for(way.tags());
        if modes.is_empty() {
            self.stats.ways_dropped += 1;
            log::trace!("dropping way {}: no mode accepts it", way.id());
            return;
        }
        self.stats.ways_accepted += 1;

        let uid = match self.uid_for(way.id()) {
            Ok(uid) => uid,
            Err(err) => {
                log::error!("way {}: {err}", way.id());
                if self.failure.is_none() {
                    self.failure = Some(err);
                }
                return;
            }
        };

        let direction = self.profile.direction(way.tags());
        let contra = modes & self.profile.bidirectional_modes();
        let (forward, backward) = match direction {
            Direction::Both     => (modes, modes),
            Direction::Forward  => (modes, contra),
            Direction::Backward => (contra, modes),
        };

        let defaults = self.profile.defaults();
        let max_speed = defaults.max_speed_mps(way.tags());
        let lanes = defaults.lanes(way.tags(), direction);

        self.ways.push(PendingWay {
            way,
            uid,
            forward,
            backward,
            max_speed,
            lanes_fwd: lanes.forward,
            lanes_bwd: lanes.backward,
        });
    }

    /// Segment every pending way into directed edge builders, merging equal
    /// builders on the same ordered node pair.
    fn segment(&mut self) -> Vec<InternalEdgeBuilder> {
        let mut builders: Vec<InternalEdgeBuilder> = Vec::new();
        let mut by_pair: FxHashMap<(OsmId, OsmId), Vec<usize>> = FxHashMap::default();

        for pending in &mut self.ways {
            let positions = &self.positions;
            let removed = pending.way.retain_nodes(|id| positions.contains_key(&id));
            self.stats.dangling_refs += removed as u64;

            let refs = pending.way.refs();
            if refs.len() < 2 {
                self.stats.ways_degenerate += 1;
                log::debug!("way {} has fewer than two known nodes", pending.way.id());
                continue;
            }

            let two_way = !pending.forward.is_empty() && !pending.backward.is_empty();
            let opposite = if two_way { pending.uid } else { WayUid::INVALID };

            let mut segments: Vec<InternalEdgeBuilder> = Vec::new();
            for pair in refs.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a == b {
                    continue;
                }
                let length = (self.length)(positions[&a], positions[&b]);
                if !pending.forward.is_empty() {
                    segments.push(
                        InternalEdgeBuilder::new(a, b, pending.way.id(), pending.uid)
                            .with_opposite(opposite)
                            .with_length(length)
                            .with_modes(pending.forward)
                            .with_max_speed(pending.max_speed)
                            .with_lanes(pending.lanes_fwd),
                    );
                }
                if !pending.backward.is_empty() {
                    segments.push(
                        InternalEdgeBuilder::new(b, a, pending.way.id(), pending.uid)
                            .with_opposite(opposite)
                            .with_length(length)
                            .with_modes(pending.backward)
                            .with_max_speed(pending.max_speed)
                            .with_lanes(pending.lanes_bwd),
                    );
                }
            }

            // Equal builders carry the same modes, so the first one stands.
            for builder in segments {
                let slot = by_pair.entry((builder.from(), builder.to())).or_default();
                if slot.iter().any(|&i| builders[i] == builder) {
                    self.stats.edges_merged += 1;
                } else {
                    slot.push(builders.len());
                    builders.push(builder);
                }
            }
        }
        builders
    }

    /// Build the graph: create every node referenced by an edge, then every
    /// edge, through the caller's construction functions.
    ///
    /// Node ids are assigned in order of first use by an edge; nodes no edge
    /// references are not created.
    ///
    /// # Errors
    ///
    /// [`GraphError::IdOverflow`] when the ways, nodes or edges outnumber the
    /// 32-bit id space.  No construction function is called when this
    /// happens.
    pub fn finish<N, E>(
        mut self,
        mut create_node: impl FnMut(InternalNode) -> N,
        mut create_edge: impl FnMut(InternalEdge) -> E,
    ) -> GraphResult<GraphParts<N, E>> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }
        let builders = self.segment();

        let mut index = NodeIndex::new();
        let endpoints = builders
            .iter()
            .map(|b| Ok((index.resolve(b.from())?, index.resolve(b.to())?)))
            .collect::<GraphResult<Vec<(NodeId, NodeId)>>>()?;
        let edge_ids = (0..builders.len())
            .map(|i| dense_id::<EdgeId>(i, "edges"))
            .collect::<GraphResult<Vec<_>>>()?;

        let nodes: Vec<N> = index
            .osm_ids()
            .iter()
            .zip(0u32..)
            .map(|(&osm_id, i)| {
                create_node(InternalNode {
                    id:  NodeId(i),
                    osm_id,
                    pos: self.positions[&osm_id],
                })
            })
            .collect();

        let edges: Vec<E> = builders
            .into_iter()
            .zip(endpoints)
            .zip(edge_ids)
            .map(|((builder, (from, to)), id)| create_edge(builder.build(id, from, to)))
            .collect();

        log::info!(
            "assembled {} nodes and {} edges ({})",
            nodes.len(),
            edges.len(),
            self.stats
        );
        Ok(GraphParts { nodes, edges, stats: self.stats })
    }
}

impl<L> ElementConsumer for GraphAssembler<L>
where
    L: Fn(GeoPoint, GeoPoint) -> f64,
{
    fn accept(&mut self, element: OsmElement) {
        match element {
            OsmElement::Node(node) => {
                self.stats.nodes += 1;
                self.positions.insert(node.id(), node.pos());
            }
            OsmElement::Way(way) => self.add_way(way),
            OsmElement::Relation(_) => self.stats.relations += 1,
        }
    }
}
