//! Graph nodes and the OSM id → permanent id mapping.

use rustc_hash::FxHashMap;

use osmg_core::{GeoPoint, NodeId, OsmId};

use crate::{GraphError, GraphResult};

/// The id at position `n` of a dense id space.  `u32::MAX` is the `INVALID`
/// sentinel, so positions stop one short of it.
pub(crate) fn dense_id<T: TryFrom<usize>>(n: usize, what: &'static str) -> GraphResult<T> {
    if n >= u32::MAX as usize {
        return Err(GraphError::IdOverflow(what));
    }
    T::try_from(n).map_err(|_| GraphError::IdOverflow(what))
}

/// Input to the caller's node construction function.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InternalNode {
    /// Permanent, dense graph id (sequential from 0).
    pub id:     NodeId,
    pub osm_id: OsmId,
    pub pos:    GeoPoint,
}

/// Assigns permanent [`NodeId`]s to OSM node ids in first-use order.
#[derive(Debug, Default)]
pub struct NodeIndex {
    by_osm: FxHashMap<OsmId, NodeId>,
    order:  Vec<OsmId>,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id of `osm`, assigning the next free one on first sight.
    ///
    /// # Errors
    ///
    /// [`GraphError::IdOverflow`] once every valid `NodeId` is taken.
    pub fn resolve(&mut self, osm: OsmId) -> GraphResult<NodeId> {
        if let Some(&id) = self.by_osm.get(&osm) {
            return Ok(id);
        }
        let id = dense_id(self.order.len(), "nodes")?;
        self.by_osm.insert(osm, id);
        self.order.push(osm);
        Ok(id)
    }

    pub fn get(&self, osm: OsmId) -> Option<NodeId> {
        self.by_osm.get(&osm).copied()
    }

    /// OSM ids in `NodeId` order.
    pub fn osm_ids(&self) -> &[OsmId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
