//! OSM element model.
//!
//! Elements go through two phases:
//!
//! 1. **Construction** — a [`NodeBuilder`], [`WayBuilder`], or
//!    [`RelationBuilder`] accumulates tags and references in document order.
//! 2. **Frozen** — `build()` yields an [`OsmNode`], [`OsmWay`], or
//!    [`OsmRelation`] whose tags can only be read.
//!
//! [`OsmElement`] is the closed union handed to an
//! [`ElementConsumer`](crate::ElementConsumer).

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::{CoreError, GeoPoint, OsmId, Tags};

// ── ElementKind ───────────────────────────────────────────────────────────────

/// The three OSM element kinds.  Also used for relation member types.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    /// XML tag name (and member `type` value) of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Node     => "node",
            ElementKind::Way      => "way",
            ElementKind::Relation => "relation",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node"     => Ok(ElementKind::Node),
            "way"      => Ok(ElementKind::Way),
            "relation" => Ok(ElementKind::Relation),
            _ => Err(CoreError::UnknownElementKind(s.to_string())),
        }
    }
}

// ── Frozen elements ───────────────────────────────────────────────────────────

/// A point with a position.  References no other element.
#[derive(Clone, Debug, PartialEq)]
pub struct OsmNode {
    id:   OsmId,
    pos:  GeoPoint,
    tags: Tags,
}

impl OsmNode {
    pub fn id(&self) -> OsmId { self.id }
    pub fn pos(&self) -> GeoPoint { self.pos }
    pub fn tags(&self) -> &Tags { &self.tags }
}

/// An ordered path through nodes.  Duplicate references are allowed.
#[derive(Clone, Debug, PartialEq)]
pub struct OsmWay {
    id:   OsmId,
    refs: Vec<OsmId>,
    tags: Tags,
}

impl OsmWay {
    pub fn id(&self) -> OsmId { self.id }
    pub fn tags(&self) -> &Tags { &self.tags }

    /// Node references in path order.
    pub fn refs(&self) -> &[OsmId] {
        &self.refs
    }

    /// Keep only the references for which `keep` returns `true`, preserving
    /// their relative order.  Returns the number of references removed.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(OsmId) -> bool) -> usize {
        let before = self.refs.len();
        self.refs.retain(|&id| keep(id));
        before - self.refs.len()
    }

    /// Drop references to nodes missing from `known`.
    pub fn prune_unknown(&mut self, known: &FxHashSet<OsmId>) -> usize {
        self.retain_nodes(|id| known.contains(&id))
    }
}

/// A grouping of other elements, kept as three typed member lists.
#[derive(Clone, Debug, PartialEq)]
pub struct OsmRelation {
    id:        OsmId,
    nodes:     Vec<OsmId>,
    ways:      Vec<OsmId>,
    relations: Vec<OsmId>,
    tags:      Tags,
}

impl OsmRelation {
    pub fn id(&self) -> OsmId { self.id }
    pub fn tags(&self) -> &Tags { &self.tags }
    pub fn node_members(&self) -> &[OsmId] { &self.nodes }
    pub fn way_members(&self) -> &[OsmId] { &self.ways }
    pub fn relation_members(&self) -> &[OsmId] { &self.relations }
}

// ── OsmElement ────────────────────────────────────────────────────────────────

/// A completed element of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum OsmElement {
    Node(OsmNode),
    Way(OsmWay),
    Relation(OsmRelation),
}

impl OsmElement {
    pub fn id(&self) -> OsmId {
        match self {
            OsmElement::Node(n)     => n.id,
            OsmElement::Way(w)      => w.id,
            OsmElement::Relation(r) => r.id,
        }
    }

    pub fn tags(&self) -> &Tags {
        match self {
            OsmElement::Node(n)     => &n.tags,
            OsmElement::Way(w)      => &w.tags,
            OsmElement::Relation(r) => &r.tags,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            OsmElement::Node(_)     => ElementKind::Node,
            OsmElement::Way(_)      => ElementKind::Way,
            OsmElement::Relation(_) => ElementKind::Relation,
        }
    }
}

impl From<OsmNode> for OsmElement {
    fn from(n: OsmNode) -> Self { OsmElement::Node(n) }
}

impl From<OsmWay> for OsmElement {
    fn from(w: OsmWay) -> Self { OsmElement::Way(w) }
}

impl From<OsmRelation> for OsmElement {
    fn from(r: OsmRelation) -> Self { OsmElement::Relation(r) }
}

// ── Builders ──────────────────────────────────────────────────────────────────

/// Construction phase of an [`OsmNode`].
#[derive(Debug)]
pub struct NodeBuilder {
    id:   OsmId,
    pos:  GeoPoint,
    tags: Tags,
}

impl NodeBuilder {
    pub fn new(id: OsmId, lat: f64, lon: f64) -> Self {
        Self { id, pos: GeoPoint::new(lat, lon), tags: Tags::new() }
    }

    /// Add a tag; a repeated key replaces the earlier value.
    pub fn add_tag(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> OsmNode {
        OsmNode { id: self.id, pos: self.pos, tags: self.tags }
    }
}

/// Construction phase of an [`OsmWay`].
#[derive(Debug)]
pub struct WayBuilder {
    id:   OsmId,
    refs: Vec<OsmId>,
    tags: Tags,
}

impl WayBuilder {
    pub fn new(id: OsmId) -> Self {
        Self { id, refs: Vec::new(), tags: Tags::new() }
    }

    pub fn add_tag(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Append a node reference to the end of the path.
    pub fn add_node_ref(&mut self, node: OsmId) -> &mut Self {
        self.refs.push(node);
        self
    }

    pub fn build(self) -> OsmWay {
        OsmWay { id: self.id, refs: self.refs, tags: self.tags }
    }
}

/// Construction phase of an [`OsmRelation`].
#[derive(Debug)]
pub struct RelationBuilder {
    id:        OsmId,
    nodes:     Vec<OsmId>,
    ways:      Vec<OsmId>,
    relations: Vec<OsmId>,
    tags:      Tags,
}

impl RelationBuilder {
    pub fn new(id: OsmId) -> Self {
        Self {
            id,
            nodes:     Vec::new(),
            ways:      Vec::new(),
            relations: Vec::new(),
            tags:      Tags::new(),
        }
    }

    pub fn add_tag(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Append a member to the list matching its kind.
    pub fn add_member(&mut self, kind: ElementKind, member: OsmId) -> &mut Self {
        match kind {
            ElementKind::Node     => self.nodes.push(member),
            ElementKind::Way      => self.ways.push(member),
            ElementKind::Relation => self.relations.push(member),
        }
        self
    }

    pub fn build(self) -> OsmRelation {
        OsmRelation {
            id:        self.id,
            nodes:     self.nodes,
            ways:      self.ways,
            relations: self.relations,
            tags:      self.tags,
        }
    }
}
