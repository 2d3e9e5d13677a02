//! Element state machine.
//!
//! The handler is fed start/end events (tag name + attributes) by any
//! streaming reader.  It holds one explicit [`State`]: idle, or building an
//! element of a known kind.
//!
//! | Event                  | Idle                     | Building element      |
//! |------------------------|--------------------------|-----------------------|
//! | start `node`/`way`/`relation` | begin that element | ignored (nested)      |
//! | start `tag`            | ignored                  | add `k`=`v`           |
//! | start `nd`             | ignored                  | way: add `ref`        |
//! | start `member`         | ignored                  | relation: add member  |
//! | end of owning tag      | —                        | `accept`, back to idle|
//! | any other end          | no-op                    | no-op                 |
//!
//! Unknown tags are logged at `debug` level and never fail the parse.

use std::fmt;

use osmg_core::{
    ElementConsumer, ElementKind, NodeBuilder, OsmElement, RelationBuilder, WayBuilder,
};

use crate::{Attrs, XmlError, XmlResult};

// ── ParseStats ────────────────────────────────────────────────────────────────

/// Number of elements delivered to the consumer, by kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub nodes:     u64,
    pub ways:      u64,
    pub relations: u64,
}

impl ParseStats {
    pub fn total(&self) -> u64 {
        self.nodes + self.ways + self.relations
    }
}

impl fmt::Display for ParseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} ways, {} relations",
            self.nodes, self.ways, self.relations
        )
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

enum State {
    Idle,
    Node(NodeBuilder),
    Way(WayBuilder),
    Relation(RelationBuilder),
}

impl State {
    fn kind(&self) -> Option<ElementKind> {
        match self {
            State::Idle        => None,
            State::Node(_)     => Some(ElementKind::Node),
            State::Way(_)      => Some(ElementKind::Way),
            State::Relation(_) => Some(ElementKind::Relation),
        }
    }
}

// ── ElementHandler ────────────────────────────────────────────────────────────

/// Turns start/end events into [`OsmElement`]s for a consumer `C`.
pub struct ElementHandler<C: ElementConsumer> {
    consumer: C,
    state:    State,
    stats:    ParseStats,
}

impl<C: ElementConsumer> ElementHandler<C> {
    pub fn new(consumer: C) -> Self {
        Self { consumer, state: State::Idle, stats: ParseStats::default() }
    }

    /// Kind of the element under construction, if any.
    pub fn current(&self) -> Option<ElementKind> {
        self.state.kind()
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Release the consumer together with the final counts.
    pub fn into_parts(self) -> (C, ParseStats) {
        (self.consumer, self.stats)
    }

    /// Handle a start tag.
    ///
    /// # Errors
    ///
    /// A missing or non-numeric `id`, `lat`, `lon`, or `ref` attribute.
    pub fn start(&mut self, name: &str, attrs: &Attrs) -> XmlResult<()> {
        if matches!(self.state, State::Idle) {
            return self.open(name, attrs);
        }

        match (&mut self.state, name) {
            (State::Node(b), "tag") => {
                b.add_tag(attrs.get_or_empty("k"), attrs.get_or_empty("v"));
            }
            (State::Way(b), "tag") => {
                b.add_tag(attrs.get_or_empty("k"), attrs.get_or_empty("v"));
            }
            (State::Relation(b), "tag") => {
                b.add_tag(attrs.get_or_empty("k"), attrs.get_or_empty("v"));
            }
            (State::Way(b), "nd") => {
                b.add_node_ref(attrs.osm_id("nd", "ref")?);
            }
            (State::Relation(b), "member") => {
                let member = attrs.osm_id("member", "ref")?;
                match attrs.get_or_empty("type").parse::<ElementKind>() {
                    Ok(kind) => {
                        b.add_member(kind, member);
                    }
                    Err(e) => log::debug!("skipping relation member {member}: {e}"),
                }
            }
            (state, other) => {
                let inside = state.kind().map_or("?", ElementKind::as_str);
                log::debug!("ignoring <{other}> inside <{inside}>");
            }
        }
        Ok(())
    }

    fn open(&mut self, name: &str, attrs: &Attrs) -> XmlResult<()> {
        self.state = match name {
            "node" => {
                let id = attrs.osm_id(name, "id")?;
                let lat = coordinate(attrs, "lat")?;
                let lon = coordinate(attrs, "lon")?;
                State::Node(NodeBuilder::new(id, lat, lon))
            }
            "way"      => State::Way(WayBuilder::new(attrs.osm_id(name, "id")?)),
            "relation" => State::Relation(RelationBuilder::new(attrs.osm_id(name, "id")?)),
            other => {
                log::debug!("ignoring top-level <{other}>");
                State::Idle
            }
        };
        Ok(())
    }

    /// Handle an end tag.  Closing the element under construction delivers
    /// it to the consumer; every other end tag is a no-op.
    pub fn end(&mut self, name: &str) {
        let element: OsmElement = match (std::mem::replace(&mut self.state, State::Idle), name) {
            (State::Node(b), "node") => {
                self.stats.nodes += 1;
                b.build().into()
            }
            (State::Way(b), "way") => {
                self.stats.ways += 1;
                b.build().into()
            }
            (State::Relation(b), "relation") => {
                self.stats.relations += 1;
                b.build().into()
            }
            (unchanged, _) => {
                self.state = unchanged;
                return;
            }
        };
        self.consumer.accept(element);
    }

    /// Check that no element is left open at end of input.
    pub fn finish(self) -> XmlResult<(C, ParseStats)> {
        match self.state.kind() {
            Some(kind) => Err(XmlError::Truncated(kind.as_str())),
            None       => Ok(self.into_parts()),
        }
    }
}

fn coordinate(attrs: &Attrs, key: &'static str) -> XmlResult<f64> {
    let value: f64 = attrs.number("node", key)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(XmlError::InvalidNumber {
            element:   "node".to_string(),
            attribute: key,
            value:     attrs.get_or_empty(key).to_string(),
        })
    }
}
