//! Unit tests for osmg-graph.
//!
//! Graphs are assembled from inline documents with a "length" that is the
//! latitude difference, so expected lengths are exact.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use osmg_core::GeoPoint;
    use osmg_filter::ImportProfile;

    use crate::{GraphAssembler, GraphParts, InternalEdge, InternalNode};

    pub const PROFILE: &str = r#"
modes:
  car:
    include: { highway: [primary, residential] }
    excludeUnless: { access: ["no", private] }
    unless: { motor_vehicle: ["yes"] }
  walk:
    include: { highway: "*" }
    exclude: { highway: [motorway], foot: ["no"] }
"#;

    pub fn profile() -> Arc<ImportProfile> {
        Arc::new(ImportProfile::from_yaml_str(PROFILE).unwrap())
    }

    pub fn lat_diff(a: GeoPoint, b: GeoPoint) -> f64 {
        (a.lat - b.lat).abs()
    }

    pub fn assemble(xml: &str) -> GraphParts<InternalNode, InternalEdge> {
        let mut assembler = GraphAssembler::new(profile(), lat_diff);
        osmg_xml::parse_str(xml, &mut assembler).unwrap();
        assembler.finish(|n| n, |e| e).unwrap()
    }

    /// Nodes 1..=4 on a meridian, 0.001° apart; node 9 is never used.
    pub fn doc(ways: &str) -> String {
        format!(
            r#"<osm>
  <node id="1" lat="0.000" lon="0"/>
  <node id="2" lat="0.001" lon="0"/>
  <node id="3" lat="0.002" lon="0"/>
  <node id="4" lat="0.003" lon="0"/>
  <node id="9" lat="1.000" lon="1"/>
{ways}
</osm>"#
        )
    }
}

// ── InternalEdgeBuilder ───────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use osmg_core::{EdgeId, NodeId, OsmId, TransportMode, TransportModes, WayUid};

    use crate::edge::keys;
    use crate::{AttrValue, InternalEdgeBuilder};

    fn builder(from: i64, to: i64) -> InternalEdgeBuilder {
        InternalEdgeBuilder::new(OsmId(from), OsmId(to), OsmId(10), WayUid(0))
            .with_modes(TransportModes::CAR)
            .with_max_speed(13.9)
            .with_lanes(2)
    }

    #[test]
    fn equality_is_structural() {
        // Endpoints, length, and uid do not take part.
        let a = builder(1, 2).with_length(5.0);
        let b = InternalEdgeBuilder::new(OsmId(7), OsmId(8), OsmId(10), WayUid(3))
            .with_modes(TransportModes::CAR)
            .with_max_speed(13.9)
            .with_lanes(2);
        assert_eq!(a, b);

        assert_ne!(a, builder(1, 2).with_lanes(1));
        assert_ne!(a, builder(1, 2).with_max_speed(13.8));
        assert_ne!(a, builder(1, 2).with_modes(TransportModes::WALK));
        let other_way = InternalEdgeBuilder::new(OsmId(1), OsmId(2), OsmId(11), WayUid(0))
            .with_modes(TransportModes::CAR)
            .with_max_speed(13.9)
            .with_lanes(2);
        assert_ne!(a, other_way);
    }

    #[test]
    fn add_modes_only_widens() {
        let mut b = builder(1, 2);
        b.add_modes(TransportModes::WALK);
        b.add_modes(TransportModes::CAR);
        assert!(b.modes().allows(TransportMode::Car));
        assert!(b.modes().allows(TransportMode::Walk));
        assert!(!b.modes().allows(TransportMode::Bike));
    }

    #[test]
    fn no_opposite_by_default() {
        let b = builder(1, 2);
        assert!(!b.has_opposite());
        assert_eq!(b.opposite(), WayUid::INVALID);
        assert!(b.with_opposite(WayUid(0)).has_opposite());
    }

    #[test]
    fn build_resolves_ids_and_fills_attributes() {
        let edge = builder(1, 2)
            .with_length(42.0)
            .with_attr("surface", AttrValue::Text("asphalt".into()))
            .with_attr(keys::LANES, AttrValue::Int(99))
            .build(EdgeId(5), NodeId(0), NodeId(1));

        assert_eq!(edge.id, EdgeId(5));
        assert_eq!((edge.from, edge.to), (NodeId(0), NodeId(1)));
        assert_eq!(edge.length, 42.0);
        assert_eq!(edge.attributes[keys::WAY_ID], AttrValue::Int(10));
        assert_eq!(edge.attributes[keys::UNIQUE_WAY_ID], AttrValue::Int(0));
        assert_eq!(
            edge.attributes[keys::OPPOSITE_ID],
            AttrValue::Int(i64::from(u32::MAX))
        );
        assert_eq!(edge.attributes[keys::MODES], AttrValue::Modes(TransportModes::CAR));
        assert_eq!(edge.attributes[keys::MAX_SPEED], AttrValue::Float(13.9));
        // Standard keys win over an extra attribute of the same name.
        assert_eq!(edge.attributes[keys::LANES], AttrValue::Int(2));
        assert_eq!(edge.attributes["surface"].to_string(), "asphalt");
    }
}

// ── NodeIndex ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod node_index {
    use osmg_core::{EdgeId, NodeId, OsmId, WayUid};

    use crate::node::dense_id;
    use crate::{GraphError, NodeIndex};

    #[test]
    fn first_use_order() {
        let mut idx = NodeIndex::new();
        assert_eq!(idx.resolve(OsmId(30)).unwrap(), NodeId(0));
        assert_eq!(idx.resolve(OsmId(-5)).unwrap(), NodeId(1));
        assert_eq!(idx.resolve(OsmId(30)).unwrap(), NodeId(0));
        assert_eq!(idx.get(OsmId(7)), None);
        assert_eq!(idx.osm_ids(), &[OsmId(30), OsmId(-5)]);
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn dense_ids_stop_before_the_sentinel() {
        let last = u32::MAX as usize - 1;
        assert_eq!(dense_id::<NodeId>(last, "nodes").unwrap(), NodeId(u32::MAX - 1));
        assert_eq!(dense_id::<EdgeId>(0, "edges").unwrap(), EdgeId(0));

        let err = dense_id::<WayUid>(u32::MAX as usize, "ways").unwrap_err();
        assert!(matches!(err, GraphError::IdOverflow("ways")));
        assert_eq!(err.to_string(), "too many ways for 32-bit ids");
        assert!(dense_id::<NodeId>(usize::MAX, "nodes").is_err());
    }
}

// ── GraphAssembler ────────────────────────────────────────────────────────────

#[cfg(test)]
mod assembler {
    use osmg_core::{GeoPoint, NodeId, OsmId, TransportModes, WayUid};

    use super::helpers::{assemble, doc, profile};
    use crate::GraphAssembler;

    #[test_log::test]
    fn two_way_street() {
        let g = assemble(&doc(
            r#"<way id="10"><nd ref="1"/><nd ref="2"/><nd ref="3"/>
                 <tag k="highway" v="residential"/></way>"#,
        ));

        assert_eq!(g.edges.len(), 4);
        assert_eq!(g.nodes.len(), 3);

        let pairs: Vec<(NodeId, NodeId)> = g.edges.iter().map(|e| (e.from, e.to)).collect();
        assert_eq!(
            pairs,
            [
                (NodeId(0), NodeId(1)),
                (NodeId(1), NodeId(0)),
                (NodeId(1), NodeId(2)),
                (NodeId(2), NodeId(1)),
            ]
        );
        let both = TransportModes::CAR | TransportModes::WALK;
        for e in &g.edges {
            assert_eq!(e.way_id, OsmId(10));
            assert_eq!(e.way_uid, WayUid(0));
            assert_eq!(e.opposite, e.way_uid);
            assert_eq!(e.modes, both);
            assert_eq!(e.lanes, 1);
            assert!((e.max_speed - 32.0 / 3.6).abs() < 1e-9);
            assert!((e.length - 0.001).abs() < 1e-12);
        }
    }

    #[test_log::test]
    fn one_way_street_gets_walk_contra_flow() {
        let g = assemble(&doc(
            r#"<way id="10"><nd ref="1"/><nd ref="2"/>
                 <tag k="highway" v="primary"/><tag k="oneway" v="yes"/>
                 <tag k="maxspeed" v="50"/><tag k="lanes" v="2"/></way>"#,
        ));

        assert_eq!(g.edges.len(), 2);
        let fwd = &g.edges[0];
        let bwd = &g.edges[1];
        assert_eq!((fwd.from, fwd.to), (NodeId(0), NodeId(1)));
        assert_eq!(fwd.modes, TransportModes::CAR | TransportModes::WALK);
        assert_eq!(fwd.lanes, 2);
        assert!((fwd.max_speed - 50.0 / 3.6).abs() < 1e-9);

        assert_eq!((bwd.from, bwd.to), (NodeId(1), NodeId(0)));
        assert_eq!(bwd.modes, TransportModes::WALK);
        assert_eq!(bwd.lanes, 1);
        assert_eq!(fwd.opposite, bwd.way_uid);
    }

    #[test_log::test]
    fn reverse_one_way_without_walk_has_no_opposite() {
        let g = assemble(&doc(
            r#"<way id="10"><nd ref="1"/><nd ref="2"/>
                 <tag k="highway" v="primary"/><tag k="oneway" v="-1"/>
                 <tag k="foot" v="no"/></way>"#,
        ));

        assert_eq!(g.edges.len(), 1);
        let e = &g.edges[0];
        // Travel against the node order: 2 → 1.
        assert_eq!(g.nodes[e.from.index()].osm_id, OsmId(2));
        assert_eq!(g.nodes[e.to.index()].osm_id, OsmId(1));
        assert_eq!(e.modes, TransportModes::CAR);
        assert_eq!(e.opposite, WayUid::INVALID);
    }

    #[test_log::test]
    fn irrelevant_ways_are_dropped() {
        let g = assemble(&doc(
            r#"<way id="10"><nd ref="1"/><nd ref="2"/><tag k="highway" v="motorway"/></way>
               <way id="11"><nd ref="2"/><nd ref="3"/><tag k="building" v="yes"/></way>"#,
        ));
        assert!(g.edges.is_empty());
        assert!(g.nodes.is_empty());
        assert_eq!(g.stats.ways_seen, 2);
        assert_eq!(g.stats.ways_dropped, 2);
        assert_eq!(g.stats.ways_accepted, 0);
    }

    #[test_log::test]
    fn mode_sets_follow_evaluators() {
        // access=no vetoes car; walk is unaffected.
        let g = assemble(&doc(
            r#"<way id="10"><nd ref="1"/><nd ref="2"/>
                 <tag k="highway" v="residential"/><tag k="access" v="no"/></way>"#,
        ));
        assert!(g.edges.iter().all(|e| e.modes == TransportModes::WALK));
    }

    #[test_log::test]
    fn dangling_references_are_pruned() {
        let g = assemble(&doc(
            r#"<way id="10"><nd ref="1"/><nd ref="77"/><nd ref="2"/>
                 <tag k="highway" v="residential"/></way>"#,
        ));
        assert_eq!(g.stats.dangling_refs, 1);
        assert_eq!(g.edges.len(), 2);
        assert!((g.edges[0].length - 0.001).abs() < 1e-12);
    }

    #[test_log::test]
    fn way_with_one_surviving_node_yields_nothing() {
        let g = assemble(&doc(
            r#"<way id="10"><nd ref="1"/><nd ref="77"/><tag k="highway" v="residential"/></way>
               <way id="11"><nd ref="3"/><tag k="highway" v="residential"/></way>"#,
        ));
        assert!(g.edges.is_empty());
        assert_eq!(g.stats.ways_accepted, 2);
        assert_eq!(g.stats.ways_degenerate, 2);
    }

    #[test_log::test]
    fn repeated_node_refs_are_not_self_loops() {
        let g = assemble(&doc(
            r#"<way id="10"><nd ref="1"/><nd ref="1"/><nd ref="2"/>
                 <tag k="highway" v="residential"/></way>"#,
        ));
        assert_eq!(g.edges.len(), 2);
        assert!(g.edges.iter().all(|e| e.from != e.to));
    }

    #[test_log::test]
    fn reprocessing_a_way_merges_equal_edges() {
        let way = r#"<way id="10"><nd ref="1"/><nd ref="2"/><nd ref="3"/>
                       <tag k="highway" v="residential"/></way>"#;
        let once = assemble(&doc(way));
        let twice = assemble(&doc(&format!("{way}{way}")));

        assert_eq!(twice.edges, once.edges);
        assert_eq!(twice.stats.edges_merged, 4);
        assert_eq!(twice.stats.ways_accepted, 2);
    }

    #[test_log::test]
    fn merged_one_way_keeps_its_direction_modes() {
        let way = r#"<way id="10"><nd ref="1"/><nd ref="2"/>
                       <tag k="highway" v="primary"/><tag k="oneway" v="yes"/></way>"#;
        let g = assemble(&doc(&format!("{way}{way}")));

        assert_eq!(g.edges.len(), 2);
        assert_eq!(g.stats.edges_merged, 2);
        assert_eq!(g.edges[0].modes, TransportModes::CAR | TransportModes::WALK);
        assert_eq!(g.edges[1].modes, TransportModes::WALK);
    }

    #[test_log::test]
    fn different_ways_on_same_pair_stay_parallel() {
        let g = assemble(&doc(
            r#"<way id="10"><nd ref="1"/><nd ref="2"/><tag k="highway" v="residential"/></way>
               <way id="11"><nd ref="1"/><nd ref="2"/><tag k="highway" v="residential"/></way>"#,
        ));
        assert_eq!(g.edges.len(), 4);
        assert_eq!(g.stats.edges_merged, 0);
        assert_eq!(g.edges[0].way_uid, WayUid(0));
        assert_eq!(g.edges[2].way_uid, WayUid(1));
        assert_eq!((g.edges[0].from, g.edges[0].to), (g.edges[2].from, g.edges[2].to));
    }

    #[test_log::test]
    fn ways_may_precede_their_nodes() {
        let xml = r#"<osm>
  <way id="10"><nd ref="2"/><nd ref="1"/><tag k="highway" v="residential"/></way>
  <node id="1" lat="0.0" lon="0"/>
  <node id="2" lat="0.5" lon="0"/>
</osm>"#;
        let g = assemble(xml);
        assert_eq!(g.edges.len(), 2);
        assert_eq!(g.nodes[0].osm_id, OsmId(2));
        assert_eq!(g.nodes[0].pos.lat, 0.5);
        assert!((g.edges[0].length - 0.5).abs() < 1e-12);
    }

    #[test_log::test]
    fn only_referenced_nodes_are_created() {
        let g = assemble(&doc(
            r#"<way id="10"><nd ref="3"/><nd ref="4"/><tag k="highway" v="residential"/></way>
               <relation id="5"><member type="way" ref="10" role=""/></relation>"#,
        ));
        let osm: Vec<OsmId> = g.nodes.iter().map(|n| n.osm_id).collect();
        assert_eq!(osm, [OsmId(3), OsmId(4)]);
        for (i, n) in g.nodes.iter().enumerate() {
            assert_eq!(n.id.index(), i);
        }
        assert_eq!(g.stats.nodes, 5);
        assert_eq!(g.stats.relations, 1);
    }

    #[test_log::test]
    fn factories_see_every_part_once() {
        let mut assembler = GraphAssembler::new(profile(), |_: GeoPoint, _: GeoPoint| 1.0);
        osmg_xml::parse_str(
            &doc(r#"<way id="10"><nd ref="1"/><nd ref="2"/><nd ref="3"/>
                      <tag k="highway" v="residential"/></way>"#),
            &mut assembler,
        )
        .unwrap();

        let mut created = Vec::new();
        let parts = assembler.finish(
            |n| n.osm_id.0,
            |e| {
                created.push(e.id);
                e.length
            },
        )
        .unwrap();
        assert_eq!(parts.nodes, [1, 2, 3]);
        assert_eq!(parts.edges, [1.0; 4]);
        let ids: Vec<usize> = created.iter().map(|id| id.index()).collect();
        assert_eq!(ids, [0, 1, 2, 3]);
    }
}

// ── Checksum ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod checksum {
    use std::io::Write;
    use std::path::Path;

    use crate::{checksum, checksum_reader, GraphError, CHECKSUM_LEN};

    #[test]
    fn known_digests() {
        // md5("hello") = 5d41402a bc4b2a76 b9719d91 1017c592
        assert_eq!(checksum_reader("hello".as_bytes()).unwrap(), "bc4b2a76");
        // md5("") = d41d8cd9 8f00b204 e9800998 ecf8427e
        assert_eq!(checksum_reader(&b""[..]).unwrap(), "8f00b204");
    }

    #[test]
    fn stable_for_unchanged_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<osm></osm>").unwrap();

        let first = checksum(file.path()).unwrap();
        let second = checksum(file.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), CHECKSUM_LEN);
        assert!(first.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn unreadable_file_is_fatal() {
        let err = checksum(Path::new("/nonexistent/extract.osm")).unwrap_err();
        assert!(matches!(err, GraphError::Checksum { .. }));
    }
}

// ── Cache stamps ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use std::fs;
    use std::path::Path;

    use crate::{cache_is_valid, checksum, read_stamp, stamp_path, write_stamp, GraphError};

    #[test]
    fn stamp_sits_next_to_cache() {
        assert_eq!(
            stamp_path(Path::new("/tmp/city.graph")),
            Path::new("/tmp/city.graph.md5")
        );
    }

    #[test_log::test]
    fn stamp_round_trip_and_staleness() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("city.osm");
        let cache = dir.path().join("city.graph");
        fs::write(&source, "<osm></osm>").unwrap();

        // No cache yet.
        assert!(!cache_is_valid(&source, &cache).unwrap());

        fs::write(&cache, "cached").unwrap();
        assert_eq!(read_stamp(&cache).unwrap(), None);
        assert!(!cache_is_valid(&source, &cache).unwrap());

        let sum = checksum(&source).unwrap();
        write_stamp(&cache, &sum).unwrap();
        assert_eq!(read_stamp(&cache).unwrap().as_deref(), Some(sum.as_str()));
        assert!(cache_is_valid(&source, &cache).unwrap());

        fs::write(&source, "<osm><node id=\"1\" lat=\"0\" lon=\"0\"/></osm>").unwrap();
        assert!(!cache_is_valid(&source, &cache).unwrap());
    }

    #[test]
    fn malformed_stamps() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("city.graph");
        fs::write(&cache, "cached").unwrap();

        assert!(matches!(write_stamp(&cache, "xyz"), Err(GraphError::InvalidStamp(_))));

        fs::write(stamp_path(&cache), "not-hex!").unwrap();
        assert!(matches!(read_stamp(&cache), Err(GraphError::InvalidStamp(_))));

        let source = dir.path().join("city.osm");
        fs::write(&source, "<osm/>").unwrap();
        assert!(!cache_is_valid(&source, &cache).unwrap());
    }
}

// ── import_file ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod import {
    use std::io::Write;
    use std::path::Path;

    use super::helpers::{doc, lat_diff, profile};
    use crate::{checksum, import_file, GraphError};

    #[test_log::test]
    fn imports_file_and_reports_checksum() {
        let mut file = tempfile::Builder::new().suffix(".osm").tempfile().unwrap();
        let xml = doc(r#"<way id="10"><nd ref="1"/><nd ref="2"/><tag k="highway" v="primary"/></way>"#);
        file.write_all(xml.as_bytes()).unwrap();

        let imported = import_file(file.path(), profile(), lat_diff, |n| n, |e| e).unwrap();
        assert_eq!(imported.checksum, checksum(file.path()).unwrap());
        assert_eq!(imported.parse.nodes, 5);
        assert_eq!(imported.parse.ways, 1);
        assert_eq!(imported.graph.edges.len(), 2);
    }

    #[test]
    fn missing_file_fails_before_parsing() {
        let err = import_file(
            Path::new("/nonexistent/extract.osm"),
            profile(),
            lat_diff,
            |n| n,
            |e| e,
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::Checksum { .. }));
    }

    #[test]
    fn structural_error_aborts_import() {
        let mut file = tempfile::Builder::new().suffix(".osm").tempfile().unwrap();
        file.write_all(br#"<osm><node id="1" lon="0"/></osm>"#).unwrap();

        let err = import_file(file.path(), profile(), lat_diff, |n| n, |e| e).unwrap_err();
        assert!(matches!(err, GraphError::Xml(_)));
    }
}
