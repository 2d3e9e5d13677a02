//! import — build a routing graph from an OSM XML extract.
//!
//! ```text
//! import <extract.osm[.gz]> [profile.yaml] [cache_dir]
//! ```
//!
//! Defaults: `config/profile.yaml`, and a cache directory next to the
//! extract named `<extract>.graph`.  When the cache's checksum stamp still
//! matches the extract, the graph is loaded from the cache instead of being
//! re-imported.

mod network;
mod store;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};

use osmg_core::NodeId;
use osmg_filter::ImportProfile;
use osmg_graph::{import_file, write_stamp};

use network::{haversine_m, RoadEdge, RoadGraph, RoadNode};

const DEFAULT_PROFILE: &str = "config/profile.yaml";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(source) = args.first().map(PathBuf::from) else {
        bail!("usage: import <extract.osm[.gz]> [profile.yaml] [cache_dir]");
    };
    let profile_path = args.get(1).map_or_else(|| PathBuf::from(DEFAULT_PROFILE), PathBuf::from);
    let cache_dir = args.get(2).map_or_else(|| default_cache_dir(&source), PathBuf::from);

    let started = Instant::now();

    let graph = match store::load_cached(&source, &cache_dir)? {
        Some(graph) => {
            log::info!("reusing cached graph in {}", cache_dir.display());
            graph
        }
        None => import_and_cache(&source, &profile_path, &cache_dir)?,
    };

    print_summary(&graph);
    println!("done in {:.2?}", started.elapsed());
    Ok(())
}

fn import_and_cache(source: &Path, profile_path: &Path, cache_dir: &Path) -> Result<RoadGraph> {
    let profile = ImportProfile::from_path(profile_path)
        .with_context(|| format!("loading profile {}", profile_path.display()))?;
    let imported = import_file(
        source,
        Arc::new(profile),
        haversine_m,
        RoadNode::from,
        RoadEdge::from,
    )?;

    let parts = imported.graph;
    log::info!("assembly: {}", parts.stats);
    let graph = RoadGraph::from_parts(parts.nodes, parts.edges);

    store::save(&graph, cache_dir)?;
    write_stamp(&store::edges_path(cache_dir), &imported.checksum)?;
    Ok(graph)
}

fn default_cache_dir(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_owned();
    name.push(".graph");
    PathBuf::from(name)
}

fn print_summary(graph: &RoadGraph) {
    println!(
        "Road graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    for (mode, count) in graph.edges_per_mode() {
        println!("  {:<8} {count} edges", mode.as_str());
    }

    let paired = graph.edges.iter().filter(|e| e.opposite.is_valid()).count();
    let length_km: f64 = graph.edges.iter().map(|e| e.length_m).sum::<f64>() / 1_000.0;
    println!("  two-way  {paired} edges");
    println!("  length   {length_km:.1} km (directed)");

    if graph.node_count() > 0 {
        let max_degree = (0..graph.node_count())
            .map(|n| graph.out_edges(NodeId(n as u32)).count())
            .max()
            .unwrap_or(0);
        let sinks = (0..graph.node_count())
            .filter(|&n| graph.out_degree(NodeId(n as u32)) == 0)
            .count();
        println!(
            "  degree   {:.2} avg, {max_degree} max, {sinks} nodes without exits",
            graph.edge_count() as f64 / graph.node_count() as f64
        );
    }
}
