//! Shared helpers: topology loading and config assembly.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use netpulse_core::{Edge, Node, SimConfig, Topology};

use crate::cli::GlobalOpts;
use crate::demo;
use crate::error::CliError;

/// On-disk topology document. Node `links` are ignored on input; the
/// graph derives them.
#[derive(Debug, Deserialize)]
pub struct TopologyFile {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Raw node/edge lists from `--topology`, or the built-in demo.
pub fn load_parts(global: &GlobalOpts) -> Result<(Vec<Node>, Vec<Edge>), CliError> {
    match &global.topology {
        Some(path) => {
            let file = read_topology_file(path)?;
            Ok((file.nodes, file.edges))
        }
        None => Ok((demo::nodes(), demo::edges())),
    }
}

/// A validated topology from `--topology`, or the built-in demo.
pub fn load_topology(global: &GlobalOpts) -> Result<Topology, CliError> {
    let (nodes, edges) = load_parts(global)?;
    Ok(Topology::new(nodes, edges)?)
}

fn read_topology_file(path: &Path) -> Result<TopologyFile, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::TopologyRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::TopologyParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Base simulation config with the global seed applied.
pub fn sim_config(global: &GlobalOpts) -> SimConfig {
    SimConfig {
        seed: global.seed,
        ..SimConfig::default()
    }
}
