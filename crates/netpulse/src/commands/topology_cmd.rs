//! Topology command handlers.

use owo_colors::OwoColorize;
use tabled::Tabled;

use netpulse_core::{Edge, Node, NodeDetails, NodeStatus, SimConfig, Simulation};

use crate::cli::{GlobalOpts, NodeArgs, TopologyArgs, TopologyCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Links")]
    links: usize,
}

impl From<&Node> for NodeRow {
    fn from(n: &Node) -> Self {
        Self {
            id: n.id.to_string(),
            name: n.name.clone(),
            kind: n.kind.to_string(),
            address: n.address.clone(),
            status: n.status.to_string(),
            links: n.links.len(),
        }
    }
}

#[derive(Tabled)]
struct EdgeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Medium")]
    medium: String,
    #[tabled(rename = "Capacity")]
    capacity: String,
    #[tabled(rename = "Active")]
    active: bool,
}

impl From<&Edge> for EdgeRow {
    fn from(e: &Edge) -> Self {
        Self {
            id: e.id.to_string(),
            from: e.from.to_string(),
            to: e.to.to_string(),
            medium: e.medium.to_string(),
            capacity: e.capacity_label.clone(),
            active: e.active,
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn handle(args: &TopologyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match &args.command {
        TopologyCommand::Show => show(global),
        TopologyCommand::Validate => validate(global),
        TopologyCommand::Node(node_args) => node(node_args, global),
    }
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let topology = util::load_topology(global)?;

    let nodes: Vec<Node> = topology.nodes().cloned().collect();
    let edges: Vec<Edge> = topology.edges().cloned().collect();

    let rendered_nodes =
        output::render_list(&global.output, &nodes, |n| NodeRow::from(n), |n| n.id.to_string());
    let rendered_edges =
        output::render_list(&global.output, &edges, |e| EdgeRow::from(e), |e| e.id.to_string());

    output::print_output(&rendered_nodes, global.quiet);
    output::print_output(&rendered_edges, global.quiet);
    Ok(())
}

fn validate(global: &GlobalOpts) -> Result<(), CliError> {
    let topology = util::load_topology(global)?;

    let offline = topology
        .nodes()
        .filter(|n| n.status == NodeStatus::Offline)
        .count();
    let inactive = topology.edges().filter(|e| !e.active).count();

    let summary = format!(
        "{} {} nodes, {} links ({} offline, {} inactive)",
        ok_mark(global),
        topology.node_count(),
        topology.edge_count(),
        offline,
        inactive,
    );
    output::print_output(&summary, global.quiet);
    Ok(())
}

fn node(args: &NodeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (nodes, edges) = util::load_parts(global)?;
    let sim = Simulation::from_parts(nodes, edges, SimConfig::default())?;
    let details = sim
        .interaction()
        .details_for(&args.id.as_str().into())
        .ok_or(CliError::NodeNotFound {
            id: args.id.clone(),
        })?;

    let rendered = output::render_single(&global.output, &details, detail, |d| {
        d.node.id.to_string()
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(details: &NodeDetails) -> String {
    let n = &details.node;
    let mut lines = vec![
        format!("ID:       {}", n.id),
        format!("Name:     {}", n.name),
        format!("Kind:     {}", n.kind),
        format!("Address:  {}", n.address),
        format!("Status:   {}", n.status),
        format!("Position: ({:.0}, {:.0})", n.position.x, n.position.y),
    ];
    if !details.neighbors.is_empty() {
        lines.push(format!("Neighbors ({}):", details.neighbors.len()));
        for link in &details.neighbors {
            lines.push(format!(
                "  {} -> {} ({}, {})",
                link.edge.id, link.peer.name, link.edge.medium, link.edge.capacity_label
            ));
        }
    }
    lines.join("\n")
}

fn ok_mark(global: &GlobalOpts) -> String {
    if output::should_color(&global.color) {
        "OK".green().to_string()
    } else {
        "OK".to_string()
    }
}
