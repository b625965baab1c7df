//! Packet command handler: deterministic single-stepping.

use tabled::Tabled;

use netpulse_core::{Packet, SimConfig, Simulation};

use crate::cli::{GlobalOpts, PacketsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PacketRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Edge")]
    edge: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
}

impl From<&Packet> for PacketRow {
    fn from(p: &Packet) -> Self {
        Self {
            id: p.id.to_string(),
            edge: p.edge.to_string(),
            progress: format!("{:.1}%", p.progress),
            category: p.category.to_string(),
            size: p.size_label.clone(),
            protocol: p.protocol_label.clone(),
        }
    }
}

/// Run N full-length ticks without a timer and print the live set.
/// With `--seed` the output is fully reproducible.
pub async fn handle(args: &PacketsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (nodes, edges) = util::load_parts(global)?;
    let config = SimConfig {
        spawn_probability: args
            .spawn_probability
            .unwrap_or(SimConfig::default().spawn_probability),
        ..util::sim_config(global)
    };
    let sim = Simulation::from_parts(nodes, edges, config)?;

    for _ in 0..args.ticks {
        sim.scheduler().tick(1.0).await;
    }

    let live = sim.scheduler().live_packets();
    let rendered =
        output::render_list(&global.output, &live, |p| PacketRow::from(p), |p| p.id.to_string());
    output::print_output(&rendered, global.quiet);
    Ok(())
}
