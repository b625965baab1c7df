//! Live simulation runner.
//!
//! Starts both loops and prints a one-line status on every metric sample
//! until Ctrl-C (or `--duration` elapses), then shuts down cleanly.

use std::time::Duration;

use owo_colors::OwoColorize;
use tracing::info;

use netpulse_core::{SimConfig, Simulation};

use crate::cli::{GlobalOpts, RunArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(args: &RunArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (nodes, edges) = util::load_parts(global)?;
    let config = SimConfig {
        tick_interval: Duration::from_millis(args.tick_ms.max(1)),
        sample_interval: Duration::from_millis(args.sample_ms.max(1)),
        spawn_probability: args
            .spawn_probability
            .unwrap_or(SimConfig::default().spawn_probability),
        ..util::sim_config(global)
    };

    let sim = Simulation::from_parts(nodes, edges, config)?;
    let topology = sim.topology();
    info!(
        nodes = topology.node_count(),
        edges = topology.edge_count(),
        "starting simulation"
    );

    sim.start().await;
    let mut samples = sim.sampler().samples();
    let color = output::should_color(&global.color);

    let deadline = args.duration.map(Duration::from_secs);
    let run_stream = async {
        loop {
            let Some(window) = samples.changed().await else {
                break;
            };
            let Some(sample) = window.last() else {
                continue;
            };
            let live = sim.scheduler().live_packets().len();
            output::print_output(&status_line(sample, live, color), global.quiet);
        }
    };

    match deadline {
        Some(limit) => {
            tokio::select! {
                () = run_stream => {}
                () = tokio::time::sleep(limit) => {}
                _ = tokio::signal::ctrl_c() => {}
            }
        }
        None => {
            tokio::select! {
                () = run_stream => {}
                _ = tokio::signal::ctrl_c() => {}
            }
        }
    }

    sim.shutdown().await;
    info!("simulation stopped");
    Ok(())
}

fn status_line(sample: &netpulse_core::MetricSample, live: usize, color: bool) -> String {
    let time = sample.timestamp.format("%H:%M:%S");
    let body = format!(
        "in {:>6.1} Mbps  out {:>6.1} Mbps  lat {:>5.1} ms  loss {:>4.2}%  conns {:>3}  packets {live}",
        sample.inbound_mbps,
        sample.outbound_mbps,
        sample.latency_ms,
        sample.packet_loss_pct,
        sample.active_connections,
    );
    if color {
        format!("{} {body}", time.to_string().dimmed())
    } else {
        format!("{time} {body}")
    }
}
