//! Metrics command handler.

use std::time::Duration;

use tabled::Tabled;

use netpulse_core::{MetricSample, MetricsSampler};

use crate::cli::{GlobalOpts, MetricsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "In (Mbps)")]
    inbound: String,
    #[tabled(rename = "Out (Mbps)")]
    outbound: String,
    #[tabled(rename = "Latency (ms)")]
    latency: String,
    #[tabled(rename = "Loss (%)")]
    loss: String,
    #[tabled(rename = "Conns")]
    connections: u32,
    #[tabled(rename = "CPU (%)")]
    cpu: String,
    #[tabled(rename = "Mem (%)")]
    memory: String,
}

impl From<&MetricSample> for SampleRow {
    fn from(s: &MetricSample) -> Self {
        Self {
            time: s.timestamp.format("%H:%M:%S%.3f").to_string(),
            inbound: format!("{:.1}", s.inbound_mbps),
            outbound: format!("{:.1}", s.outbound_mbps),
            latency: format!("{:.1}", s.latency_ms),
            loss: format!("{:.2}", s.packet_loss_pct),
            connections: s.active_connections,
            cpu: format!("{:.1}", s.cpu_pct),
            memory: format!("{:.1}", s.memory_pct),
        }
    }
}

/// Run the sampler for `count` intervals and print the window.
pub async fn handle(args: &MetricsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = util::sim_config(global);
    config.validate()?;

    let interval = Duration::from_millis(args.interval_ms.max(1));
    let sampler = MetricsSampler::new(&config);
    let mut stream = sampler.samples();

    // The ring is bounded; asking for more than it holds would never finish.
    let target = args.count.min(config.sample_capacity);

    sampler.start(interval).await;
    while stream.current().len() < target {
        if stream.changed().await.is_none() {
            break;
        }
    }
    sampler.stop().await;

    let samples = sampler.snapshot();
    let rendered = output::render_list(&global.output, &samples, |s| SampleRow::from(s), |s| {
        s.timestamp.to_rfc3339()
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}
