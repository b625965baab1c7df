// ── Metric sample ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped set of synthetic performance metrics.
///
/// Produced exactly once per sampling tick and retained in a bounded
/// FIFO ring, oldest first. Timestamps are strictly increasing within
/// the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    pub inbound_mbps: f64,
    pub outbound_mbps: f64,
    pub latency_ms: f64,
    /// Packet-loss ratio as a percentage, in [0, 100].
    pub packet_loss_pct: f64,
    pub active_connections: u32,
    /// CPU load percentage, in [0, 100].
    pub cpu_pct: f64,
    /// Memory load percentage, in [0, 100].
    pub memory_pct: f64,
}
