//! Simulation core for the netpulse topology visualizer.
//!
//! This crate owns the data model and the scheduling machinery behind the
//! live network-topology view:
//!
//! - **[`Topology`]** — the static device/link graph. Built once, validated
//!   at construction, queried structurally every frame. Only `status` and
//!   `active` flags mutate afterwards.
//!
//! - **[`PacketScheduler`]** — spawns short-lived synthetic packets on
//!   active edges and advances them on a tokio tick loop. Explicit
//!   Idle/Running state machine with the cancellation contract hosts rely
//!   on: after [`stop()`](PacketScheduler::stop) resolves, no further tick
//!   mutates anything.
//!
//! - **[`MetricsSampler`]** — produces one smoothed performance sample per
//!   interval into a bounded FIFO ring, published as immutable snapshots
//!   for charting.
//!
//! - **[`Interaction`]** — selection/hover state plus on-demand read-only
//!   projections ([`NodeDetails`]) over the topology.
//!
//! - **[`Simulation`]** — the facade hosts construct and own. Wires the
//!   components together and tears both loops down deterministically via
//!   [`shutdown()`](Simulation::shutdown).
//!
//! Render loops never borrow into live state:
//! [`PacketScheduler::live_packets`] and [`MetricsSampler::snapshot`] hand
//! out `Arc` snapshots backed by `watch` channels, and [`SnapshotStream`]
//! offers a reactive subscription over the same channels.

pub mod config;
pub mod error;
pub mod interaction;
pub mod model;
pub mod sampler;
pub mod scheduler;
pub mod simulation;
pub mod stream;
pub mod topology;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::SimConfig;
pub use error::CoreError;
pub use interaction::{Interaction, NeighborLink, NodeDetails};
pub use sampler::MetricsSampler;
pub use scheduler::{PacketScheduler, SchedulerState};
pub use simulation::Simulation;
pub use stream::SnapshotStream;
pub use topology::Topology;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Edge, EdgeId, LinkMedium, MetricSample, Node, NodeId, NodeKind, NodeStatus, Packet,
    PacketCategory, PacketId, Position,
};
