// ── Simulation facade ──
//
// The entry point hosts construct and own. Wires the topology handle,
// scheduler, sampler, and interaction state together, and guarantees
// deterministic teardown: `shutdown()` joins both loop tasks before
// returning, so an unmounted visualization leaves nothing ticking.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::config::SimConfig;
use crate::error::CoreError;
use crate::interaction::Interaction;
use crate::model::{Edge, EdgeId, Node, NodeId, NodeStatus};
use crate::sampler::MetricsSampler;
use crate::scheduler::PacketScheduler;
use crate::topology::Topology;

/// One owned visualization session.
///
/// Constructed from a validated topology and config, never a global.
/// The owner calls [`shutdown`](Self::shutdown) and the loops are
/// verifiably gone when it returns.
pub struct Simulation {
    config: SimConfig,
    topology: Arc<ArcSwap<Topology>>,
    scheduler: PacketScheduler,
    sampler: MetricsSampler,
    interaction: Interaction,
}

impl Simulation {
    /// Build a session from an already-validated topology.
    pub fn new(topology: Topology, config: SimConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let topology = Arc::new(ArcSwap::from_pointee(topology));
        let scheduler = PacketScheduler::new(&config, Arc::clone(&topology));
        let sampler = MetricsSampler::new(&config);
        let interaction = Interaction::new(Arc::clone(&topology));

        Ok(Self {
            config,
            topology,
            scheduler,
            sampler,
            interaction,
        })
    }

    /// Convenience: validate and build the topology from raw node/edge
    /// lists, then the session.
    pub fn from_parts(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        config: SimConfig,
    ) -> Result<Self, CoreError> {
        Self::new(Topology::new(nodes, edges)?, config)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    // ── Components ───────────────────────────────────────────────────

    pub fn scheduler(&self) -> &PacketScheduler {
        &self.scheduler
    }

    pub fn sampler(&self) -> &MetricsSampler {
        &self.sampler
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut Interaction {
        &mut self.interaction
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Start both loops (scheduler tick + metrics sampling). Idempotent,
    /// like the per-component `start`s.
    pub async fn start(&self) {
        self.scheduler.start().await;
        self.sampler.start(self.config.sample_interval).await;
        info!(
            nodes = self.topology.load().node_count(),
            edges = self.topology.load().edge_count(),
            "simulation started"
        );
    }

    /// Stop both loops deterministically. No tick or sample fires after
    /// this returns.
    pub async fn shutdown(&self) {
        self.scheduler.stop().await;
        self.sampler.stop().await;
        info!("simulation shut down");
    }

    // ── Topology surface ─────────────────────────────────────────────

    /// Consistent snapshot of the graph for rendering. Cheap `Arc`
    /// clone; never a reference into mutable state.
    pub fn topology(&self) -> Arc<Topology> {
        self.topology.load_full()
    }

    /// Update one node's status. Returns `false` for unknown ids.
    /// RCU write — concurrent readers keep their consistent snapshot.
    pub fn set_node_status(&self, id: &NodeId, status: NodeStatus) -> bool {
        let mut updated = false;
        self.topology.rcu(|current| {
            let mut next = Topology::clone(current);
            updated = next.set_node_status(id, status);
            next
        });
        updated
    }

    /// Toggle one edge's eligibility to carry packets. Returns `false`
    /// for unknown ids.
    pub fn set_edge_active(&self, id: &EdgeId, active: bool) -> bool {
        let mut updated = false;
        self.topology.rcu(|current| {
            let mut next = Topology::clone(current);
            updated = next.set_edge_active(id, active);
            next
        });
        updated
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{LinkMedium, NodeKind, Position};

    fn parts() -> (Vec<Node>, Vec<Edge>) {
        let nodes = vec![
            Node::new("a", "A", NodeKind::Gateway, "10.0.0.1", Position::new(0.0, 0.0)),
            Node::new("b", "B", NodeKind::Server, "10.0.0.2", Position::new(1.0, 1.0)),
        ];
        let edges = vec![Edge::new("a-b", "a", "b", LinkMedium::Fiber, "10 Gbps")];
        (nodes, edges)
    }

    #[test]
    fn rejects_invalid_config() {
        let (nodes, edges) = parts();
        let config = SimConfig {
            spawn_probability: -0.1,
            ..SimConfig::default()
        };
        assert!(matches!(
            Simulation::from_parts(nodes, edges, config),
            Err(CoreError::Config { .. })
        ));
    }

    #[test]
    fn rejects_invalid_topology() {
        let (nodes, _) = parts();
        let edges = vec![Edge::new("bad", "a", "ghost", LinkMedium::Copper, "1 Gbps")];
        assert!(matches!(
            Simulation::from_parts(nodes, edges, SimConfig::default()),
            Err(CoreError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn topology_mutations_are_visible_to_new_snapshots() {
        let (nodes, edges) = parts();
        let sim = Simulation::from_parts(nodes, edges, SimConfig::default()).unwrap();

        let before = sim.topology();
        assert!(sim.set_node_status(&"a".into(), NodeStatus::Warning));
        assert!(sim.set_edge_active(&"a-b".into(), false));

        // The old snapshot is untouched; a fresh one sees both writes.
        assert_eq!(before.node(&"a".into()).unwrap().status, NodeStatus::Online);
        let after = sim.topology();
        assert_eq!(after.node(&"a".into()).unwrap().status, NodeStatus::Warning);
        assert!(!after.edge(&"a-b".into()).unwrap().active);

        assert!(!sim.set_node_status(&"ghost".into(), NodeStatus::Offline));
    }
}
