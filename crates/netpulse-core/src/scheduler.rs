// ── Packet scheduler ──
//
// Owns the live packet set and the tick loop that animates it. Explicit
// Idle/Running state machine: `start` spawns the loop task, `stop`
// cancels it and joins it before returning, `reset` additionally clears
// the live set. The cancellation contract is the part hosts depend on —
// the visualization is mounted and unmounted repeatedly, and a leaked
// ticker is a correctness bug, not a performance one.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::SimConfig;
use crate::model::{PROTOCOL_LABELS, Packet, PacketCategory, PacketId, SIZE_LABELS};
use crate::stream::SnapshotStream;
use crate::topology::Topology;

/// RNG stream salt for packet decisions (vs. metric jitter).
const RNG_SALT: u64 = 0x70_6b_74; // "pkt"

/// Scheduler lifecycle state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not ticking. The live set may still hold packets until `reset`.
    Idle,
    /// Tick loop active.
    Running,
}

/// A spawned loop task plus the token that cancels it.
///
/// Shared by the scheduler and the sampler — both teardown paths are
/// cancel-then-join, so no callback fires after `stop` resolves.
pub(crate) struct RunHandle {
    pub(crate) cancel: CancellationToken,
    pub(crate) task: JoinHandle<()>,
}

impl RunHandle {
    pub(crate) async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

// ── Engine ───────────────────────────────────────────────────────────

/// Pure tick logic plus the live packet set it mutates.
///
/// Owned by the scheduler and driven either by the loop task or by
/// manual [`PacketScheduler::tick`] calls — both go through the same
/// code path, so single-stepping in tests exercises the real algorithm.
struct PacketEngine {
    live: VecDeque<Packet>,
    next_id: u64,
    rng: ChaCha8Rng,
    step_rate: f64,
    spawn_probability: f64,
    max_live: usize,
}

impl PacketEngine {
    fn new(config: &SimConfig) -> Self {
        Self {
            live: VecDeque::new(),
            next_id: 0,
            rng: config.rng(RNG_SALT),
            step_rate: config.step_rate,
            spawn_probability: config.spawn_probability,
            max_live: config.max_live_packets,
        }
    }

    /// One simulation step. Advancement strictly precedes spawning, so a
    /// packet never advances in the tick that created it.
    fn tick(&mut self, topology: &Topology, elapsed_fraction: f64) {
        let step = self.step_rate * elapsed_fraction.max(0.0);

        // 1. Advance. Completed packets leave the set in the same tick;
        //    packets on a vanished edge are dropped rather than crashing
        //    the loop.
        self.live.retain_mut(|packet| {
            if topology.edge(&packet.edge).is_none() {
                warn!(packet = %packet.id, edge = %packet.edge,
                    "live packet references missing edge — dropping");
                return false;
            }
            packet.progress += step;
            !packet.is_complete()
        });

        // 2. Spawn at most one packet per tick.
        if self.rng.gen_range(0.0..1.0) < self.spawn_probability {
            self.spawn(topology);
        }

        // 3. Bounded memory under pathological spawn rates: evict oldest.
        while self.live.len() > self.max_live {
            self.live.pop_front();
        }
    }

    /// Spawn one packet on a uniformly chosen active edge. Skips the
    /// tick silently when no usable edge exists.
    fn spawn(&mut self, topology: &Topology) {
        let candidates: Vec<&crate::model::Edge> = topology
            .active_edges()
            .filter(|edge| {
                let resolvable =
                    topology.node(&edge.from).is_some() && topology.node(&edge.to).is_some();
                if !resolvable {
                    warn!(edge = %edge.id, "active edge with missing endpoint — skipping");
                }
                resolvable
            })
            .collect();

        let Some(edge) = candidates.choose(&mut self.rng) else {
            return;
        };

        let id = PacketId::new(self.next_id);
        self.next_id += 1;

        let category = PacketCategory::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(PacketCategory::Data);
        let size_label = SIZE_LABELS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("64 B");
        let protocol_label = PROTOCOL_LABELS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("TCP");

        self.live.push_back(Packet {
            id,
            edge: edge.id.clone(),
            progress: 0.0,
            category,
            size_label: size_label.to_owned(),
            protocol_label: protocol_label.to_owned(),
        });
    }

    fn snapshot(&self) -> Arc<Vec<Packet>> {
        Arc::new(self.live.iter().cloned().collect())
    }
}

// ── Scheduler ────────────────────────────────────────────────────────

/// Animates synthetic packets across the active edges of a topology.
///
/// Cheaply cloneable via `Arc`; constructed by
/// [`Simulation`](crate::Simulation).
#[derive(Clone)]
pub struct PacketScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    topology: Arc<ArcSwap<Topology>>,
    tick_interval: Duration,
    engine: Mutex<PacketEngine>,
    live: watch::Sender<Arc<Vec<Packet>>>,
    state: watch::Sender<SchedulerState>,
    run: Mutex<Option<RunHandle>>,
}

impl PacketScheduler {
    pub(crate) fn new(config: &SimConfig, topology: Arc<ArcSwap<Topology>>) -> Self {
        let (live, _) = watch::channel(Arc::new(Vec::new()));
        let (state, _) = watch::channel(SchedulerState::Idle);

        Self {
            inner: Arc::new(SchedulerInner {
                topology,
                tick_interval: config.tick_interval,
                engine: Mutex::new(PacketEngine::new(config)),
                live,
                state,
                run: Mutex::new(None),
            }),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Transition to `Running` and spawn the recurring tick task.
    /// No-op while already running — a second call must not create a
    /// second ticker.
    pub async fn start(&self) {
        let mut run = self.inner.run.lock().await;
        if run.is_some() {
            debug!("scheduler already running — start ignored");
            return;
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(tick_loop(Arc::clone(&self.inner), cancel.clone()));
        *run = Some(RunHandle { cancel, task });
        self.inner.state.send_replace(SchedulerState::Running);
        debug!("scheduler started");
    }

    /// Transition to `Idle`. The loop task is cancelled *and joined*
    /// before this returns — no tick fires afterwards. Live packets are
    /// retained; use [`reset`](Self::reset) to clear them.
    pub async fn stop(&self) {
        let handle = self.inner.run.lock().await.take();
        if let Some(handle) = handle {
            handle.shutdown().await;
            debug!("scheduler stopped");
        }
        self.inner.state.send_replace(SchedulerState::Idle);
    }

    /// `stop()` followed by clearing the live packet set. Safe in any
    /// state; always lands in `Idle` with an empty set.
    pub async fn reset(&self) {
        self.stop().await;
        self.inner.engine.lock().await.live.clear();
        self.inner.live.send_replace(Arc::new(Vec::new()));
        debug!("scheduler reset");
    }

    /// Advance the simulation by one manual step. The loop task calls
    /// the same path with a measured `elapsed_fraction`; hosts and tests
    /// can single-step with `1.0`.
    pub async fn tick(&self, elapsed_fraction: f64) {
        run_tick(&self.inner, elapsed_fraction).await;
    }

    // ── Read-only views ──────────────────────────────────────────────

    /// Consistent snapshot of the live packets, for rendering. Never a
    /// reference into scheduler-owned state.
    pub fn live_packets(&self) -> Arc<Vec<Packet>> {
        self.inner.live.borrow().clone()
    }

    /// Reactive subscription to live-packet snapshots.
    pub fn packets(&self) -> SnapshotStream<Packet> {
        SnapshotStream::new(self.inner.live.subscribe())
    }

    /// Subscribe to lifecycle state changes.
    pub fn state(&self) -> watch::Receiver<SchedulerState> {
        self.inner.state.subscribe()
    }

    pub fn is_running(&self) -> bool {
        *self.inner.state.borrow() == SchedulerState::Running
    }
}

/// Shared tick path for the loop task and manual stepping.
async fn run_tick(inner: &SchedulerInner, elapsed_fraction: f64) {
    let topology = inner.topology.load_full();
    let mut engine = inner.engine.lock().await;
    engine.tick(&topology, elapsed_fraction);
    let snapshot = engine.snapshot();
    drop(engine);
    inner.live.send_replace(snapshot);
}

async fn tick_loop(inner: Arc<SchedulerInner>, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(inner.tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let nominal = inner.tick_interval.as_secs_f64();
    let mut last = tokio::time::Instant::now();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let now = tokio::time::Instant::now();
                let elapsed_fraction = (now - last).as_secs_f64() / nominal;
                last = now;
                run_tick(&inner, elapsed_fraction).await;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Edge, LinkMedium, Node, NodeKind, Position};

    fn two_node_topology(active: bool) -> Topology {
        let a = Node::new("a", "A", NodeKind::Gateway, "10.0.0.1", Position::new(0.0, 0.0));
        let b = Node::new("b", "B", NodeKind::Server, "10.0.0.2", Position::new(1.0, 0.0));
        let edge = Edge::new("a-b", "a", "b", LinkMedium::Fiber, "10 Gbps").with_active(active);
        Topology::new(vec![a, b], vec![edge]).unwrap()
    }

    fn engine(spawn_probability: f64, step_rate: f64, max_live: usize) -> PacketEngine {
        PacketEngine::new(&SimConfig {
            spawn_probability,
            step_rate,
            max_live_packets: max_live,
            seed: Some(42),
            ..SimConfig::default()
        })
    }

    #[test]
    fn forced_spawn_produces_one_packet_per_tick() {
        let topo = two_node_topology(true);
        let mut engine = engine(1.0, 1.0, 10_000);

        for _ in 0..100 {
            engine.tick(&topo, 1.0);
        }

        // step_rate 1.0: the first packet reaches 100 on its 100th
        // advancement, i.e. none has completed yet after 100 ticks.
        assert_eq!(engine.live.len(), 100);
        assert_eq!(engine.next_id, 100);
        assert!(
            engine
                .live
                .iter()
                .any(|p| p.progress > 0.0 && p.progress < 100.0)
        );
    }

    #[test]
    fn completed_packets_leave_the_set_in_the_same_tick() {
        let topo = two_node_topology(true);
        let mut engine = engine(0.0, 50.0, 100);
        engine.live.push_back(Packet {
            id: PacketId::new(99),
            edge: "a-b".into(),
            progress: 60.0,
            category: PacketCategory::Data,
            size_label: "64 B".into(),
            protocol_label: "TCP".into(),
        });

        engine.tick(&topo, 1.0);
        assert!(engine.live.is_empty());
    }

    #[test]
    fn progress_never_decreases() {
        let topo = two_node_topology(true);
        let mut engine = engine(1.0, 2.0, 1000);
        engine.tick(&topo, 1.0);
        let mut previous: Vec<(PacketId, f64)> =
            engine.live.iter().map(|p| (p.id, p.progress)).collect();

        for _ in 0..50 {
            engine.tick(&topo, 1.0);
            for (id, progress) in &previous {
                if let Some(packet) = engine.live.iter().find(|p| p.id == *id) {
                    assert!(packet.progress >= *progress);
                }
            }
            previous = engine.live.iter().map(|p| (p.id, p.progress)).collect();
        }
    }

    #[test]
    fn no_active_edge_means_no_spawn() {
        let topo = two_node_topology(false);
        let mut engine = engine(1.0, 1.0, 100);

        for _ in 0..20 {
            engine.tick(&topo, 1.0);
        }
        assert!(engine.live.is_empty());
        assert_eq!(engine.next_id, 0);
    }

    #[test]
    fn live_set_is_capped_oldest_first() {
        let topo = two_node_topology(true);
        let mut engine = engine(1.0, 0.1, 5);

        for _ in 0..20 {
            engine.tick(&topo, 1.0);
        }
        assert_eq!(engine.live.len(), 5);
        // Oldest ids were evicted; the newest five remain.
        let ids: Vec<u64> = engine.live.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![15, 16, 17, 18, 19]);
    }

    #[test]
    fn empty_topology_ticks_without_spawning() {
        let topo = Topology::default();
        let mut engine = engine(1.0, 1.0, 100);
        engine.tick(&topo, 1.0);
        assert!(engine.live.is_empty());
    }
}
