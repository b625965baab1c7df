// ── Metrics sampler ──
//
// Produces one synthetic performance sample per interval and retains a
// bounded recent window for charting. Same lifecycle contract as the
// scheduler: idempotent start, cancel-then-join stop, snapshot reads
// that never touch sampler-owned state.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::SimConfig;
use crate::model::MetricSample;
use crate::scheduler::RunHandle;
use crate::stream::SnapshotStream;

/// RNG stream salt for metric jitter (vs. packet decisions).
const RNG_SALT: u64 = 0x6d_65_74; // "met"

// ── Generation ───────────────────────────────────────────────────────

/// One metric field as a bounded random walk.
///
/// Each step moves the value by at most `step`, then clamps into
/// `[min, max]` — so consecutive samples never differ by more than the
/// configured maximum and charts stay locally smooth.
#[derive(Debug, Clone)]
struct Channel {
    value: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl Channel {
    fn new(start: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            value: start.clamp(min, max),
            min,
            max,
            step,
        }
    }

    fn advance(&mut self, rng: &mut ChaCha8Rng) -> f64 {
        let delta = rng.gen_range(-self.step..=self.step);
        self.value = (self.value + delta).clamp(self.min, self.max);
        self.value
    }
}

/// Deterministic (when seeded) generator for the full sample vector.
struct SampleGenerator {
    rng: ChaCha8Rng,
    inbound: Channel,
    outbound: Channel,
    latency: Channel,
    loss: Channel,
    connections: Channel,
    cpu: Channel,
    memory: Channel,
    last_timestamp: Option<DateTime<Utc>>,
}

impl SampleGenerator {
    fn new(config: &SimConfig) -> Self {
        // `metric_max_step` is percent-scale; wider-range channels scale
        // it by range/100 so every field honors the same relative bound.
        let pct = config.metric_max_step;
        let scaled = |range: f64| pct * range / 100.0;

        Self {
            rng: config.rng(RNG_SALT),
            inbound: Channel::new(420.0, 0.0, 1000.0, scaled(1000.0)),
            outbound: Channel::new(180.0, 0.0, 1000.0, scaled(1000.0)),
            latency: Channel::new(18.0, 1.0, 250.0, scaled(250.0)),
            loss: Channel::new(0.4, 0.0, 100.0, pct.min(1.5)),
            connections: Channel::new(120.0, 0.0, 500.0, scaled(500.0)),
            cpu: Channel::new(35.0, 0.0, 100.0, pct),
            memory: Channel::new(55.0, 0.0, 100.0, pct),
            last_timestamp: None,
        }
    }

    /// Produce the next sample. Timestamps are forced strictly
    /// increasing — a wall-clock reading that collides with the previous
    /// sample is nudged forward by 1 ms so chart x-axes never collapse.
    #[allow(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn next(&mut self) -> MetricSample {
        let mut timestamp = Utc::now();
        if let Some(last) = self.last_timestamp {
            if timestamp <= last {
                timestamp = last + chrono::Duration::milliseconds(1);
            }
        }
        self.last_timestamp = Some(timestamp);

        MetricSample {
            timestamp,
            inbound_mbps: self.inbound.advance(&mut self.rng),
            outbound_mbps: self.outbound.advance(&mut self.rng),
            latency_ms: self.latency.advance(&mut self.rng),
            packet_loss_pct: self.loss.advance(&mut self.rng),
            active_connections: self.connections.advance(&mut self.rng).round() as u32,
            cpu_pct: self.cpu.advance(&mut self.rng),
            memory_pct: self.memory.advance(&mut self.rng),
        }
    }
}

// ── Sampler ──────────────────────────────────────────────────────────

/// Generator plus the bounded FIFO ring it feeds. Survives stop/start
/// cycles so a restarted sampler continues the series.
struct SamplerState {
    generator: SampleGenerator,
    ring: VecDeque<MetricSample>,
}

/// Periodic producer of [`MetricSample`]s with a bounded history.
///
/// Cheaply cloneable via `Arc`. Usually constructed by
/// [`Simulation`](crate::Simulation), but usable on its own for
/// dashboards with no packet layer.
#[derive(Clone)]
pub struct MetricsSampler {
    inner: Arc<SamplerInner>,
}

struct SamplerInner {
    capacity: usize,
    state: Mutex<SamplerState>,
    snapshot: watch::Sender<Arc<Vec<MetricSample>>>,
    run: Mutex<Option<RunHandle>>,
    running: watch::Sender<bool>,
}

impl MetricsSampler {
    pub fn new(config: &SimConfig) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (running, _) = watch::channel(false);

        Self {
            inner: Arc::new(SamplerInner {
                capacity: config.sample_capacity,
                state: Mutex::new(SamplerState {
                    generator: SampleGenerator::new(config),
                    ring: VecDeque::with_capacity(config.sample_capacity),
                }),
                snapshot,
                run: Mutex::new(None),
                running,
            }),
        }
    }

    /// Begin producing one sample every `interval`. Idempotent: calling
    /// `start` while running is a no-op — a second timer would double
    /// the tick rate, which is a correctness bug, not an optimization
    /// concern.
    pub async fn start(&self, interval: Duration) {
        let mut run = self.inner.run.lock().await;
        if run.is_some() {
            debug!("sampler already running — start ignored");
            return;
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(sample_loop(
            Arc::clone(&self.inner),
            cancel.clone(),
            interval,
        ));
        *run = Some(RunHandle { cancel, task });
        self.inner.running.send_replace(true);
        debug!(interval_ms = interval.as_millis(), "sampler started");
    }

    /// Halt production. The loop task is cancelled *and joined* before
    /// this returns — no sample is appended afterwards, even if a tick
    /// was in flight.
    pub async fn stop(&self) {
        let handle = self.inner.run.lock().await.take();
        if let Some(handle) = handle {
            handle.shutdown().await;
            debug!("sampler stopped");
        }
        self.inner.running.send_replace(false);
    }

    /// Lock-free read of the published lifecycle flag. Accurate even
    /// while the run slot is held by a concurrent `start`/`stop`.
    pub fn is_running(&self) -> bool {
        *self.inner.running.borrow()
    }

    /// Current buffer contents, oldest first. Non-blocking `watch`
    /// read — safe from a render loop at any time.
    pub fn snapshot(&self) -> Arc<Vec<MetricSample>> {
        self.inner.snapshot.borrow().clone()
    }

    /// Reactive subscription to buffer snapshots.
    pub fn samples(&self) -> SnapshotStream<MetricSample> {
        SnapshotStream::new(self.inner.snapshot.subscribe())
    }
}

async fn sample_loop(inner: Arc<SamplerInner>, cancel: CancellationToken, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let mut state = inner.state.lock().await;
                let sample = state.generator.next();
                state.ring.push_back(sample);
                while state.ring.len() > inner.capacity {
                    state.ring.pop_front();
                }
                let snapshot = Arc::new(state.ring.iter().cloned().collect::<Vec<_>>());
                drop(state);
                inner.snapshot.send_replace(snapshot);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn generator(seed: u64, max_step: f64) -> SampleGenerator {
        SampleGenerator::new(&SimConfig {
            seed: Some(seed),
            metric_max_step: max_step,
            ..SimConfig::default()
        })
    }

    #[test]
    fn consecutive_samples_stay_within_max_step() {
        let mut generator = generator(3, 5.0);
        let mut previous = generator.next();

        for _ in 0..200 {
            let sample = generator.next();
            assert!((sample.cpu_pct - previous.cpu_pct).abs() <= 5.0 + f64::EPSILON);
            assert!((sample.memory_pct - previous.memory_pct).abs() <= 5.0 + f64::EPSILON);
            assert!((sample.inbound_mbps - previous.inbound_mbps).abs() <= 50.0 + f64::EPSILON);
            previous = sample;
        }
    }

    #[test]
    fn percent_fields_stay_clamped() {
        let mut generator = generator(11, 50.0);
        for _ in 0..500 {
            let sample = generator.next();
            assert!((0.0..=100.0).contains(&sample.cpu_pct));
            assert!((0.0..=100.0).contains(&sample.memory_pct));
            assert!((0.0..=100.0).contains(&sample.packet_loss_pct));
            assert!(sample.latency_ms >= 1.0);
        }
    }

    #[test]
    fn timestamps_are_strictly_increasing() {
        let mut generator = generator(5, 5.0);
        let mut last = generator.next().timestamp;
        // Generated back-to-back, faster than clock resolution — the
        // monotonic nudge must still separate them.
        for _ in 0..100 {
            let ts = generator.next().timestamp;
            assert!(ts > last);
            last = ts;
        }
    }

    #[tokio::test]
    async fn is_running_is_accurate_while_run_slot_is_locked() {
        let sampler = MetricsSampler::new(&SimConfig::default());

        // A stopped sampler must report false even when another task
        // holds the run slot, as start/stop do mid-transition.
        let guard = sampler.inner.run.lock().await;
        assert!(!sampler.is_running());
        drop(guard);

        sampler.start(Duration::from_millis(10)).await;
        let guard = sampler.inner.run.lock().await;
        assert!(sampler.is_running());
        drop(guard);

        sampler.stop().await;
        assert!(!sampler.is_running());
    }

    #[test]
    fn seeded_generators_repeat_their_series() {
        let mut a = generator(9, 5.0);
        let mut b = generator(9, 5.0);
        for _ in 0..20 {
            let (sa, sb) = (a.next(), b.next());
            assert_eq!(sa.cpu_pct, sb.cpu_pct);
            assert_eq!(sa.inbound_mbps, sb.inbound_mbps);
        }
    }
}
