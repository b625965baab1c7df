//! Metrics sampler lifecycle tests under tokio's paused clock.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use netpulse_core::{MetricsSampler, SimConfig};

fn seeded_config() -> SimConfig {
    SimConfig {
        seed: Some(42),
        ..SimConfig::default()
    }
}

fn sampler(config: &SimConfig) -> MetricsSampler {
    // Standalone sampler, the way dashboards without a packet layer use it.
    MetricsSampler::new(config)
}

#[tokio::test(start_paused = true)]
async fn emits_one_sample_per_interval() {
    let config = seeded_config();
    let sampler = sampler(&config);

    sampler.start(config.sample_interval).await;
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    sampler.stop().await;

    // 5500ms at a 1s cadence: five full intervals, plus at most one for
    // the ticker's immediate first fire.
    let samples = sampler.snapshot();
    assert!(
        (5..=6).contains(&samples.len()),
        "expected 5..=6 samples, got {}",
        samples.len()
    );
}

#[tokio::test(start_paused = true)]
async fn timestamps_strictly_increase() {
    let config = seeded_config();
    let sampler = sampler(&config);

    sampler.start(config.sample_interval).await;
    tokio::time::sleep(Duration::from_secs(10)).await;
    sampler.stop().await;

    let samples = sampler.snapshot();
    assert!(samples.len() >= 2);
    for pair in samples.windows(2) {
        assert!(pair[1].timestamp > pair[0].timestamp);
    }
}

#[tokio::test(start_paused = true)]
async fn ring_is_trimmed_to_capacity() {
    let config = SimConfig {
        sample_capacity: 4,
        ..seeded_config()
    };
    let sampler = sampler(&config);

    sampler.start(config.sample_interval).await;
    tokio::time::sleep(Duration::from_secs(12)).await;
    sampler.stop().await;

    let samples = sampler.snapshot();
    assert_eq!(samples.len(), 4);
    // Oldest entries were evicted, so the window ends at the newest.
    for pair in samples.windows(2) {
        assert!(pair[1].timestamp > pair[0].timestamp);
    }
}

#[tokio::test(start_paused = true)]
async fn stop_quiesces_and_restart_appends() {
    let config = seeded_config();
    let sampler = sampler(&config);

    sampler.start(config.sample_interval).await;
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    sampler.stop().await;
    assert!(!sampler.is_running());

    let frozen = sampler.snapshot().len();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(sampler.snapshot().len(), frozen);

    // History survives a stop; a restart keeps appending to it.
    sampler.start(config.sample_interval).await;
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    sampler.stop().await;
    assert!(sampler.snapshot().len() > frozen);
}

#[tokio::test(start_paused = true)]
async fn start_is_idempotent() {
    let config = seeded_config();
    let sampler = sampler(&config);

    sampler.start(config.sample_interval).await;
    sampler.start(config.sample_interval).await;
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    sampler.stop().await;

    assert!(sampler.snapshot().len() <= 6);
}

#[tokio::test(start_paused = true)]
async fn snapshot_stream_sees_each_publish() {
    let config = seeded_config();
    let sampler = sampler(&config);
    let mut stream = sampler.samples();

    sampler.start(config.sample_interval).await;
    let first = stream.changed().await.unwrap();
    let second = stream.changed().await.unwrap();
    sampler.stop().await;

    assert!(second.len() > first.len());
}
