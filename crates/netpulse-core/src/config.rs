// ── Simulation tuning ──
//
// The defaults here were tuned by eye against the demo topology; they are
// configuration, not load-bearing invariants. The host builds a
// `SimConfig` and hands it in — the core never reads disk.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::CoreError;

/// Tuning for one [`Simulation`](crate::Simulation) instance.
///
/// Validated once at construction via [`validate`](Self::validate).
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Nominal scheduler tick period.
    pub tick_interval: Duration,
    /// Packet progress gained per tick at `elapsed_fraction = 1.0`
    /// (percent of edge length).
    pub step_rate: f64,
    /// Per-tick probability of spawning one packet, in [0, 1].
    pub spawn_probability: f64,
    /// Hard cap on the live packet set; oldest packets are evicted first.
    pub max_live_packets: usize,
    /// Metrics sampling period used by [`Simulation::start`](crate::Simulation::start).
    pub sample_interval: Duration,
    /// Ring-buffer capacity of the metrics history (sample count).
    pub sample_capacity: usize,
    /// Largest change any percent-scale metric field may make between two
    /// consecutive samples. Downstream charts assume locally smooth series.
    pub metric_max_step: f64,
    /// Seed for the packet and metric RNG streams. `None` seeds from the
    /// OS; tests set it to make spawn/jitter sequences reproducible.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            step_rate: 2.5,
            spawn_probability: 0.3,
            max_live_packets: 1000,
            sample_interval: Duration::from_secs(1),
            sample_capacity: 60,
            metric_max_step: 8.0,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Check every knob for a usable value.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.tick_interval.is_zero() {
            return Err(CoreError::config("tick_interval must be non-zero"));
        }
        if self.sample_interval.is_zero() {
            return Err(CoreError::config("sample_interval must be non-zero"));
        }
        if !self.step_rate.is_finite() || self.step_rate <= 0.0 {
            return Err(CoreError::config("step_rate must be positive"));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(CoreError::config(format!(
                "spawn_probability must be within [0, 1], got {}",
                self.spawn_probability
            )));
        }
        if self.max_live_packets == 0 {
            return Err(CoreError::config("max_live_packets must be positive"));
        }
        if self.sample_capacity == 0 {
            return Err(CoreError::config("sample_capacity must be positive"));
        }
        if !self.metric_max_step.is_finite() || self.metric_max_step <= 0.0 {
            return Err(CoreError::config("metric_max_step must be positive"));
        }
        Ok(())
    }

    /// Derive an RNG for one component. `salt` separates the packet and
    /// metric streams so they stay independent under a shared seed.
    pub(crate) fn rng(&self, salt: u64) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed ^ salt),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let config = SimConfig {
            spawn_probability: 1.5,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::Config { .. })
        ));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let config = SimConfig {
            tick_interval: Duration::ZERO,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn seeded_rng_streams_are_reproducible_and_distinct() {
        use rand::RngCore;

        let config = SimConfig {
            seed: Some(7),
            ..SimConfig::default()
        };
        let mut a = config.rng(1);
        let mut b = config.rng(1);
        let mut c = config.rng(2);
        assert_eq!(a.next_u64(), b.next_u64());
        assert_ne!(a.next_u64(), c.next_u64());
    }
}
