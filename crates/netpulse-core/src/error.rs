// ── Core error types ──
//
// Everything fatal in this crate happens at construction time: a malformed
// topology or nonsensical tuning refuses to build a `Simulation`. Runtime
// inconsistencies (dangling edge references, packet-cap overflow) are
// recovered locally inside the tick and never surface as errors — a dead
// animation is worse than a degraded one.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed topology supplied at initialization. Fatal — the
    /// simulation does not start.
    #[error("Topology validation failed: {message}")]
    Validation { message: String },

    /// Rejected tuning values (zero intervals, probabilities outside
    /// [0, 1], zero capacities).
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
