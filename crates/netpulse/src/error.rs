//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use netpulse_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const VALIDATION: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const IO: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Could not read topology file {}", path.display())]
    #[diagnostic(
        code(netpulse::topology_read),
        help("Check that the file exists and is readable.")
    )]
    TopologyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Topology file {} is not valid JSON", path.display())]
    #[diagnostic(
        code(netpulse::topology_parse),
        help(
            "The file must contain a JSON object with `nodes` and `edges` arrays.\n\
             Run: netpulse topology show (without --topology) to see the expected shape."
        )
    )]
    TopologyParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid topology: {message}")]
    #[diagnostic(code(netpulse::topology_invalid))]
    TopologyInvalid { message: String },

    #[error("Invalid simulation settings: {message}")]
    #[diagnostic(code(netpulse::config_invalid))]
    ConfigInvalid { message: String },

    #[error("Node '{id}' not found")]
    #[diagnostic(
        code(netpulse::not_found),
        help("Run: netpulse topology show to list known nodes")
    )]
    NodeNotFound { id: String },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TopologyRead { .. } => exit_code::IO,
            Self::TopologyParse { .. }
            | Self::TopologyInvalid { .. }
            | Self::ConfigInvalid { .. } => exit_code::VALIDATION,
            Self::NodeNotFound { .. } => exit_code::NOT_FOUND,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => Self::TopologyInvalid { message },
            CoreError::Config { message } => Self::ConfigInvalid { message },
        }
    }
}
