//! Clap derive structures for the `netpulse` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netpulse -- synthetic network traffic simulator
#[derive(Debug, Parser)]
#[command(
    name = "netpulse",
    version,
    about = "Simulate live packet flow and metrics over a network topology",
    long_about = "Animates synthetic packets across a topology graph and produces\n\
        a rolling window of network metrics, without touching a real network.\n\n\
        Runs against a built-in demo topology by default; pass --topology to\n\
        load your own from a JSON file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Topology JSON file (defaults to the built-in demo topology)
    #[arg(long, short = 't', env = "NETPULSE_TOPOLOGY", global = true)]
    pub topology: Option<PathBuf>,

    /// RNG seed for reproducible runs
    #[arg(long, env = "NETPULSE_SEED", global = true)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NETPULSE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the live simulation until interrupted
    Run(RunArgs),

    /// Inspect and validate topologies
    #[command(alias = "topo")]
    Topology(TopologyArgs),

    /// Step the packet scheduler deterministically and print the result
    #[command(alias = "pkt")]
    Packets(PacketsArgs),

    /// Collect network metric samples
    #[command(alias = "m")]
    Metrics(MetricsArgs),
}

// ── run ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Stop after this many seconds (default: run until Ctrl-C)
    #[arg(long, short = 'd')]
    pub duration: Option<u64>,

    /// Scheduler tick interval in milliseconds
    #[arg(long, default_value = "100")]
    pub tick_ms: u64,

    /// Probability of spawning a packet per tick (0..=1)
    #[arg(long)]
    pub spawn_probability: Option<f64>,

    /// Metric sampling interval in milliseconds
    #[arg(long, default_value = "1000")]
    pub sample_ms: u64,
}

// ── topology ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TopologyArgs {
    #[command(subcommand)]
    pub command: TopologyCommand,
}

#[derive(Debug, Subcommand)]
pub enum TopologyCommand {
    /// List nodes and links
    Show,

    /// Check a topology file for structural errors
    Validate,

    /// Show one node with its neighboring links
    Node(NodeArgs),
}

#[derive(Debug, Args)]
pub struct NodeArgs {
    /// Node identifier
    pub id: String,
}

// ── packets ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PacketsArgs {
    /// Number of scheduler ticks to run
    #[arg(long, short = 'n', default_value = "10")]
    pub ticks: u32,

    /// Probability of spawning a packet per tick (0..=1)
    #[arg(long)]
    pub spawn_probability: Option<f64>,
}

// ── metrics ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Number of samples to collect
    #[arg(long, short = 'n', default_value = "5")]
    pub count: usize,

    /// Sampling interval in milliseconds
    #[arg(long, default_value = "250")]
    pub interval_ms: u64,
}
