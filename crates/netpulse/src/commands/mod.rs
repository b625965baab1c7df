//! Command handlers and dispatch.

pub mod metrics;
pub mod packets;
pub mod run;
pub mod topology_cmd;
pub mod util;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Run(args) => run::handle(&args, &cli.global).await,
        Command::Topology(args) => topology_cmd::handle(&args, &cli.global),
        Command::Packets(args) => packets::handle(&args, &cli.global).await,
        Command::Metrics(args) => metrics::handle(&args, &cli.global).await,
    }
}
