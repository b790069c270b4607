//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod config_cmd;
pub mod net;
pub mod submodels;
pub mod system;

use boardwatch_api::SubmodelClient;
use boardwatch_core::DashboardConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &SubmodelClient,
    dashboard: &DashboardConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Submodels => submodels::handle(client, global).await,
        Command::System(args) => system::handle(client, dashboard, args, global).await,
        Command::Network(args) => net::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
