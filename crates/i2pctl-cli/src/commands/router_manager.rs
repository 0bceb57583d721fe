// crates/i2pctl-cli/src/commands/router_manager.rs
//
// `i2pctl router-manager {shutdown, shutdown-graceful, reseed}`: router
// lifecycle requests.

use clap::Subcommand;

use i2pctl_core::protocol::{
    METHOD_ROUTER_MANAGER, ROUTER_MANAGER_RESEED, ROUTER_MANAGER_SHUTDOWN,
    ROUTER_MANAGER_SHUTDOWN_GRACEFUL,
};

use super::{call_checked, connect, key_params, Context};
use crate::output::{format_json, OutputFormat};

/// RouterManager subcommands.
#[derive(Debug, Subcommand)]
pub enum RouterManagerCmd {
    /// Stop the router about one second from now.
    Shutdown,
    /// Stop accepting transit tunnels and stop once they expire.
    ShutdownGraceful,
    /// Fetch fresh router infos from the reseed servers.
    Reseed,
}

impl RouterManagerCmd {
    /// Request key sent to the router.
    fn key(&self) -> &'static str {
        match self {
            RouterManagerCmd::Shutdown => ROUTER_MANAGER_SHUTDOWN,
            RouterManagerCmd::ShutdownGraceful => ROUTER_MANAGER_SHUTDOWN_GRACEFUL,
            RouterManagerCmd::Reseed => ROUTER_MANAGER_RESEED,
        }
    }

    fn done_message(&self) -> &'static str {
        match self {
            RouterManagerCmd::Shutdown => "Shutdown requested.",
            RouterManagerCmd::ShutdownGraceful => {
                "Graceful shutdown requested. The router stops once its transit tunnels expire."
            }
            RouterManagerCmd::Reseed => "Reseed requested.",
        }
    }
}

/// Run the router-manager subcommand.
pub async fn run(ctx: &Context, cmd: &RouterManagerCmd) -> Result<(), Box<dyn std::error::Error>> {
    let session = connect(ctx).await?;
    let result = call_checked(&session, METHOD_ROUTER_MANAGER, key_params([cmd.key()])).await?;
    tracing::info!("RouterManager {} accepted", cmd.key());

    match ctx.format {
        OutputFormat::Table => println!("{}", cmd.done_message()),
        OutputFormat::Json => println!("{}", format_json(&result)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_protocol_names() {
        assert_eq!(RouterManagerCmd::Shutdown.key(), "Shutdown");
        assert_eq!(RouterManagerCmd::ShutdownGraceful.key(), "ShutdownGraceful");
        assert_eq!(RouterManagerCmd::Reseed.key(), "Reseed");
    }
}
