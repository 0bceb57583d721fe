// crates/i2pctl-cli/src/commands/router_info.rs
//
// `i2pctl router-info [KEY...]`: raw RouterInfo query.

use clap::Args;

use i2pctl_core::protocol::{METHOD_ROUTER_INFO, ROUTER_INFO_KEYS};

use super::{call_checked, connect, key_params, Context};
use crate::output::render_result;

/// RouterInfo query command.
#[derive(Debug, Args)]
pub struct RouterInfoCmd {
    /// Keys to query, e.g. i2p.router.version. Defaults to every known key.
    #[arg()]
    pub keys: Vec<String>,
}

impl RouterInfoCmd {
    /// Keys to send: the given ones, or all known keys.
    fn requested(&self) -> Vec<&str> {
        if self.keys.is_empty() {
            ROUTER_INFO_KEYS.to_vec()
        } else {
            self.keys.iter().map(String::as_str).collect()
        }
    }
}

/// Run the router-info command.
pub async fn run(ctx: &Context, cmd: &RouterInfoCmd) -> Result<(), Box<dyn std::error::Error>> {
    let session = connect(ctx).await?;
    let result = call_checked(&session, METHOD_ROUTER_INFO, key_params(cmd.requested())).await?;
    println!("{}", render_result(&result, ctx.format));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keys_means_all_keys() {
        let cmd = RouterInfoCmd { keys: Vec::new() };
        assert_eq!(cmd.requested(), ROUTER_INFO_KEYS.to_vec());
    }

    #[test]
    fn given_keys_are_kept() {
        let cmd = RouterInfoCmd {
            keys: vec!["i2p.router.version".to_string()],
        };
        assert_eq!(cmd.requested(), vec!["i2p.router.version"]);
    }
}
