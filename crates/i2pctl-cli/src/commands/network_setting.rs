// crates/i2pctl-cli/src/commands/network_setting.rs
//
// `i2pctl network-setting [--bw-in N] [--bw-out N]`: read or set the router's
// bandwidth limits.

use clap::Args;
use serde_json::Value;

use i2pctl_core::protocol::{METHOD_NETWORK_SETTING, NETWORK_SETTING_BW_IN, NETWORK_SETTING_BW_OUT};
use i2pctl_core::Params;

use super::{call_checked, connect, Context};
use crate::output::render_result;

/// NetworkSetting command. With no flags both limits are read back.
#[derive(Debug, Args)]
pub struct NetworkSettingCmd {
    /// New inbound bandwidth limit in KB/s.
    #[arg(long)]
    pub bw_in: Option<u64>,

    /// New outbound bandwidth limit in KB/s.
    #[arg(long)]
    pub bw_out: Option<u64>,
}

impl NetworkSettingCmd {
    /// Both keys, each null (read) or carrying the new limit (set).
    fn params(&self) -> Params {
        [
            (NETWORK_SETTING_BW_IN, self.bw_in),
            (NETWORK_SETTING_BW_OUT, self.bw_out),
        ]
        .into_iter()
        .map(|(key, limit)| (key.to_string(), limit.map(Value::from).unwrap_or(Value::Null)))
        .collect()
    }
}

/// Run the network-setting command.
pub async fn run(ctx: &Context, cmd: &NetworkSettingCmd) -> Result<(), Box<dyn std::error::Error>> {
    let session = connect(ctx).await?;
    let result = call_checked(&session, METHOD_NETWORK_SETTING, cmd.params()).await?;
    if cmd.bw_in.is_some() || cmd.bw_out.is_some() {
        tracing::info!("NetworkSetting applied");
    }
    println!("{}", render_result(&result, ctx.format));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_flags_reads_both_limits() {
        let cmd = NetworkSettingCmd {
            bw_in: None,
            bw_out: None,
        };
        assert_eq!(
            Value::Object(cmd.params()),
            json!({"i2p.router.net.bw.in": null, "i2p.router.net.bw.out": null})
        );
    }

    #[test]
    fn given_limit_is_sent_as_number() {
        let cmd = NetworkSettingCmd {
            bw_in: Some(512),
            bw_out: None,
        };
        assert_eq!(
            Value::Object(cmd.params()),
            json!({"i2p.router.net.bw.in": 512, "i2p.router.net.bw.out": null})
        );
    }
}
