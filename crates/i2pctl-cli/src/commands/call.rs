// crates/i2pctl-cli/src/commands/call.rs
//
// `i2pctl call <METHOD> [--params JSON]`: issue any method by name.
//
// Unlike the other commands, an error inside the result is printed rather
// than treated as a failure, so the caller sees exactly what came back.

use clap::Args;
use serde_json::Value;

use i2pctl_core::{ControlError, Params};

use super::{connect, Context};
use crate::output::render_result;

/// Raw call command.
#[derive(Debug, Args)]
pub struct CallCmd {
    /// Method name, e.g. RouterInfo or NetworkSetting.
    #[arg()]
    pub method: String,

    /// Params as a JSON object. The session token is added automatically.
    #[arg(long, default_value = "{}")]
    pub params: String,
}

/// Parse `--params` into a params object.
fn parse_params(raw: &str) -> Result<Params, ControlError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ControlError::InvalidParams(format!(
            "params must be a JSON object, got {}",
            other
        ))),
        Err(e) => Err(ControlError::InvalidParams(e.to_string())),
    }
}

/// Run the call command.
pub async fn run(ctx: &Context, cmd: &CallCmd) -> Result<(), Box<dyn std::error::Error>> {
    let params = parse_params(&cmd.params)?;
    let session = connect(ctx).await?;

    let response = session
        .call_envelope(&cmd.method, params)
        .await?
        .ok_or("no response (non-200 status or empty body)")?;
    if let Some(err) = response.rpc_error() {
        eprintln!("{}", err);
    }

    println!("{}", render_result(&response.into_result(), ctx.format));
    Ok(())
}
