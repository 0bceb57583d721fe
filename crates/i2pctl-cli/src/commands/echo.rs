// crates/i2pctl-cli/src/commands/echo.rs
//
// `i2pctl echo <text>`: round-trip a string through the router.

use clap::Args;
use serde_json::Value;

use i2pctl_core::protocol::{METHOD_ECHO, PARAM_ECHO, PARAM_RESULT};
use i2pctl_core::{to_markup, Params};

use super::{call_checked, connect, Context};
use crate::output::{format_json, OutputFormat};

/// Echo command.
#[derive(Debug, Args)]
pub struct EchoCmd {
    /// Text the router should send back.
    #[arg()]
    pub text: String,
}

/// Run the echo command.
pub async fn run(ctx: &Context, cmd: &EchoCmd) -> Result<(), Box<dyn std::error::Error>> {
    let session = connect(ctx).await?;

    let mut params = Params::new();
    params.insert(PARAM_ECHO.to_string(), Value::String(cmd.text.clone()));
    let result = call_checked(&session, METHOD_ECHO, params).await?;

    let echoed = result.get(PARAM_RESULT).cloned().unwrap_or(Value::Null);
    match ctx.format {
        OutputFormat::Table => println!("{}", to_markup(&echoed)),
        OutputFormat::Json => println!("{}", format_json(&result)),
    }

    if echoed != Value::String(cmd.text.clone()) {
        tracing::warn!("Router echoed {} instead of the text sent", echoed);
    }
    Ok(())
}
