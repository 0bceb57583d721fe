// crates/i2pctl-cli/src/commands/mod.rs
//
// Command module declarations and the plumbing they share: building an
// authenticated session and turning call outcomes into CLI errors.

pub mod call;
pub mod echo;
pub mod network_setting;
pub mod router_info;
pub mod router_manager;
pub mod status;

use i2pctl_core::{Params, RpcError, RpcResult};
use i2pctl_rpc::{ClientConfig, Session};

use crate::output::OutputFormat;

/// Resolved settings every command runs with.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: ClientConfig,
    pub format: OutputFormat,
}

/// Build a session for the configured endpoint and authenticate it.
pub async fn connect(ctx: &Context) -> Result<Session, Box<dyn std::error::Error>> {
    let session = Session::from_config(&ctx.config)?;
    tracing::debug!("Authenticating against {}", ctx.config.endpoint);

    if !session.authenticate().await? {
        return Err(format!(
            "{} did not answer Authenticate (non-200 status or empty body)",
            ctx.config.endpoint
        )
        .into());
    }
    if session.has_error().await {
        tracing::warn!("Router reported an error while authenticating; continuing without a token");
    }
    Ok(session)
}

/// Issue one call and insist on a clean result.
///
/// Errors reported either inside `result` or on the envelope fail the call.
pub async fn call_checked(
    session: &Session,
    method: &str,
    params: Params,
) -> Result<RpcResult, Box<dyn std::error::Error>> {
    let response = session
        .call_envelope(method, params)
        .await?
        .ok_or_else(|| format!("{} got no response (non-200 status or empty body)", method))?;
    if let Some(err) = response.rpc_error() {
        if is_stale_token(&err) {
            tracing::warn!("{} was refused for its token; a fresh Authenticate may clear it", method);
        }
        return Err(Box::new(err));
    }
    Ok(response.into_result())
}

/// Whether the router refused the call over a missing, unknown or expired
/// token rather than the request itself.
fn is_stale_token(err: &RpcError) -> bool {
    err.error_code().is_some_and(|code| code.is_token_error())
}

/// Params naming each key with a null value, as RouterInfo and
/// RouterManager expect.
pub fn key_params<'a>(keys: impl IntoIterator<Item = &'a str>) -> Params {
    keys.into_iter()
        .map(|k| (k.to_string(), serde_json::Value::Null))
        .collect()
}
