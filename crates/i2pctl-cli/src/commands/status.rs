// crates/i2pctl-cli/src/commands/status.rs
//
// `i2pctl status`: the router status dashboard.
//
// Queries every RouterInfo key, renders the values into a slot document and
// prints it. The network status code is shown as its label.

use serde_json::{Map, Value};

use i2pctl_core::protocol::{
    METHOD_ROUTER_INFO, ROUTER_INFO_BW_IB_15S, ROUTER_INFO_BW_IB_1S, ROUTER_INFO_BW_OB_15S,
    ROUTER_INFO_BW_OB_1S, ROUTER_INFO_KEYS, ROUTER_INFO_NETDB_ACTIVEPEERS,
    ROUTER_INFO_NETDB_KNOWNPEERS, ROUTER_INFO_NET_STATUS, ROUTER_INFO_STATUS,
    ROUTER_INFO_TOTAL_RECEIVED_BYTES, ROUTER_INFO_TOTAL_SENT_BYTES,
    ROUTER_INFO_TUNNELS_PARTICIPATING, ROUTER_INFO_TUNNELS_SUCCESSRATE, ROUTER_INFO_UPTIME,
    ROUTER_INFO_VERSION,
};
use i2pctl_core::{status_value_to_string, to_markup, update_document, RpcResult, SlotDocument};

use super::{call_checked, connect, key_params, Context};
use crate::output::render_document;

/// The dashboard layout: one slot per RouterInfo key.
fn dashboard() -> SlotDocument {
    SlotDocument::new()
        .with_slot(ROUTER_INFO_VERSION, "Version")
        .with_slot(ROUTER_INFO_UPTIME, "Uptime")
        .with_slot(ROUTER_INFO_STATUS, "Router status")
        .with_slot(ROUTER_INFO_NET_STATUS, "Network status")
        .with_slot(ROUTER_INFO_NETDB_KNOWNPEERS, "Known peers")
        .with_slot(ROUTER_INFO_NETDB_ACTIVEPEERS, "Active peers")
        .with_slot(ROUTER_INFO_TUNNELS_PARTICIPATING, "Participating tunnels")
        .with_slot(ROUTER_INFO_TUNNELS_SUCCESSRATE, "Tunnel success rate")
        .with_slot(ROUTER_INFO_BW_IB_1S, "Inbound (1s)")
        .with_slot(ROUTER_INFO_BW_OB_1S, "Outbound (1s)")
        .with_slot(ROUTER_INFO_BW_IB_15S, "Inbound (15s)")
        .with_slot(ROUTER_INFO_BW_OB_15S, "Outbound (15s)")
        .with_slot(ROUTER_INFO_TOTAL_RECEIVED_BYTES, "Total received")
        .with_slot(ROUTER_INFO_TOTAL_SENT_BYTES, "Total sent")
}

/// Display values for the dashboard, one per RouterInfo key.
///
/// Keys the router left out show as "n/a".
fn display_values(result: &RpcResult) -> Map<String, Value> {
    ROUTER_INFO_KEYS
        .iter()
        .map(|&key| {
            let shown = match (key, result.get(key)) {
                (_, None) | (_, Some(Value::Null)) => "n/a".to_string(),
                (ROUTER_INFO_NET_STATUS, Some(v)) => status_value_to_string(v).to_string(),
                (ROUTER_INFO_UPTIME, Some(v)) => v
                    .as_u64()
                    .map(format_uptime)
                    .unwrap_or_else(|| to_markup(v)),
                (
                    ROUTER_INFO_BW_IB_1S
                    | ROUTER_INFO_BW_OB_1S
                    | ROUTER_INFO_BW_IB_15S
                    | ROUTER_INFO_BW_OB_15S,
                    Some(v),
                ) => v
                    .as_f64()
                    .map(format_bandwidth)
                    .unwrap_or_else(|| to_markup(v)),
                (ROUTER_INFO_TOTAL_RECEIVED_BYTES | ROUTER_INFO_TOTAL_SENT_BYTES, Some(v)) => v
                    .as_f64()
                    .map(format_bytes)
                    .unwrap_or_else(|| to_markup(v)),
                (ROUTER_INFO_TUNNELS_SUCCESSRATE, Some(v)) if v.is_number() => {
                    format!("{}%", v)
                }
                (_, Some(v)) => to_markup(v),
            };
            (key.to_string(), Value::String(shown))
        })
        .collect()
}

/// Milliseconds of uptime as "1d 2h 3m 4s", leading zero units omitted.
fn format_uptime(millis: u64) -> String {
    let secs = millis / 1000;
    let (days, hours, mins, secs) = (secs / 86_400, secs / 3_600 % 24, secs / 60 % 60, secs % 60);
    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, mins, secs)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Bytes per second as KiB/s.
fn format_bandwidth(bytes_per_sec: f64) -> String {
    format!("{:.2} KiB/s", bytes_per_sec / 1024.0)
}

/// A byte count in MiB.
fn format_bytes(bytes: f64) -> String {
    format!("{:.2} MiB", bytes / (1024.0 * 1024.0))
}

/// Run the status command.
pub async fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = connect(ctx).await?;
    let result = call_checked(
        &session,
        METHOD_ROUTER_INFO,
        key_params(ROUTER_INFO_KEYS.iter().copied()),
    )
    .await?;

    let mut doc = dashboard();
    update_document(&mut doc, &display_values(&result))?;

    println!("{}", render_document(&doc, ctx.format));
    Ok(())
}
