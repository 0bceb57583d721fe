// crates/i2pctl-core/src/status.rs
//
// Router network status codes (`i2p.router.net.status`) and their labels.

use serde_json::Value;
use std::fmt;

/// Label for any code outside the known table.
pub const UNKNOWN_STATUS: &str = "UNKNOWN";

/// Network reachability/health state reported by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetStatus {
    Ok,
    Testing,
    Firewalled,
    Hidden,
    WarnFirewalledAndFast,
    WarnFirewalledAndFloodfill,
    WarnFirewalledWithInboundTcp,
    WarnFirewalledWithUdpDisabled,
    ErrorI2cp,
    ErrorClockSkew,
    ErrorPrivateTcpAddress,
    ErrorSymmetricNat,
    ErrorUdpPortInUse,
    ErrorNoActivePeersCheckConnectionAndFirewall,
    ErrorUdpDisabledAndTcpUnset,
}

impl NetStatus {
    /// All statuses, indexed by wire code.
    pub const ALL: [NetStatus; 15] = [
        NetStatus::Ok,
        NetStatus::Testing,
        NetStatus::Firewalled,
        NetStatus::Hidden,
        NetStatus::WarnFirewalledAndFast,
        NetStatus::WarnFirewalledAndFloodfill,
        NetStatus::WarnFirewalledWithInboundTcp,
        NetStatus::WarnFirewalledWithUdpDisabled,
        NetStatus::ErrorI2cp,
        NetStatus::ErrorClockSkew,
        NetStatus::ErrorPrivateTcpAddress,
        NetStatus::ErrorSymmetricNat,
        NetStatus::ErrorUdpPortInUse,
        NetStatus::ErrorNoActivePeersCheckConnectionAndFirewall,
        NetStatus::ErrorUdpDisabledAndTcpUnset,
    ];

    /// Look up a wire code; anything outside 0..=14 is `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Wire code of this status.
    pub fn code(&self) -> i64 {
        *self as i64
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetStatus::Ok => "OK",
            NetStatus::Testing => "TESTING",
            NetStatus::Firewalled => "FIREWALLED",
            NetStatus::Hidden => "HIDDEN",
            NetStatus::WarnFirewalledAndFast => "WARN_FIREWALLED_AND_FAST",
            NetStatus::WarnFirewalledAndFloodfill => "WARN_FIREWALLED_AND_FLOODFILL",
            NetStatus::WarnFirewalledWithInboundTcp => "WARN_FIREWALLED_WITH_INBOUND_TCP",
            NetStatus::WarnFirewalledWithUdpDisabled => "WARN_FIREWALLED_WITH_UDP_DISABLED",
            NetStatus::ErrorI2cp => "ERROR_I2CP",
            NetStatus::ErrorClockSkew => "ERROR_CLOCK_SKEW",
            NetStatus::ErrorPrivateTcpAddress => "ERROR_PRIVATE_TCP_ADDRESS",
            NetStatus::ErrorSymmetricNat => "ERROR_SYMMETRIC_NAT",
            NetStatus::ErrorUdpPortInUse => "ERROR_UDP_PORT_IN_USE",
            NetStatus::ErrorNoActivePeersCheckConnectionAndFirewall => {
                "ERROR_NO_ACTIVE_PEERS_CHECK_CONNECTION_AND_FIREWALL"
            }
            NetStatus::ErrorUdpDisabledAndTcpUnset => "ERROR_UDP_DISABLED_AND_TCP_UNSET",
        }
    }
}

impl fmt::Display for NetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for a status code; `"UNKNOWN"` for anything outside the table.
pub fn status_to_string(status: i64) -> &'static str {
    NetStatus::from_code(status)
        .map(|s| s.as_str())
        .unwrap_or(UNKNOWN_STATUS)
}

/// Label for a status as it appears in a result. Any JSON number with an
/// integral value names a status, so `2` and `2.0` agree; strings,
/// fractional numbers, null and the rest are `"UNKNOWN"`.
pub fn status_value_to_string(status: &Value) -> &'static str {
    let code = status.as_i64().or_else(|| {
        status
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    });
    code.map(status_to_string).unwrap_or(UNKNOWN_STATUS)
}
