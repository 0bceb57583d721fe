// crates/i2pctl-core/src/protocol.rs
//
// Method, parameter and request-key names of the I2PControl protocol.

/// JSON-RPC protocol version tag carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request id. Always 0: in-flight requests are not correlated.
pub const REQUEST_ID: u64 = 0;

/// I2PControl API version sent with `Authenticate`.
pub const API_VERSION: u64 = 1;

/// Password a stock router accepts when none is configured.
pub const DEFAULT_PASSWORD: &str = "itoopie";

/// Default I2PControl listen address of the router.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:7650/";

// Methods
pub const METHOD_AUTHENTICATE: &str = "Authenticate";
pub const METHOD_ECHO: &str = "Echo";
pub const METHOD_ROUTER_INFO: &str = "RouterInfo";
pub const METHOD_ROUTER_MANAGER: &str = "RouterManager";
pub const METHOD_NETWORK_SETTING: &str = "NetworkSetting";

// Params
pub const PARAM_API: &str = "API";
pub const PARAM_PASSWORD: &str = "Password";
pub const PARAM_TOKEN: &str = "Token";
pub const PARAM_ECHO: &str = "Echo";
pub const PARAM_RESULT: &str = "Result";

/// Key under which a result signals an RPC-level failure.
pub const RESULT_ERROR: &str = "error";

// RouterInfo request keys
pub const ROUTER_INFO_UPTIME: &str = "i2p.router.uptime";
pub const ROUTER_INFO_VERSION: &str = "i2p.router.version";
pub const ROUTER_INFO_STATUS: &str = "i2p.router.status";
pub const ROUTER_INFO_NETDB_KNOWNPEERS: &str = "i2p.router.netdb.knownpeers";
pub const ROUTER_INFO_NETDB_ACTIVEPEERS: &str = "i2p.router.netdb.activepeers";
pub const ROUTER_INFO_NET_STATUS: &str = "i2p.router.net.status";
pub const ROUTER_INFO_TUNNELS_PARTICIPATING: &str = "i2p.router.net.tunnels.participating";
pub const ROUTER_INFO_BW_IB_1S: &str = "i2p.router.net.bw.inbound.1s";
pub const ROUTER_INFO_BW_OB_1S: &str = "i2p.router.net.bw.outbound.1s";
pub const ROUTER_INFO_BW_IB_15S: &str = "i2p.router.net.bw.inbound.15s";
pub const ROUTER_INFO_BW_OB_15S: &str = "i2p.router.net.bw.outbound.15s";
pub const ROUTER_INFO_TUNNELS_SUCCESSRATE: &str = "i2p.router.net.tunnels.successrate";
pub const ROUTER_INFO_TOTAL_RECEIVED_BYTES: &str = "i2p.router.net.total.received.bytes";
pub const ROUTER_INFO_TOTAL_SENT_BYTES: &str = "i2p.router.net.total.sent.bytes";

/// Every RouterInfo key, in the order a status view lists them.
pub const ROUTER_INFO_KEYS: [&str; 14] = [
    ROUTER_INFO_UPTIME,
    ROUTER_INFO_VERSION,
    ROUTER_INFO_STATUS,
    ROUTER_INFO_NETDB_KNOWNPEERS,
    ROUTER_INFO_NETDB_ACTIVEPEERS,
    ROUTER_INFO_NET_STATUS,
    ROUTER_INFO_TUNNELS_PARTICIPATING,
    ROUTER_INFO_TUNNELS_SUCCESSRATE,
    ROUTER_INFO_BW_IB_1S,
    ROUTER_INFO_BW_OB_1S,
    ROUTER_INFO_BW_IB_15S,
    ROUTER_INFO_BW_OB_15S,
    ROUTER_INFO_TOTAL_RECEIVED_BYTES,
    ROUTER_INFO_TOTAL_SENT_BYTES,
];

// RouterManager request keys
pub const ROUTER_MANAGER_SHUTDOWN: &str = "Shutdown";
pub const ROUTER_MANAGER_SHUTDOWN_GRACEFUL: &str = "ShutdownGraceful";
pub const ROUTER_MANAGER_RESEED: &str = "Reseed";

// NetworkSetting keys. A null value reads the setting, a number sets it.
pub const NETWORK_SETTING_BW_IN: &str = "i2p.router.net.bw.in";
pub const NETWORK_SETTING_BW_OUT: &str = "i2p.router.net.bw.out";
