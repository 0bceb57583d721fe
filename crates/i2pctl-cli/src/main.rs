// crates/i2pctl-cli/src/main.rs
//
// CLI entrypoint for the I2PControl client.
//
// Loads configuration, applies command line overrides, initializes tracing
// and dispatches to a subcommand. Every subcommand authenticates first and
// then issues its calls with the session token.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::call::CallCmd;
use commands::echo::EchoCmd;
use commands::network_setting::NetworkSettingCmd;
use commands::router_info::RouterInfoCmd;
use commands::router_manager::RouterManagerCmd;
use commands::Context;
use i2pctl_rpc::{AuthPolicy, ClientConfig};
use output::OutputFormat;

/// i2pctl: query and manage a running I2P router over I2PControl.
#[derive(Parser, Debug)]
#[command(
    name = "i2pctl",
    version,
    about = "Query and manage a running I2P router over its I2PControl JSON-RPC interface"
)]
struct Cli {
    /// Path to the TOML configuration file (default: ~/.i2pctl/config.toml).
    #[arg(long, global = true)]
    config: Option<String>,

    /// I2PControl endpoint URL, overriding the configuration file.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// I2PControl password, overriding the configuration file.
    #[arg(long, global = true)]
    password: Option<String>,

    /// Refuse to continue unless the router issues a token.
    #[arg(long, global = true)]
    strict_auth: bool,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Display the router status dashboard.
    Status,

    /// Ask the router to echo a string back.
    Echo(EchoCmd),

    /// Query RouterInfo keys (all known keys when none are given).
    RouterInfo(RouterInfoCmd),

    /// Shutdown, graceful shutdown, or reseed.
    #[command(subcommand)]
    RouterManager(RouterManagerCmd),

    /// Read or set the router's bandwidth limits.
    NetworkSetting(NetworkSettingCmd),

    /// Issue an arbitrary method with JSON params.
    Call(CallCmd),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration before tracing so its log level can seed the filter.
    let explicit = cli.config.is_some();
    let path = cli
        .config
        .clone()
        .map(std::path::PathBuf::from)
        .or_else(ClientConfig::default_path);
    let loaded = match &path {
        Some(p) if explicit || p.exists() => Some(ClientConfig::load(p)),
        _ => None,
    };
    let mut config = match &loaded {
        Some(Ok(cfg)) => cfg.clone(),
        _ => ClientConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    match (&loaded, &path) {
        (Some(Ok(_)), Some(p)) => tracing::debug!("Loaded configuration from {}", p.display()),
        (Some(Err(e)), _) if explicit => return Err(e.to_string().into()),
        (Some(Err(e)), _) => tracing::warn!("{}. Using defaults.", e),
        _ => tracing::debug!("No configuration file, using defaults"),
    }

    // Command line flags override the config file.
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(password) = cli.password {
        config.password = password;
    }
    if cli.strict_auth {
        config.auth_policy = AuthPolicy::Strict;
    }
    config.validate()?;

    let ctx = Context {
        config,
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        },
    };

    match &cli.command {
        Commands::Status => commands::status::run(&ctx).await?,
        Commands::Echo(cmd) => commands::echo::run(&ctx, cmd).await?,
        Commands::RouterInfo(cmd) => commands::router_info::run(&ctx, cmd).await?,
        Commands::RouterManager(cmd) => commands::router_manager::run(&ctx, cmd).await?,
        Commands::NetworkSetting(cmd) => commands::network_setting::run(&ctx, cmd).await?,
        Commands::Call(cmd) => commands::call::run(&ctx, cmd).await?,
    }

    Ok(())
}
