//! salwa server
//!
//! Receives Saleor order events and notifies customers through WhatsApp
//! template messages.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, ConfigOverrides};
use salwa_core::dispatch::CloudApiDispatcher;
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// salwa - Saleor order notifications over WhatsApp
#[derive(Parser, Debug)]
#[command(name = "salwa-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./salwa-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// WhatsApp Cloud API access token
    #[arg(long, env = "WHATSAPP_TOKEN", hide_env_values = true)]
    whatsapp_token: Option<String>,

    /// WhatsApp business phone number id
    #[arg(long, env = "WHATSAPP_PHONE_NUMBER_ID")]
    whatsapp_phone_number_id: Option<String>,

    /// GraphQL API URL of the Saleor instance allowed to send webhooks
    #[arg(long, env = "NEXT_PUBLIC_SALEOR_HOST_URL")]
    saleor_api_url: Option<Url>,

    /// Emit logs as JSON lines
    #[arg(long, default_value = "false")]
    log_json: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listen: self.listen,
            whatsapp_token: self.whatsapp_token.clone(),
            whatsapp_phone_number_id: self.whatsapp_phone_number_id.clone(),
            saleor_api_url: self.saleor_api_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.log_json);

    tracing::info!("Starting salwa-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = Arc::new(ConfigLoader::new(&args.config, args.overrides()));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = loaded_config.server.listen;
    tracing::info!("Configuration loaded from {:?}", args.config);
    for warning in loaded_config.startup_warnings() {
        tracing::warn!("{}", warning);
    }

    // Convert to shared config with separate locks for each section
    let shared_config = loaded_config.into_shared();

    // Create application state
    let state = AppState::new(shared_config, Arc::new(CloudApiDispatcher::new()));

    // Spawn config reload handler (listens for SIGHUP)
    let shutdown_notify = spawn_config_reload_handler(state.clone(), config_loader);

    // Build the router
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Signal the config reload handler to stop
    shutdown_notify.notify_one();
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
