//! Xtream relay
//!
//! Serves the player front end and relays its `/api` calls to the Xtream
//! panel named in each request's headers.
//!
//! ```text
//! Browser
//!   │
//!   ├─▶ /, /*.js, ...  ──▶ static index + ServeDir assets
//!   │
//!   └─▶ /api/*  ──▶ credential gate ──▶ catalog service ──▶ TTL cache (categories)
//!                                            │
//!                                            ▼
//!                                      Xtream client ──▶ {host}/player_api.php
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use xtream_relay::config::{load_config, RelayConfig};
use xtream_relay::http::HttpServer;
use xtream_relay::lifecycle::{signals, Shutdown};
use xtream_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "xtream-relay")]
#[command(about = "HTTP relay for Xtream Codes IPTV panels", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Built-in defaults are used without it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!("xtream-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = config.upstream.timeout_secs,
        cache_ttl_secs = config.cache.ttl_secs,
        cache_max_entries = ?config.cache.max_entries,
        static_root = %config.static_files.root,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Arc::new(Shutdown::new());
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_on_ctrl_c(&signal_shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
