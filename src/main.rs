//! SafeRoute server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ http (axum) ──▶ SafeRouteService
//!                                   │
//!               ┌───────────────────┼─────────────────────┐
//!               ▼                   ▼                     ▼
//!          RoutePlanner        HazardStore  ◀──────  BeaconLog
//!               │              (versioned)     (JSON lines / memory)
//!               │                   ▲
//!               ▼                   │
//!   resolver (geocode cache,   HazardToggler
//!    feature, safe zones)     (background tick)
//!               │
//!               ▼
//!   providers: Nominatim, Overpass, OSRM
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use saferoute::config::{load_config, SafeRouteConfig};
use saferoute::lifecycle::{build_service, build_toggler, signals, Shutdown};
use saferoute::observability::{logging, metrics};
use saferoute::HttpServer;

#[derive(Parser)]
#[command(name = "saferoute")]
#[command(about = "Hazard-aware evacuation routing service", long_about = None)]
struct Args {
    /// Path to a TOML config file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SafeRouteConfig::default(),
    };

    logging::init(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "saferoute starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        toggle_interval_secs = config.hazards.toggle_interval_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let service = Arc::new(build_service(&config)?);
    let shutdown = Arc::new(Shutdown::new());

    let toggler = build_toggler(&config.hazards, service.store().clone())?;
    let toggler_task = tokio::spawn(toggler.run(shutdown.subscribe()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(&config, service);
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    if let Err(e) = toggler_task.await {
        tracing::error!(error = %e, "Hazard toggler task failed");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
