//! Repositories API (v1)
//!
//! An in-memory CRUD service for repository records, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ CORS → request id → request log ─┬─▶ GET/POST /repositories ──────┐
//!                                                      │                                │
//!                                                      └─▶ validate_id ─▶ {id} routes ──┤
//!                                                                                       ▼
//!     Client Response                                                           RepositoryStore
//!     ◀─────────────── JSON body (record, list, or {"error": ...}) ◀────────── (ordered, in memory)
//! ```
//!
//! # Endpoints
//! - `GET    /repositories`
//! - `POST   /repositories`
//! - `PUT    /repositories/{id}`
//! - `DELETE /repositories/{id}`
//! - `POST   /repositories/{id}/like`

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use repositories_api::config::{load_config, ServiceConfig};
use repositories_api::lifecycle::{signals, Shutdown};
use repositories_api::observability::{logging, metrics};
use repositories_api::HttpServer;

#[derive(Parser)]
#[command(name = "repositories-api")]
#[command(about = "In-memory repositories CRUD service", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "REPOSITORIES_API_CONFIG")]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("repositories-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
