//! Distributed Cache - a minimal multi-node in-memory cache
//!
//! Starts either a cache node or the round-robin load balancer.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dist_cache::api::create_router;
use dist_cache::cli::{Cli, Mode};
use dist_cache::lb::{create_lb_router, LbState};
use dist_cache::{AppState, Config};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Parse flags into a Config
/// 3. Build the node or load balancer router
/// 4. Serve until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dist_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_cli(Cli::parse())?;
    info!(
        "Configuration loaded: mode={:?}, port={}, nodes={:?}",
        config.mode, config.port, config.nodes
    );

    match config.mode {
        Mode::Node => {
            let state = AppState::from_config(&config);
            info!("Starting cache node at {}", state.node.address());
            serve(create_router(state), config.port).await
        }
        Mode::LoadBalancer => {
            info!("Starting load balancer on port {}", config.lb_port);
            let state = LbState::new(config.nodes.clone());
            serve(create_lb_router(state), config.lb_port).await
        }
    }
}

async fn serve(app: Router, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// Replication tasks still in flight are dropped with the runtime.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
