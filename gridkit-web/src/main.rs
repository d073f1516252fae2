//! gridkit-web - HTTP facade for qualifying results
//!
//! Serves `/api/qualifying` and the static front end from one process.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use gridkit_common::config::TomlConfig;
use gridkit_common::logging::init_tracing;
use gridkit_common::openf1::OpenF1Client;
use gridkit_web::{build_router, AppState};

/// Command-line arguments for gridkit-web
#[derive(Parser, Debug)]
#[command(name = "gridkit-web")]
#[command(about = "HTTP facade for OpenF1 qualifying results")]
#[command(version)]
struct Args {
    /// Port to listen on (default: web.port from config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding index.html and the other front-end files
    #[arg(short, long, env = "GRIDKIT_STATIC_ROOT")]
    static_root: Option<PathBuf>,

    /// Configuration file (default: $GRIDKIT_CONFIG, then the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_source) =
        TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    info!(
        "Starting gridkit-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Configuration: {}", config_source);

    let client = OpenF1Client::from_config(&config.api).context("Failed to create OpenF1 client")?;
    info!("Upstream API: {}", client.base_url());

    let static_root = args.static_root.unwrap_or(config.web.static_root);
    info!("Serving static files from: {}", static_root.display());

    let mut state = AppState::new(Arc::new(client), static_root, config.mock.season);
    if let Some(path) = config_source.path() {
        state = state.with_config_file(path);
    }
    let app = build_router(state);

    let port = args.port.unwrap_or(config.web.port);
    let addr: SocketAddr = format!("{}:{}", config.web.host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.web.host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("gridkit-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
