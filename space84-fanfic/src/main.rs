//! space84-fanfic - artist metadata and fanfic HTTP service
//!
//! Reads artist records from the configured backing directory on every
//! request; nothing is cached or written.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use space84_common::config::{CliOverrides, ServiceConfig};
use space84_fanfic::store::open_store;
use space84_fanfic::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for space84-fanfic
///
/// Every flag is optional; unset values fall back to SPACE84_* environment
/// variables, then the TOML config file, then compiled defaults.
#[derive(Parser, Debug)]
#[command(name = "space84-fanfic")]
#[command(about = "Artist metadata and fanfic service for Space84")]
#[command(version)]
struct Args {
    /// Directory holding one file per artist
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Backing store format: json or markdown
    #[arg(short, long)]
    backend: Option<String>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        CliOverrides {
            data_dir: args.data_dir,
            backend: args.backend,
            host: args.host,
            port: args.port,
            config_file: args.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServiceConfig::resolve(&args.into()).context("Failed to resolve configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("space84_fanfic={},tower_http=info", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before anything touches the filesystem
    info!(
        "Starting Space84 fanfic service v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Backend: {}", config.backend);
    info!("Data directory: {}", config.data_dir.display());

    if !config.data_dir.is_dir() {
        warn!(
            "Data directory {} does not exist; artist endpoints will return 404",
            config.data_dir.display()
        );
    }

    let store = open_store(config.backend, config.data_dir.clone());
    let app = build_router(AppState::new(store));

    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid listen host '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("space84-fanfic listening on http://{}", addr);
    info!("Health check: http://{}/api/health", addr);

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
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
