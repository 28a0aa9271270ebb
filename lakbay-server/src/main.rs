mod config;
mod error;
mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use lakbay::create_trip_planner;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// HTTP API for the lakbay bus planner
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "lakbay.toml")]
    config: PathBuf,
    /// Overrides `server.bind` from the configuration file
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Extra route definition directories, scanned after the configured ones
    #[arg(long = "routes")]
    route_dirs: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = Args::parse();
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    config.network.route_dirs.extend(args.route_dirs);

    let network = config.network.clone();
    let routing = config.routing.clone();
    let planner =
        tokio::task::spawn_blocking(move || create_trip_planner(&network, routing)).await??;
    info!("{planner}");

    let app = routes::create_router(planner, &config.server);
    let listener = TcpListener::bind(config.server.bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
