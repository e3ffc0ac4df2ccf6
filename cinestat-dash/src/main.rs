//! cinestat-dash - Analytics dashboard service entry point
//!
//! Opens (or bootstraps) the film/awards warehouse, loads the genre
//! vocabulary, and serves the statistics API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinestat_common::config;
use cinestat_dash::{build_router, AppState, Warehouse};
use cinestat_engine::{GenreCodec, GenreVocabulary};

/// Command-line arguments for cinestat-dash
#[derive(Parser, Debug)]
#[command(name = "cinestat-dash")]
#[command(about = "Analytics dashboard service for the CineStat warehouse")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5730", env = "CINESTAT_PORT")]
    port: u16,

    /// Folder containing the warehouse database
    #[arg(short, long, env = "CINESTAT_DATA_DIR")]
    data_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinestat_dash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting CineStat dashboard v{} on port {}",
        env!("CARGO_PKG_VERSION"),
        args.port
    );

    let data_folder = config::resolve_data_folder(args.data_folder.as_deref(), "CINESTAT_DATA_DIR")
        .context("Failed to resolve data folder")?;
    let db_path = config::database_path(&data_folder);
    info!("Warehouse database: {}", db_path.display());

    let pool = cinestat_common::db::init_database(&db_path)
        .await
        .context("Failed to initialize warehouse database")?;
    let warehouse = Warehouse::new(pool);

    // Genre vocabulary comes from dim_genre when populated; otherwise the
    // compiled-in default list
    let names = warehouse
        .fetch_genre_vocabulary()
        .await
        .context("Failed to load genre vocabulary")?;
    let vocab = if names.is_empty() {
        info!("dim_genre is empty, using default genre vocabulary");
        GenreVocabulary::default()
    } else {
        info!("Loaded {} genres from dim_genre", names.len());
        GenreVocabulary::new(names)
    };

    let state = AppState::new(warehouse, GenreCodec::new(vocab));
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("cinestat-dash listening on http://{}", addr);

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
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
