//! Task service.
//!
//! # Environment Variables
//!
//! - `TODOAPP_CONFIG_PATH`: optional JSON config file
//! - `TODOAPP_STORE_PATH`: task document (default: `tasks.json`)
//! - `TODOAPP_INDEX_PATH`: page served at `/` (default: `index.html`)
//! - `HOST`: bind address (default: `0.0.0.0`)
//! - `PORT`: listen port (default: `3000`)
//! - `RUST_LOG`: log filter (default: `todo_server=debug,todo_core=debug,tower_http=debug`)

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use todo_core::task_api::TaskStore;
use todo_server::cli::Cli;
use todo_server::routes::{AppState, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "todo_server=debug,todo_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "configuration error");
            std::process::exit(1);
        }
    };

    tracing::info!(
        store = %config.store_path.display(),
        index = %config.index_path.display(),
        "configuration loaded"
    );

    let state = AppState::new(TaskStore::new(&config.store_path), config.index_path.clone());
    let application = create_router(state);

    let address = config.address();
    let listener = match TcpListener::bind(address.as_str()).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "failed to bind to {}", address);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(local) => tracing::info!("Server is running on http://{}", local),
        Err(error) => tracing::warn!(%error, "could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "server error");
        std::process::exit(1);
    }

    tracing::info!("server shutdown complete");
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
