// promconf - Configuration precedence and validation for a Prometheus metrics endpoint
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use promconf::cli::Args;
use promconf::config::AppConfig;
use promconf::env::ProcessEnvironment;
use promconf::persistence::JsonFileBackend;
use promconf::server::create_router;
use promconf::store::{registry, ConfigurationStore};
use promconf::utils::logging;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load()?;
    if let Some(path) = args.settings.clone() {
        config.storage.settings_path = path;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting promconf v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Resolve settings from the saved record and the environment
    info!("Loading settings from {}", config.storage.settings_path);
    let store = Arc::new(ConfigurationStore::open(
        Arc::new(ProcessEnvironment),
        Arc::new(JsonFileBackend::new(&config.storage.settings_path)),
    ));
    registry::install(Arc::clone(&store))?;

    if args.show {
        let settings = store.snapshot();
        let out = json!({
            "path": settings.effective_path(),
            "settings": &*settings,
            "startup": store.report(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(candidate) = args.check_path.as_deref() {
        println!("{}", serde_json::to_string_pretty(&store.check_path(candidate))?);
        return Ok(());
    }

    // Phase 4: Build and start the admin HTTP server
    let app = create_router(Arc::clone(&store));
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting admin server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    registry::teardown();
    info!("Server shut down gracefully");
    Ok(())
}

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
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
