//! Hemo Server: tenant-aware API for hemodialysis centers.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use hemo_api::AppState;
use hemo_auth::directory::PgDirectory;
use hemo_core::config::AppConfig;
use hemo_core::error::AppError;
use hemo_core::traits::LogNotifier;
use hemo_database::DatabasePool;
use hemo_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let env = std::env::var("HEMO_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        root_domain = %config.tenancy.root_domain,
        "Starting Hemo server"
    );

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    db.ping().await?;
    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        run_migrations(db.pool()).await?;
        tracing::info!("Database migrations complete");
    }

    // ── Step 2: Directory, engine, and services ──────────────────
    let directory = Arc::new(PgDirectory::new(db.pool().clone()));
    let state = AppState::new(config, directory, Arc::new(LogNotifier));

    // ── Step 3: Serve until shutdown ─────────────────────────────
    let result = hemo_api::serve(state).await;

    db.close().await;
    result
}
