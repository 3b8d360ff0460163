//! CiviDesk Server — NGO records-management backend
//!
//! Main entry point: loads configuration, wires the auth subsystem, and
//! starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use cividesk_core::config::AppConfig;
use cividesk_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load and validate configuration from files and environment.
///
/// A missing or malformed signing secret aborts startup here; it is never
/// a per-request error.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CIVIDESK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = AppConfig::load(&env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CiviDesk v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db_pool = cividesk_database::connection::create_pool(&config.database).await?;

    cividesk_database::migration::run_migrations(&db_pool).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = cividesk_api::AppState::build(config, db_pool)?;
    let app = cividesk_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("CiviDesk server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("CiviDesk server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
