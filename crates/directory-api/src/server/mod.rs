//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;

use axum::Router;
use directory_common::{AppConfig, AppError, AppResult, JwtService};
use directory_db::{DatabaseConfig, Storage};
use directory_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes skip the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
///
/// Storage problems do not stop startup; the directory then runs without
/// storage and serves empty reads.
pub async fn create_app_state(config: AppConfig) -> AppState {
    let db_config = config.database.as_ref().map(DatabaseConfig::from);
    let storage = Storage::connect(db_config.as_ref()).await;
    info!(available = storage.is_available(), "Storage initialized");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.session_expiry,
    ));

    let service_context =
        ServiceContext::new(storage, jwt_service, config.app.owner_open_id.clone());

    AppState::new(service_context, config)
}

/// Run the HTTP server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> AppResult<()> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.api.address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    let state = create_app_state(config).await;
    let app = create_app(state);

    run_server(app, listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
