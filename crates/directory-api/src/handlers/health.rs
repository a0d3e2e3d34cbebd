//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use directory_service::dto::{HealthResponse, ReadinessResponse};
use tracing::warn;

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with storage health
///
/// GET /health/ready
///
/// A server running without storage is still ready: it serves empty reads.
/// A configured database that stops answering is not.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let storage = state.service_context().storage();
    let configured = storage.is_available();

    let healthy = if configured {
        match storage.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Readiness probe failed");
                false
            }
        }
    } else {
        false
    };

    let response = ReadinessResponse::ready(configured, healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
