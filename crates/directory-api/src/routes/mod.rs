//! Route definitions
//!
//! Procedures are mounted under /api/v1; health probes sit at the root.

use axum::{routing::get, Router};

use crate::handlers::{auth, health, members};
use crate::state::AppState;

/// Create the API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(auth_routes()).merge(member_routes())
}

/// Session routes
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(auth::me))
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/members/filter-options", get(members::get_filter_options))
        .route(
            "/members/:id",
            get(members::get_member)
                .patch(members::update_member)
                .delete(members::delete_member),
        )
}
